//! Task repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over `tasks` storage.
//! - Resolve the referenced project name in read paths so callers never
//!   issue a second lookup.
//!
//! # Invariants
//! - Write and delete paths are scoped to the assignee; a foreign id
//!   reads as not-found.
//! - Write paths call `Task::validate()` before SQL mutations.
//! - List results are ordered by `order_index ASC, created_at ASC`.

use crate::model::task::{Task, TaskId};
use crate::repo::{parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const TASK_SELECT_SQL: &str = "SELECT
    t.id,
    t.project_id,
    t.title,
    t.assigned_to,
    t.duration_hours,
    t.order_index,
    p.name AS project_name
FROM tasks t
LEFT JOIN projects p ON p.id = t.project_id";

/// Read model pairing a task with its resolved project name.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRecord {
    pub task: Task,
    /// `None` when the task is unfiled or the project row is gone.
    pub project_name: Option<String>,
}

/// Repository interface for task CRUD operations.
pub trait TaskRepository {
    fn create(&self, task: &Task) -> RepoResult<TaskId>;
    fn update(&self, task: &Task, assignee: &str) -> RepoResult<()>;
    fn get(&self, id: TaskId, assignee: &str) -> RepoResult<Option<TaskRecord>>;
    fn list_for_assignee(&self, assignee: &str) -> RepoResult<Vec<TaskRecord>>;
    fn delete(&self, id: TaskId, assignee: &str) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (
                id,
                project_id,
                title,
                assigned_to,
                duration_hours,
                order_index
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                task.id.to_string(),
                task.project_id.map(|id| id.to_string()),
                task.title.as_str(),
                task.assigned_to.as_deref(),
                task.duration_hours,
                task.order_index,
            ],
        )?;

        Ok(task.id)
    }

    fn update(&self, task: &Task, assignee: &str) -> RepoResult<()> {
        task.validate()?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                project_id = ?1,
                title = ?2,
                duration_hours = ?3,
                order_index = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?5
               AND assigned_to = ?6;",
            params![
                task.project_id.map(|id| id.to_string()),
                task.title.as_str(),
                task.duration_hours,
                task.order_index,
                task.id.to_string(),
                assignee,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(task.id));
        }

        Ok(())
    }

    fn get(&self, id: TaskId, assignee: &str) -> RepoResult<Option<TaskRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE t.id = ?1
               AND t.assigned_to = ?2;"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), assignee])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn list_for_assignee(&self, assignee: &str) -> RepoResult<Vec<TaskRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE t.assigned_to = ?1
             ORDER BY t.order_index ASC, t.created_at ASC, t.id ASC;"
        ))?;

        let mut rows = stmt.query([assignee])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_task_row(row)?);
        }

        Ok(records)
    }

    fn delete(&self, id: TaskId, assignee: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM tasks WHERE id = ?1 AND assigned_to = ?2;",
            params![id.to_string(), assignee],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<TaskRecord> {
    let id_text: String = row.get("id")?;
    let project_id = row
        .get::<_, Option<String>>("project_id")?
        .map(|value| parse_uuid(&value, "tasks.project_id"))
        .transpose()?;

    let task = Task {
        id: parse_uuid(&id_text, "tasks.id")?,
        project_id,
        title: row.get("title")?,
        assigned_to: row.get("assigned_to")?,
        duration_hours: row.get("duration_hours")?,
        order_index: row.get("order_index")?,
    };
    task.validate()?;

    Ok(TaskRecord {
        task,
        project_name: row.get("project_name")?,
    })
}
