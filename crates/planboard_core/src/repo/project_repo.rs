//! Project repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over `projects` storage.
//!
//! # Invariants
//! - Write paths call `Project::validate()` before SQL mutations.
//! - List results are ordered by `created_at DESC, id ASC` (newest first).
//! - Projects are visible to every user; only tasks and commitments are
//!   owner-scoped.

use crate::model::project::{Project, ProjectId, ProjectPriority};
use crate::repo::{date_to_sql, parse_sql_date, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    owner_id,
    owner_email,
    start_date,
    end_date,
    required_members,
    priority
FROM projects";

/// Repository interface for project CRUD operations.
pub trait ProjectRepository {
    fn create(&self, project: &Project) -> RepoResult<ProjectId>;
    fn update(&self, project: &Project) -> RepoResult<()>;
    fn get(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    fn list(&self) -> RepoResult<Vec<Project>>;
    fn delete(&self, id: ProjectId) -> RepoResult<()>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn create(&self, project: &Project) -> RepoResult<ProjectId> {
        project.validate()?;

        self.conn.execute(
            "INSERT INTO projects (
                id,
                name,
                description,
                owner_id,
                owner_email,
                start_date,
                end_date,
                required_members,
                priority
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                project.id.to_string(),
                project.name.as_str(),
                project.description.as_deref(),
                project.owner_id.to_string(),
                project.owner_email.as_str(),
                project.start_date.map(date_to_sql),
                project.end_date.map(date_to_sql),
                project.required_members.as_deref(),
                project.priority.as_str(),
            ],
        )?;

        Ok(project.id)
    }

    fn update(&self, project: &Project) -> RepoResult<()> {
        project.validate()?;

        let changed = self.conn.execute(
            "UPDATE projects
             SET
                name = ?1,
                description = ?2,
                start_date = ?3,
                end_date = ?4,
                required_members = ?5,
                priority = ?6,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?7;",
            params![
                project.name.as_str(),
                project.description.as_deref(),
                project.start_date.map(date_to_sql),
                project.end_date.map(date_to_sql),
                project.required_members.as_deref(),
                project.priority.as_str(),
                project.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(project.id));
        }

        Ok(())
    }

    fn get(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }

        Ok(None)
    }

    fn list(&self) -> RepoResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROJECT_SELECT_SQL} ORDER BY created_at DESC, id ASC;"
        ))?;

        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }

        Ok(projects)
    }

    fn delete(&self, id: ProjectId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM projects WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let id_text: String = row.get("id")?;
    let owner_id_text: String = row.get("owner_id")?;

    let priority_text: String = row.get("priority")?;
    let priority = ProjectPriority::parse(&priority_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid priority `{priority_text}` in projects.priority"
        ))
    })?;

    let start_date = row
        .get::<_, Option<String>>("start_date")?
        .map(|value| parse_sql_date(&value, "projects.start_date"))
        .transpose()?;
    let end_date = row
        .get::<_, Option<String>>("end_date")?
        .map(|value| parse_sql_date(&value, "projects.end_date"))
        .transpose()?;

    let project = Project {
        id: parse_uuid(&id_text, "projects.id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        owner_id: parse_uuid(&owner_id_text, "projects.owner_id")?,
        owner_email: row.get("owner_email")?,
        start_date,
        end_date,
        required_members: row.get("required_members")?,
        priority,
    };
    project.validate()?;
    Ok(project)
}
