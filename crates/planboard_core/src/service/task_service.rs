//! Task use-case service.
//!
//! # Responsibility
//! - Provide task CRUD entry points scoped to the caller.
//! - Map missing project joins to the `Unknown Project` display name.
//! - Execute task CSV import batches.
//!
//! # Invariants
//! - Created tasks are always assigned to the session user; a CSV
//!   `Assigned To` value never overrides the caller's identity.
//! - Import creates rows sequentially in input order, with no rollback
//!   of rows created before a failure.

use crate::import::normalize::{normalize_task_rows, ProjectRef};
use crate::import::reader::RawRow;
use crate::import::{ImportError, ImportSummary};
use crate::model::task::{Task, TaskId};
use crate::repo::task_repo::{TaskRecord, TaskRepository};
use crate::repo::RepoError;
use crate::service::Session;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Display name shown when a task's project reference cannot be
/// resolved.
const UNKNOWN_PROJECT: &str = "Unknown Project";

/// Service error for task use-cases.
#[derive(Debug)]
pub enum TaskServiceError {
    /// Target task does not exist (or belongs to another user).
    TaskNotFound(TaskId),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::InconsistentState(details) => {
                write!(f, "inconsistent task state: {details}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::TaskNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Read model for dashboard task lists.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskView {
    pub task: Task,
    /// Resolved project name, or `Unknown Project`.
    pub project_name: String,
}

impl From<TaskRecord> for TaskView {
    fn from(record: TaskRecord) -> Self {
        Self {
            task: record.task,
            project_name: record
                .project_name
                .unwrap_or_else(|| UNKNOWN_PROJECT.to_string()),
        }
    }
}

/// Request model for creating one task.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub project_id: Option<uuid::Uuid>,
    pub title: String,
    pub duration_hours: f64,
    pub order_index: i64,
}

/// Use-case service wrapper for task operations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists the caller's tasks ordered by display position.
    pub fn list(&self, session: &Session) -> Result<Vec<TaskView>, TaskServiceError> {
        let records = self.repo.list_for_assignee(&assignee_key(session))?;
        Ok(records.into_iter().map(TaskView::from).collect())
    }

    /// Creates one task assigned to the caller and returns the stored
    /// view with its resolved project name.
    pub fn create(&self, session: &Session, new: NewTask) -> Result<TaskView, TaskServiceError> {
        let mut task = Task::new(new.title);
        task.project_id = new.project_id;
        task.assigned_to = Some(assignee_key(session));
        task.duration_hours = new.duration_hours;
        task.order_index = new.order_index;

        let id = self.repo.create(&task)?;
        let record = self
            .repo
            .get(id, &assignee_key(session))?
            .ok_or(TaskServiceError::InconsistentState(
                "created task not found in read-back",
            ))?;
        Ok(TaskView::from(record))
    }

    /// Updates one task owned by the caller.
    pub fn update(&self, session: &Session, task: &Task) -> Result<(), TaskServiceError> {
        self.repo.update(task, &assignee_key(session))?;
        Ok(())
    }

    /// Deletes one task owned by the caller.
    pub fn delete(&self, session: &Session, id: TaskId) -> Result<(), TaskServiceError> {
        self.repo.delete(id, &assignee_key(session))?;
        Ok(())
    }

    /// Imports task rows parsed from a CSV file.
    ///
    /// Rows are normalized independently against `projects`, blank-title
    /// rows are dropped, and each surviving draft issues one create call
    /// in input order, assigned to the caller.
    ///
    /// # Errors
    /// - `ImportError::NoValidRows` when every row was filtered out.
    /// - `ImportError::Repo` when a create call fails; rows created
    ///   before the failure stay committed.
    pub fn import_tasks(
        &self,
        session: &Session,
        rows: &[RawRow],
        projects: &[ProjectRef],
    ) -> Result<ImportSummary, ImportError> {
        let drafts = normalize_task_rows(rows, projects);
        let skipped = rows.len() - drafts.len();

        if drafts.is_empty() {
            warn!(
                "event=import_batch module=service entity=task status=rejected \
                 rows={} error_code=no_valid_rows",
                rows.len()
            );
            return Err(ImportError::NoValidRows);
        }

        let mut imported = 0;
        for draft in drafts {
            let mut task = Task::new(draft.title);
            task.project_id = draft.project_id;
            task.assigned_to = Some(assignee_key(session));
            task.duration_hours = draft.duration_hours;
            task.order_index = draft.order_index;

            self.repo.create(&task)?;
            imported += 1;
        }

        info!(
            "event=import_batch module=service entity=task status=ok \
             imported={imported} skipped={skipped}"
        );
        Ok(ImportSummary { imported, skipped })
    }
}

fn assignee_key(session: &Session) -> String {
    session.user_id.to_string()
}
