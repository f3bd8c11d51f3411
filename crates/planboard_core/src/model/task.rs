//! Task domain model.
//!
//! # Responsibility
//! - Represent a unit of work with an optional project reference.
//!
//! # Invariants
//! - `title` is never empty.
//! - `duration_hours` is finite and non-negative.
//! - `order_index` controls display ordering only.

use crate::model::project::ProjectId;
use crate::model::ValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task record.
pub type TaskId = Uuid;

/// A unit of work assigned to one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Stable record id.
    pub id: TaskId,
    /// Referenced project; `None` when the task is unfiled.
    pub project_id: Option<ProjectId>,
    pub title: String,
    /// Free-text assignee identity; queries scope on it.
    pub assigned_to: Option<String>,
    /// Estimated effort in hours. Zero means unestimated.
    pub duration_hours: f64,
    /// User-supplied display sort position.
    pub order_index: i64,
}

impl Task {
    /// Creates an unfiled, unassigned task with a generated stable id.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id: None,
            title: title.into(),
            assigned_to: None,
            duration_hours: 0.0,
            order_index: 0,
        }
    }

    /// Checks record consistency before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.is_empty() {
            return Err(ValidationError::EmptyField {
                entity: "task",
                field: "title",
            });
        }
        if !self.duration_hours.is_finite() {
            return Err(ValidationError::NonFiniteDuration);
        }
        if self.duration_hours < 0.0 {
            return Err(ValidationError::NegativeDuration);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Task;
    use crate::model::ValidationError;

    #[test]
    fn new_task_is_valid_with_zero_duration() {
        assert_eq!(Task::new("Write spec").validate(), Ok(()));
    }

    #[test]
    fn empty_title_is_rejected() {
        let mut task = Task::new("x");
        task.title.clear();
        assert!(matches!(
            task.validate(),
            Err(ValidationError::EmptyField { field: "title", .. })
        ));
    }

    #[test]
    fn nan_duration_is_rejected() {
        let mut task = Task::new("Estimate");
        task.duration_hours = f64::NAN;
        assert_eq!(task.validate(), Err(ValidationError::NonFiniteDuration));
    }

    #[test]
    fn negative_duration_is_rejected() {
        let mut task = Task::new("Estimate");
        task.duration_hours = -1.0;
        assert_eq!(task.validate(), Err(ValidationError::NegativeDuration));
    }
}
