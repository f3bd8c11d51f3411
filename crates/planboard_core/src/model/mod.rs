//! Domain model for the planning dashboard.
//!
//! # Responsibility
//! - Define canonical records for commitments, projects, tasks and profiles.
//! - Centralize field-level validation shared by all persistence paths.
//!
//! # Invariants
//! - Every record is identified by a stable UUID.
//! - `validate()` must pass before any record reaches storage.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod commitment;
pub mod project;
pub mod task;
pub mod user;

/// Field-level validation failure shared by all entity models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty or blank.
    EmptyField {
        entity: &'static str,
        field: &'static str,
    },
    /// End date is earlier than start date.
    DateRangeInverted { entity: &'static str },
    /// End time is earlier than start time.
    TimeRangeInverted { entity: &'static str },
    /// Task duration is NaN or infinite.
    NonFiniteDuration,
    /// Task duration is below zero.
    NegativeDuration,
    /// Working-day index outside 0..=6.
    InvalidWeekday(u8),
    /// Working-day index listed more than once.
    DuplicateWeekday(u8),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { entity, field } => {
                write!(f, "{entity}.{field} must not be empty")
            }
            Self::DateRangeInverted { entity } => {
                write!(f, "{entity} end date is earlier than start date")
            }
            Self::TimeRangeInverted { entity } => {
                write!(f, "{entity} end time is earlier than start time")
            }
            Self::NonFiniteDuration => write!(f, "task duration must be a finite number"),
            Self::NegativeDuration => write!(f, "task duration must not be negative"),
            Self::InvalidWeekday(day) => {
                write!(f, "working day index {day} is outside 0..=6")
            }
            Self::DuplicateWeekday(day) => {
                write!(f, "working day index {day} is listed more than once")
            }
        }
    }
}

impl Error for ValidationError {}
