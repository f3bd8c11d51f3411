//! CSV bulk-import pipeline.
//!
//! # Responsibility
//! - Read header-keyed CSV rows (`reader`).
//! - Turn loose rows into validated entity drafts (`normalize`).
//! - Define the batch-level error and summary types shared by the
//!   entity services that execute imports.
//!
//! # Invariants
//! - Row transforms are pure and total; malformed fields are repaired
//!   with defaults, never raised.
//! - Only an import yielding zero valid rows fails as a batch.

use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod normalize;
pub mod reader;

pub use normalize::{
    normalize_commitment_row, normalize_commitment_rows, normalize_task_row, normalize_task_rows,
    CommitmentDraft, ProjectRef, TaskDraft,
};
pub use reader::{read_rows, RawRow};

/// Aggregate outcome of one import batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rows that produced a created record.
    pub imported: usize,
    /// Rows dropped by the minimum-validity filter (blank title).
    pub skipped: usize,
}

/// Batch-level import failure.
#[derive(Debug)]
pub enum ImportError {
    /// Every row was filtered out; nothing was created.
    NoValidRows,
    /// The CSV input could not be parsed at all.
    Csv(csv::Error),
    /// A create call failed mid-batch. Rows created before the failure
    /// remain committed; there is no rollback.
    Repo(RepoError),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoValidRows => write!(f, "no valid rows found in the CSV input"),
            Self::Csv(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NoValidRows => None,
            Self::Csv(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<csv::Error> for ImportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<RepoError> for ImportError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}
