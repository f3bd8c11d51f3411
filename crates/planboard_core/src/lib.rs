//! Core domain logic for Planboard.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod import;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use import::{read_rows, ImportError, ImportSummary, RawRow};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::commitment::{
    Commitment, CommitmentCategory, CommitmentId, Flexibility, UserId,
};
pub use model::project::{Project, ProjectId, ProjectPriority};
pub use model::task::{Task, TaskId};
pub use model::user::UserProfile;
pub use repo::{RepoError, RepoResult};
pub use service::Session;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
