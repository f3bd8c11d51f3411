//! Use-case services over the repository layer.
//!
//! # Responsibility
//! - Provide stable entry points for dashboard callers.
//! - Carry the caller's identity and apply advisory ownership checks.
//! - Execute CSV import batches row by row.
//!
//! # Invariants
//! - Services never bypass repository validation/persistence contracts.
//! - The service layer remains storage-agnostic.

use crate::model::commitment::UserId;

pub mod commitment_service;
pub mod profile_service;
pub mod project_service;
pub mod task_service;

/// The authenticated caller's identity, supplied by the host application.
///
/// Authentication itself is out of scope; core only consumes the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub email: String,
}

impl Session {
    pub fn new(user_id: UserId, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }
}
