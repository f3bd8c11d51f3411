//! Commitment use-case service.
//!
//! # Responsibility
//! - Provide list/add/update/delete entry points scoped to the caller.
//! - Apply the advisory ownership check (record owner email vs session).
//! - Execute commitment CSV import batches.
//!
//! # Invariants
//! - Mutations go through the repository; no direct SQL here.
//! - Import creates rows sequentially in input order, with no rollback
//!   of rows created before a failure.

use crate::import::normalize::normalize_commitment_rows;
use crate::import::reader::RawRow;
use crate::import::{ImportError, ImportSummary};
use crate::model::commitment::{
    Commitment, CommitmentCategory, CommitmentId, Flexibility,
};
use crate::repo::commitment_repo::{CommitmentListQuery, CommitmentRepository};
use crate::repo::RepoError;
use crate::service::Session;
use chrono::{NaiveDate, NaiveTime};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for commitment use-cases.
#[derive(Debug)]
pub enum CommitmentServiceError {
    /// Target commitment does not exist (or belongs to another user).
    CommitmentNotFound(CommitmentId),
    /// The record's owner email does not match the session email.
    NotOwner(CommitmentId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for CommitmentServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CommitmentNotFound(id) => write!(f, "commitment not found: {id}"),
            Self::NotOwner(id) => {
                write!(f, "commitment {id} belongs to another user")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CommitmentServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for CommitmentServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::CommitmentNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Request model for adding one commitment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCommitment {
    pub category: CommitmentCategory,
    pub flexibility: Flexibility,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

/// Use-case service wrapper for commitment operations.
pub struct CommitmentService<R: CommitmentRepository> {
    repo: R,
}

impl<R: CommitmentRepository> CommitmentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists the caller's commitments ordered by start date.
    pub fn list(&self, session: &Session) -> Result<Vec<Commitment>, CommitmentServiceError> {
        let query = CommitmentListQuery::for_user(session.user_id);
        Ok(self.repo.list(&query)?)
    }

    /// Adds one commitment owned by the caller.
    pub fn add(
        &self,
        session: &Session,
        new: NewCommitment,
    ) -> Result<Commitment, CommitmentServiceError> {
        let mut commitment = Commitment::new(
            session.user_id,
            session.email.clone(),
            new.category,
            new.flexibility,
            new.title,
            new.start_date,
            new.end_date,
        );
        commitment.start_time = new.start_time;
        commitment.end_time = new.end_time;

        self.repo.create(&commitment)?;
        Ok(commitment)
    }

    /// Updates one commitment after the advisory ownership check.
    pub fn update(
        &self,
        session: &Session,
        commitment: &Commitment,
    ) -> Result<(), CommitmentServiceError> {
        if commitment.owner != session.email {
            warn!(
                "event=commitment_update module=service status=rejected \
                 error_code=not_owner id={}",
                commitment.id
            );
            return Err(CommitmentServiceError::NotOwner(commitment.id));
        }
        self.repo.update(commitment)?;
        Ok(())
    }

    /// Deletes one commitment after the advisory ownership check.
    pub fn delete(
        &self,
        session: &Session,
        id: CommitmentId,
    ) -> Result<(), CommitmentServiceError> {
        let commitment = self
            .repo
            .get(id, session.user_id)?
            .ok_or(CommitmentServiceError::CommitmentNotFound(id))?;
        if commitment.owner != session.email {
            warn!(
                "event=commitment_delete module=service status=rejected \
                 error_code=not_owner id={id}"
            );
            return Err(CommitmentServiceError::NotOwner(id));
        }
        self.repo.delete(id, session.user_id)?;
        Ok(())
    }

    /// Deletes several commitments; every id must pass the ownership
    /// check before anything is removed.
    pub fn delete_many(
        &self,
        session: &Session,
        ids: &[CommitmentId],
    ) -> Result<usize, CommitmentServiceError> {
        for &id in ids {
            let commitment = self
                .repo
                .get(id, session.user_id)?
                .ok_or(CommitmentServiceError::CommitmentNotFound(id))?;
            if commitment.owner != session.email {
                return Err(CommitmentServiceError::NotOwner(id));
            }
        }
        Ok(self.repo.delete_many(ids, session.user_id)?)
    }

    /// Imports commitment rows parsed from a CSV file.
    ///
    /// Rows are normalized independently, blank-title rows are dropped,
    /// and each surviving draft issues one create call in input order.
    /// `today` is the fallback for unparseable dates.
    ///
    /// # Errors
    /// - `ImportError::NoValidRows` when every row was filtered out.
    /// - `ImportError::Repo` when a create call fails; rows created
    ///   before the failure stay committed.
    pub fn import_commitments(
        &self,
        session: &Session,
        rows: &[RawRow],
        today: NaiveDate,
    ) -> Result<ImportSummary, ImportError> {
        let drafts = normalize_commitment_rows(rows, today);
        let skipped = rows.len() - drafts.len();

        if drafts.is_empty() {
            warn!(
                "event=import_batch module=service entity=commitment status=rejected \
                 rows={} error_code=no_valid_rows",
                rows.len()
            );
            return Err(ImportError::NoValidRows);
        }

        let mut imported = 0;
        for draft in drafts {
            let commitment = Commitment::new(
                session.user_id,
                session.email.clone(),
                draft.category,
                draft.flexibility,
                draft.title,
                draft.start_date,
                draft.end_date,
            );
            self.repo.create(&commitment)?;
            imported += 1;
        }

        info!(
            "event=import_batch module=service entity=commitment status=ok \
             imported={imported} skipped={skipped}"
        );
        Ok(ImportSummary { imported, skipped })
    }
}
