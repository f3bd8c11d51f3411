//! User profile use-case service.
//!
//! # Responsibility
//! - Fetch the caller's profile, creating the default one on first use.
//! - Apply profile updates.
//!
//! # Invariants
//! - At most one profile exists per `auth_id`.
//! - Auto-created profiles use the documented defaults
//!   (developer / engineering / pt, 09:00-17:00, Mon-Fri).

use crate::model::commitment::UserId;
use crate::model::user::UserProfile;
use crate::repo::user_repo::UserProfileRepository;
use crate::repo::RepoError;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for profile use-cases.
#[derive(Debug)]
pub enum ProfileServiceError {
    /// No profile exists for the given identity.
    ProfileNotFound(UserId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ProfileServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProfileNotFound(auth_id) => {
                write!(f, "profile not found for auth id: {auth_id}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProfileServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::ProfileNotFound(_) => None,
        }
    }
}

impl From<RepoError> for ProfileServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::ProfileNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Use-case service wrapper for profile operations.
pub struct ProfileService<R: UserProfileRepository> {
    repo: R,
}

impl<R: UserProfileRepository> ProfileService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Gets the profile for an identity, if one exists.
    pub fn get(&self, auth_id: UserId) -> Result<Option<UserProfile>, ProfileServiceError> {
        Ok(self.repo.get_by_auth_id(auth_id)?)
    }

    /// Gets the profile for an identity, creating the default profile
    /// when none exists yet.
    pub fn get_or_create(
        &self,
        auth_id: UserId,
        email: &str,
        full_name: Option<&str>,
    ) -> Result<UserProfile, ProfileServiceError> {
        if let Some(existing) = self.repo.get_by_auth_id(auth_id)? {
            return Ok(existing);
        }

        let profile =
            UserProfile::with_defaults(auth_id, email, full_name.map(str::to_string));
        self.repo.create(&profile)?;
        info!("event=profile_created module=service status=ok auth_id={auth_id}");
        Ok(profile)
    }

    /// Updates the profile identified by its `auth_id`.
    pub fn update(&self, profile: &UserProfile) -> Result<(), ProfileServiceError> {
        self.repo.update(profile)?;
        Ok(())
    }
}
