//! Project use-case service.
//!
//! # Responsibility
//! - Provide project CRUD entry points.
//! - Build the `(id, name)` index consumed by task imports.
//!
//! # Invariants
//! - Projects are visible to every caller; creation records the session
//!   user as owner.

use crate::import::normalize::ProjectRef;
use crate::model::project::{Project, ProjectId, ProjectPriority};
use crate::repo::project_repo::ProjectRepository;
use crate::repo::RepoError;
use crate::service::Session;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for project use-cases.
#[derive(Debug)]
pub enum ProjectServiceError {
    /// Target project does not exist.
    ProjectNotFound(ProjectId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ProjectServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProjectServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::ProjectNotFound(_) => None,
        }
    }
}

impl From<RepoError> for ProjectServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::ProjectNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Request model for creating one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub required_members: Option<String>,
    pub priority: ProjectPriority,
}

impl NewProject {
    /// A named project with every optional field unset and medium
    /// priority.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            start_date: None,
            end_date: None,
            required_members: None,
            priority: ProjectPriority::Medium,
        }
    }
}

/// Use-case service wrapper for project operations.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all projects, newest first.
    pub fn list(&self) -> Result<Vec<Project>, ProjectServiceError> {
        Ok(self.repo.list()?)
    }

    /// Gets one project by id.
    pub fn get(&self, id: ProjectId) -> Result<Option<Project>, ProjectServiceError> {
        Ok(self.repo.get(id)?)
    }

    /// Creates one project owned by the caller.
    pub fn create(
        &self,
        session: &Session,
        new: NewProject,
    ) -> Result<Project, ProjectServiceError> {
        let mut project = Project::new(new.name, session.user_id, session.email.clone());
        project.description = new.description;
        project.start_date = new.start_date;
        project.end_date = new.end_date;
        project.required_members = new.required_members;
        project.priority = new.priority;

        self.repo.create(&project)?;
        Ok(project)
    }

    /// Updates one project by id.
    pub fn update(&self, project: &Project) -> Result<(), ProjectServiceError> {
        self.repo.update(project)?;
        Ok(())
    }

    /// Deletes one project by id.
    pub fn delete(&self, id: ProjectId) -> Result<(), ProjectServiceError> {
        self.repo.delete(id)?;
        Ok(())
    }

    /// Returns the `(id, name)` index used for CSV project resolution.
    pub fn name_index(&self) -> Result<Vec<ProjectRef>, ProjectServiceError> {
        let projects = self.repo.list()?;
        Ok(projects
            .into_iter()
            .map(|project| ProjectRef {
                id: project.id,
                name: project.name,
            })
            .collect())
    }
}
