//! Project domain model.
//!
//! # Responsibility
//! - Represent a named body of work that tasks can reference.
//! - Expose the free-text required-members list as parsed emails.
//!
//! # Invariants
//! - `name` is never empty.
//! - `end_date` is never earlier than `start_date` when both are set.

use crate::model::commitment::UserId;
use crate::model::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a project record.
pub type ProjectId = Uuid;

/// Categorical project priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectPriority {
    High,
    Medium,
    Low,
}

impl ProjectPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// A named body of work owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Stable record id.
    pub id: ProjectId,
    pub name: String,
    pub description: Option<String>,
    /// Owning user's stable id.
    pub owner_id: UserId,
    /// Owning user's email.
    pub owner_email: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Free-text comma-separated member emails, kept verbatim as entered.
    pub required_members: Option<String>,
    pub priority: ProjectPriority,
}

impl Project {
    /// Creates a project with a generated stable id and medium priority.
    pub fn new(name: impl Into<String>, owner_id: UserId, owner_email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            owner_id,
            owner_email: owner_email.into(),
            start_date: None,
            end_date: None,
            required_members: None,
            priority: ProjectPriority::Medium,
        }
    }

    /// Checks record consistency before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                entity: "project",
                field: "name",
            });
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(ValidationError::DateRangeInverted { entity: "project" });
            }
        }
        Ok(())
    }

    /// Parses `required_members` into individual trimmed emails.
    ///
    /// Blank segments are dropped; the raw field stays untouched.
    pub fn required_member_emails(&self) -> Vec<&str> {
        self.required_members
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .collect()
    }
}
