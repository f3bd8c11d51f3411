//! Commitment domain model.
//!
//! # Responsibility
//! - Represent a user's blocked-out calendar span (holiday, meeting, break).
//! - Carry the advisory ownership fields checked by the service layer.
//!
//! # Invariants
//! - `id` is stable and never reused for another commitment.
//! - `end_date` is never earlier than `start_date`.
//! - `owner` holds the owning user's email; `user_id` their stable id.

use crate::model::ValidationError;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a commitment record.
pub type CommitmentId = Uuid;

/// Stable identifier for the owning user.
pub type UserId = Uuid;

/// Commitment category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitmentCategory {
    Holidays,
    Meetings,
    Breaks,
}

impl CommitmentCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Holidays => "holidays",
            Self::Meetings => "meetings",
            Self::Breaks => "breaks",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "holidays" => Some(Self::Holidays),
            "meetings" => Some(Self::Meetings),
            "breaks" => Some(Self::Breaks),
            _ => None,
        }
    }
}

/// Whether a commitment's dates may be treated as movable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flexibility {
    Firm,
    Flexible,
}

impl Flexibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Firm => "firm",
            Self::Flexible => "flexible",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "firm" => Some(Self::Firm),
            "flexible" => Some(Self::Flexible),
            _ => None,
        }
    }
}

/// A dated span on a user's calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment {
    /// Stable record id.
    pub id: CommitmentId,
    /// Owning user's stable id; all queries are scoped to it.
    pub user_id: UserId,
    /// Owning user's email, used for the advisory ownership check.
    pub owner: String,
    /// Serialized as `type` to match the external schema naming.
    #[serde(rename = "type")]
    pub category: CommitmentCategory,
    pub flexibility: Flexibility,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Optional time-of-day bound for intra-day commitments.
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

impl Commitment {
    /// Creates a commitment with a generated stable id and no time bounds.
    pub fn new(
        user_id: UserId,
        owner: impl Into<String>,
        category: CommitmentCategory,
        flexibility: Flexibility,
        title: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            owner: owner.into(),
            category,
            flexibility,
            title: title.into(),
            start_date,
            end_date,
            start_time: None,
            end_time: None,
        }
    }

    /// Checks record consistency before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.is_empty() {
            return Err(ValidationError::EmptyField {
                entity: "commitment",
                field: "title",
            });
        }
        if self.end_date < self.start_date {
            return Err(ValidationError::DateRangeInverted {
                entity: "commitment",
            });
        }
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            // Time bounds only order within a single-day span; multi-day
            // commitments may legitimately end at an earlier clock time.
            if self.start_date == self.end_date && end < start {
                return Err(ValidationError::TimeRangeInverted {
                    entity: "commitment",
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Commitment, CommitmentCategory, Flexibility};
    use crate::model::ValidationError;
    use chrono::{NaiveDate, NaiveTime};
    use uuid::Uuid;

    fn date(text: &str) -> NaiveDate {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
    }

    fn sample() -> Commitment {
        Commitment::new(
            Uuid::new_v4(),
            "ana@example.com",
            CommitmentCategory::Holidays,
            Flexibility::Firm,
            "Offsite",
            date("2024-03-01"),
            date("2024-03-03"),
        )
    }

    #[test]
    fn valid_commitment_passes_validation() {
        assert_eq!(sample().validate(), Ok(()));
    }

    #[test]
    fn empty_title_is_rejected() {
        let mut commitment = sample();
        commitment.title.clear();
        assert!(matches!(
            commitment.validate(),
            Err(ValidationError::EmptyField { field: "title", .. })
        ));
    }

    #[test]
    fn inverted_date_range_is_rejected() {
        let mut commitment = sample();
        commitment.end_date = date("2024-02-01");
        assert!(matches!(
            commitment.validate(),
            Err(ValidationError::DateRangeInverted { .. })
        ));
    }

    #[test]
    fn inverted_times_on_single_day_are_rejected() {
        let mut commitment = sample();
        commitment.end_date = commitment.start_date;
        commitment.start_time = NaiveTime::from_hms_opt(14, 0, 0);
        commitment.end_time = NaiveTime::from_hms_opt(9, 0, 0);
        assert!(matches!(
            commitment.validate(),
            Err(ValidationError::TimeRangeInverted { .. })
        ));
    }

    #[test]
    fn category_serializes_as_type() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["type"], "holidays");
        assert_eq!(json["flexibility"], "firm");
    }
}
