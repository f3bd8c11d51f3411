//! User profile domain model.
//!
//! # Responsibility
//! - Represent a user's role, team, timezone and work-hours window.
//! - Provide the default profile shape used on first sign-in.
//!
//! # Invariants
//! - `auth_id` is stable and unique per user.
//! - `working_days` holds deduplicated weekday indices in 0..=6.
//! - `work_end` is never earlier than `work_start`.

use crate::model::commitment::UserId;
use crate::model::ValidationError;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a profile record.
pub type ProfileId = Uuid;

/// Per-user dashboard profile with availability settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Stable record id.
    pub id: ProfileId,
    /// Identity provider id this profile belongs to.
    pub auth_id: UserId,
    pub email: String,
    pub full_name: Option<String>,
    pub primary_role: String,
    pub team: String,
    pub timezone: String,
    pub work_start: NaiveTime,
    pub work_end: NaiveTime,
    /// Weekday indices 0 (Sunday) through 6 (Saturday).
    pub working_days: Vec<u8>,
}

impl UserProfile {
    /// Creates the default profile written on first sign-in:
    /// developer / engineering / pt, 09:00-17:00, Monday through Friday.
    pub fn with_defaults(
        auth_id: UserId,
        email: impl Into<String>,
        full_name: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            auth_id,
            email: email.into(),
            full_name,
            primary_role: "developer".to_string(),
            team: "engineering".to_string(),
            timezone: "pt".to_string(),
            work_start: NaiveTime::from_hms_opt(9, 0, 0).expect("valid default work start"),
            work_end: NaiveTime::from_hms_opt(17, 0, 0).expect("valid default work end"),
            working_days: vec![1, 2, 3, 4, 5],
        }
    }

    /// Checks record consistency before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                entity: "user_profile",
                field: "email",
            });
        }
        if self.work_end < self.work_start {
            return Err(ValidationError::TimeRangeInverted {
                entity: "user_profile",
            });
        }
        let mut seen = [false; 7];
        for &day in &self.working_days {
            if day > 6 {
                return Err(ValidationError::InvalidWeekday(day));
            }
            if seen[usize::from(day)] {
                return Err(ValidationError::DuplicateWeekday(day));
            }
            seen[usize::from(day)] = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::UserProfile;
    use crate::model::ValidationError;
    use chrono::NaiveTime;
    use uuid::Uuid;

    fn sample() -> UserProfile {
        UserProfile::with_defaults(Uuid::new_v4(), "ana@example.com", None)
    }

    #[test]
    fn default_profile_is_valid() {
        let profile = sample();
        assert_eq!(profile.validate(), Ok(()));
        assert_eq!(profile.primary_role, "developer");
        assert_eq!(profile.team, "engineering");
        assert_eq!(profile.timezone, "pt");
        assert_eq!(profile.working_days, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn inverted_work_window_is_rejected() {
        let mut profile = sample();
        profile.work_end = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        assert!(matches!(
            profile.validate(),
            Err(ValidationError::TimeRangeInverted { .. })
        ));
    }

    #[test]
    fn out_of_range_weekday_is_rejected() {
        let mut profile = sample();
        profile.working_days = vec![1, 9];
        assert_eq!(profile.validate(), Err(ValidationError::InvalidWeekday(9)));
    }

    #[test]
    fn duplicate_weekday_is_rejected() {
        let mut profile = sample();
        profile.working_days = vec![1, 2, 2];
        assert_eq!(
            profile.validate(),
            Err(ValidationError::DuplicateWeekday(2))
        );
    }
}
