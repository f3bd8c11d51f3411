//! User profile repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide profile persistence keyed by the identity provider id.
//! - Own the `working_days` comma-list encoding.
//!
//! # Invariants
//! - One profile row per `auth_id`.
//! - Write paths call `UserProfile::validate()` before SQL mutations.

use crate::model::commitment::UserId;
use crate::model::user::{ProfileId, UserProfile};
use crate::repo::{parse_sql_time, parse_uuid, time_to_sql, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const PROFILE_SELECT_SQL: &str = "SELECT
    id,
    auth_id,
    email,
    full_name,
    primary_role,
    team,
    timezone,
    work_start,
    work_end,
    working_days
FROM users";

/// Repository interface for user profile operations.
pub trait UserProfileRepository {
    fn create(&self, profile: &UserProfile) -> RepoResult<ProfileId>;
    fn get_by_auth_id(&self, auth_id: UserId) -> RepoResult<Option<UserProfile>>;
    fn update(&self, profile: &UserProfile) -> RepoResult<()>;
}

/// SQLite-backed user profile repository.
pub struct SqliteUserProfileRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserProfileRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl UserProfileRepository for SqliteUserProfileRepository<'_> {
    fn create(&self, profile: &UserProfile) -> RepoResult<ProfileId> {
        profile.validate()?;

        self.conn.execute(
            "INSERT INTO users (
                id,
                auth_id,
                email,
                full_name,
                primary_role,
                team,
                timezone,
                work_start,
                work_end,
                working_days
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            params![
                profile.id.to_string(),
                profile.auth_id.to_string(),
                profile.email.as_str(),
                profile.full_name.as_deref(),
                profile.primary_role.as_str(),
                profile.team.as_str(),
                profile.timezone.as_str(),
                time_to_sql(profile.work_start),
                time_to_sql(profile.work_end),
                join_working_days(&profile.working_days),
            ],
        )?;

        Ok(profile.id)
    }

    fn get_by_auth_id(&self, auth_id: UserId) -> RepoResult<Option<UserProfile>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROFILE_SELECT_SQL} WHERE auth_id = ?1;"))?;

        let mut rows = stmt.query([auth_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_profile_row(row)?));
        }

        Ok(None)
    }

    fn update(&self, profile: &UserProfile) -> RepoResult<()> {
        profile.validate()?;

        let changed = self.conn.execute(
            "UPDATE users
             SET
                email = ?1,
                full_name = ?2,
                primary_role = ?3,
                team = ?4,
                timezone = ?5,
                work_start = ?6,
                work_end = ?7,
                working_days = ?8,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE auth_id = ?9;",
            params![
                profile.email.as_str(),
                profile.full_name.as_deref(),
                profile.primary_role.as_str(),
                profile.team.as_str(),
                profile.timezone.as_str(),
                time_to_sql(profile.work_start),
                time_to_sql(profile.work_end),
                join_working_days(&profile.working_days),
                profile.auth_id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(profile.auth_id));
        }

        Ok(())
    }
}

fn parse_profile_row(row: &Row<'_>) -> RepoResult<UserProfile> {
    let id_text: String = row.get("id")?;
    let auth_id_text: String = row.get("auth_id")?;
    let work_start_text: String = row.get("work_start")?;
    let work_end_text: String = row.get("work_end")?;
    let working_days_text: String = row.get("working_days")?;

    let profile = UserProfile {
        id: parse_uuid(&id_text, "users.id")?,
        auth_id: parse_uuid(&auth_id_text, "users.auth_id")?,
        email: row.get("email")?,
        full_name: row.get("full_name")?,
        primary_role: row.get("primary_role")?,
        team: row.get("team")?,
        timezone: row.get("timezone")?,
        work_start: parse_sql_time(&work_start_text, "users.work_start")?,
        work_end: parse_sql_time(&work_end_text, "users.work_end")?,
        working_days: split_working_days(&working_days_text)?,
    };
    profile.validate()?;
    Ok(profile)
}

fn join_working_days(days: &[u8]) -> String {
    days.iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn split_working_days(value: &str) -> RepoResult<Vec<u8>> {
    if value.trim().is_empty() {
        return Ok(Vec::new());
    }
    value
        .split(',')
        .map(|part| {
            part.trim().parse::<u8>().map_err(|_| {
                RepoError::InvalidData(format!(
                    "invalid weekday `{part}` in users.working_days"
                ))
            })
        })
        .collect()
}
