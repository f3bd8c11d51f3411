//! Commitment repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over `commitments` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - All queries are scoped to the owning `user_id`; a foreign id reads
//!   as not-found.
//! - Write paths call `Commitment::validate()` before SQL mutations.
//! - List results are ordered by `start_date ASC, id ASC`.

use crate::model::commitment::{
    Commitment, CommitmentCategory, CommitmentId, Flexibility, UserId,
};
use crate::repo::{
    date_to_sql, parse_sql_date, parse_sql_time, parse_uuid, time_to_sql, RepoError, RepoResult,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const COMMITMENT_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    owner,
    type,
    flexibility,
    title,
    start_date,
    end_date,
    start_time,
    end_time
FROM commitments";

/// Query options for listing commitments.
#[derive(Debug, Clone)]
pub struct CommitmentListQuery {
    pub user_id: UserId,
    pub category: Option<CommitmentCategory>,
    pub limit: Option<u32>,
    pub offset: u32,
}

impl CommitmentListQuery {
    /// Lists everything owned by one user, unfiltered and unpaginated.
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id,
            category: None,
            limit: None,
            offset: 0,
        }
    }
}

/// Repository interface for commitment CRUD operations.
pub trait CommitmentRepository {
    fn create(&self, commitment: &Commitment) -> RepoResult<CommitmentId>;
    fn update(&self, commitment: &Commitment) -> RepoResult<()>;
    fn get(&self, id: CommitmentId, user_id: UserId) -> RepoResult<Option<Commitment>>;
    fn list(&self, query: &CommitmentListQuery) -> RepoResult<Vec<Commitment>>;
    fn delete(&self, id: CommitmentId, user_id: UserId) -> RepoResult<()>;
    /// Deletes every listed id owned by `user_id`; returns the number of
    /// rows removed. Foreign ids are silently skipped by the scope filter.
    fn delete_many(&self, ids: &[CommitmentId], user_id: UserId) -> RepoResult<usize>;
}

/// SQLite-backed commitment repository.
pub struct SqliteCommitmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCommitmentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CommitmentRepository for SqliteCommitmentRepository<'_> {
    fn create(&self, commitment: &Commitment) -> RepoResult<CommitmentId> {
        commitment.validate()?;

        self.conn.execute(
            "INSERT INTO commitments (
                id,
                user_id,
                owner,
                type,
                flexibility,
                title,
                start_date,
                end_date,
                start_time,
                end_time
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            params![
                commitment.id.to_string(),
                commitment.user_id.to_string(),
                commitment.owner.as_str(),
                commitment.category.as_str(),
                commitment.flexibility.as_str(),
                commitment.title.as_str(),
                date_to_sql(commitment.start_date),
                date_to_sql(commitment.end_date),
                commitment.start_time.map(time_to_sql),
                commitment.end_time.map(time_to_sql),
            ],
        )?;

        Ok(commitment.id)
    }

    fn update(&self, commitment: &Commitment) -> RepoResult<()> {
        commitment.validate()?;

        let changed = self.conn.execute(
            "UPDATE commitments
             SET
                type = ?1,
                flexibility = ?2,
                title = ?3,
                start_date = ?4,
                end_date = ?5,
                start_time = ?6,
                end_time = ?7,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?8
               AND user_id = ?9;",
            params![
                commitment.category.as_str(),
                commitment.flexibility.as_str(),
                commitment.title.as_str(),
                date_to_sql(commitment.start_date),
                date_to_sql(commitment.end_date),
                commitment.start_time.map(time_to_sql),
                commitment.end_time.map(time_to_sql),
                commitment.id.to_string(),
                commitment.user_id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(commitment.id));
        }

        Ok(())
    }

    fn get(&self, id: CommitmentId, user_id: UserId) -> RepoResult<Option<Commitment>> {
        let mut stmt = self.conn.prepare(&format!(
            "{COMMITMENT_SELECT_SQL}
             WHERE id = ?1
               AND user_id = ?2;"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), user_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_commitment_row(row)?));
        }

        Ok(None)
    }

    fn list(&self, query: &CommitmentListQuery) -> RepoResult<Vec<Commitment>> {
        let mut sql = format!("{COMMITMENT_SELECT_SQL} WHERE user_id = ?");
        let mut bind_values: Vec<Value> = vec![Value::Text(query.user_id.to_string())];

        if let Some(category) = query.category {
            sql.push_str(" AND type = ?");
            bind_values.push(Value::Text(category.as_str().to_string()));
        }

        sql.push_str(" ORDER BY start_date ASC, id ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut commitments = Vec::new();

        while let Some(row) = rows.next()? {
            commitments.push(parse_commitment_row(row)?);
        }

        Ok(commitments)
    }

    fn delete(&self, id: CommitmentId, user_id: UserId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM commitments WHERE id = ?1 AND user_id = ?2;",
            params![id.to_string(), user_id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_many(&self, ids: &[CommitmentId], user_id: UserId) -> RepoResult<usize> {
        if ids.is_empty() {
            return Ok(0);
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql =
            format!("DELETE FROM commitments WHERE user_id = ? AND id IN ({placeholders});");
        let mut bind_values: Vec<Value> = Vec::with_capacity(ids.len() + 1);
        bind_values.push(Value::Text(user_id.to_string()));
        bind_values.extend(ids.iter().map(|id| Value::Text(id.to_string())));

        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        Ok(changed)
    }
}

fn parse_commitment_row(row: &Row<'_>) -> RepoResult<Commitment> {
    let id_text: String = row.get("id")?;
    let user_id_text: String = row.get("user_id")?;

    let category_text: String = row.get("type")?;
    let category = CommitmentCategory::parse(&category_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid category `{category_text}` in commitments.type"
        ))
    })?;

    let flexibility_text: String = row.get("flexibility")?;
    let flexibility = Flexibility::parse(&flexibility_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid flexibility `{flexibility_text}` in commitments.flexibility"
        ))
    })?;

    let start_date_text: String = row.get("start_date")?;
    let end_date_text: String = row.get("end_date")?;

    let start_time = row
        .get::<_, Option<String>>("start_time")?
        .map(|value| parse_sql_time(&value, "commitments.start_time"))
        .transpose()?;
    let end_time = row
        .get::<_, Option<String>>("end_time")?
        .map(|value| parse_sql_time(&value, "commitments.end_time"))
        .transpose()?;

    let commitment = Commitment {
        id: parse_uuid(&id_text, "commitments.id")?,
        user_id: parse_uuid(&user_id_text, "commitments.user_id")?,
        owner: row.get("owner")?,
        category,
        flexibility,
        title: row.get("title")?,
        start_date: parse_sql_date(&start_date_text, "commitments.start_date")?,
        end_date: parse_sql_date(&end_date_text, "commitments.end_date")?,
        start_time,
        end_time,
    };
    commitment.validate()?;
    Ok(commitment)
}
