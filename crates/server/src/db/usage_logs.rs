//! Usage-log repository for database operations.
//!
//! Queries use the runtime API with [`sqlx::FromRow`] row types converted
//! through `TryFrom`, so the crate builds without a live database.

use chrono::NaiveDate;
use sqlx::PgPool;

use oculog_core::{UsageLog, UsageSummary, summarize};

use super::RepositoryError;

const COLUMNS: &str = "token, date, wear_type, lens_usage_days, last_lens_replacement_date";

/// Internal row type for `PostgreSQL` usage-log queries.
#[derive(Debug, sqlx::FromRow)]
struct UsageLogRow {
    token: String,
    date: NaiveDate,
    wear_type: String,
    lens_usage_days: i64,
    last_lens_replacement_date: Option<NaiveDate>,
}

impl TryFrom<UsageLogRow> for UsageLog {
    type Error = RepositoryError;

    fn try_from(row: UsageLogRow) -> Result<Self, Self::Error> {
        let wear_type = row.wear_type.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid wear type in database: {e}"))
        })?;

        let lens_usage_days = u32::try_from(row.lens_usage_days).map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "lens counter out of range: {}",
                row.lens_usage_days
            ))
        })?;

        Ok(Self {
            token: row.token,
            date: row.date,
            wear_type,
            lens_usage_days,
            last_lens_replacement_date: row.last_lens_replacement_date,
        })
    }
}

/// Repository for usage-log database operations, scoped by owner token.
///
/// Store-level failures surface as [`RepositoryError::Database`]; no retry
/// is attempted here - the caller decides whether to retry.
pub struct UsageLogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UsageLogRepository<'a> {
    /// Create a new usage-log repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert or overwrite the unique (token, date) record, returning the
    /// stored row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert(&self, log: &UsageLog) -> Result<UsageLog, RepositoryError> {
        let sql = format!(
            "INSERT INTO usage_logs (token, date, wear_type, lens_usage_days, last_lens_replacement_date)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (token, date) DO UPDATE
             SET wear_type = EXCLUDED.wear_type,
                 lens_usage_days = EXCLUDED.lens_usage_days,
                 last_lens_replacement_date = EXCLUDED.last_lens_replacement_date,
                 updated_at = NOW()
             RETURNING {COLUMNS}"
        );

        let row = sqlx::query_as::<_, UsageLogRow>(&sql)
            .bind(&log.token)
            .bind(log.date)
            .bind(log.wear_type.to_string())
            .bind(i64::from(log.lens_usage_days))
            .bind(log.last_lens_replacement_date)
            .fetch_one(self.pool)
            .await?;

        row.try_into()
    }

    /// All rows for an owner, newest date first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn list_all(&self, token: &str) -> Result<Vec<UsageLog>, RepositoryError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM usage_logs WHERE token = $1 ORDER BY date DESC"
        );

        let rows = sqlx::query_as::<_, UsageLogRow>(&sql)
            .bind(token)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// The single most recent row for an owner, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn latest(&self, token: &str) -> Result<Option<UsageLog>, RepositoryError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM usage_logs WHERE token = $1 ORDER BY date DESC LIMIT 1"
        );

        let row = sqlx::query_as::<_, UsageLogRow>(&sql)
            .bind(token)
            .fetch_optional(self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Rows within the half-open range `[start, end)`, oldest date first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_range(
        &self,
        token: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<UsageLog>, RepositoryError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM usage_logs
             WHERE token = $1 AND date >= $2 AND date < $3
             ORDER BY date ASC"
        );

        let rows = sqlx::query_as::<_, UsageLogRow>(&sql)
            .bind(token)
            .bind(start)
            .bind(end)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Derive the owner's summary by scanning all of their rows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn summary(&self, token: &str) -> Result<UsageSummary, RepositoryError> {
        let logs = self.list_all(token).await?;
        Ok(summarize(&logs))
    }

    /// Delete the (token, date) record, returning the deleted row and the
    /// owner's recomputed latest row.
    ///
    /// If the deleted row was a lens day, every remaining row for the
    /// owner with a later date has its counter decremented, floored at
    /// zero - the best-effort correction for the forward-carried counter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn delete(
        &self,
        token: &str,
        date: NaiveDate,
    ) -> Result<Option<(UsageLog, Option<UsageLog>)>, RepositoryError> {
        let sql = format!(
            "DELETE FROM usage_logs WHERE token = $1 AND date = $2 RETURNING {COLUMNS}"
        );

        let deleted: Option<UsageLog> = sqlx::query_as::<_, UsageLogRow>(&sql)
            .bind(token)
            .bind(date)
            .fetch_optional(self.pool)
            .await?
            .map(TryInto::try_into)
            .transpose()?;

        let Some(deleted) = deleted else {
            return Ok(None);
        };

        if deleted.wear_type == oculog_core::WearType::Lenses {
            sqlx::query(
                "UPDATE usage_logs
                 SET lens_usage_days = GREATEST(lens_usage_days - 1, 0),
                     updated_at = NOW()
                 WHERE token = $1 AND date > $2",
            )
            .bind(token)
            .bind(date)
            .execute(self.pool)
            .await?;
        }

        let latest = self.latest(token).await?;
        Ok(Some((deleted, latest)))
    }

    /// Wipe every row for every owner, returning the count removed.
    ///
    /// Administrative operation, not owner-scoped.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn clear_all(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM usage_logs")
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
