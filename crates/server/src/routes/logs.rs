//! Usage-log route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use oculog_core::{UsageLog, UsageSummary, WearType, month_bounds};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Body of `POST /api/logs`.
///
/// Fields are optional at the serde layer so that missing ones surface as
/// the store's own validation error rather than a deserialization
/// rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveLogPayload {
    pub token: Option<String>,
    pub date: Option<String>,
    pub wear_type: Option<String>,
    pub lens_usage_days: Option<u32>,
    pub last_lens_replacement_date: Option<NaiveDate>,
}

impl SaveLogPayload {
    /// Validate the payload into a domain record.
    fn into_log(self) -> Result<UsageLog> {
        let (Some(token), Some(date), Some(wear_type)) =
            (self.token, self.date, self.wear_type)
        else {
            return Err(AppError::Validation(
                "Missing required fields: token, date, and wearType are required".to_owned(),
            ));
        };

        if token.is_empty() || date.is_empty() || wear_type.is_empty() {
            return Err(AppError::Validation(
                "Missing required fields: token, date, and wearType are required".to_owned(),
            ));
        }

        let wear_type = wear_type.parse::<WearType>().map_err(|_| {
            AppError::Validation(
                "wearType must be either \"glasses\" or \"lenses\"".to_owned(),
            )
        })?;

        let date = parse_date(&date)?;

        Ok(UsageLog {
            token,
            date,
            wear_type,
            lens_usage_days: self.lens_usage_days.unwrap_or(0),
            last_lens_replacement_date: self.last_lens_replacement_date,
        })
    }
}

/// Response of `DELETE /api/logs/{token}/{date}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteLogResponse {
    pub deleted: UsageLog,
    pub latest_log: Option<UsageLog>,
}

/// Response of `DELETE /api/logs`.
#[derive(Debug, Serialize)]
pub struct ClearLogsResponse {
    pub cleared: u64,
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    raw.parse::<NaiveDate>().map_err(|_| {
        AppError::Validation(format!(
            "date must be a calendar date in YYYY-MM-DD format, got {raw:?}"
        ))
    })
}

/// Upsert the unique (token, date) record.
///
/// Validation failures are rejected with 400 before anything is persisted.
#[instrument(skip(state, payload))]
pub async fn save_log(
    State(state): State<AppState>,
    Json(payload): Json<SaveLogPayload>,
) -> Result<Json<UsageLog>> {
    let log = payload.into_log()?;
    let stored = state.logs().upsert(&log).await?;
    Ok(Json(stored))
}

/// All records for an owner, newest date first.
#[instrument(skip(state))]
pub async fn list_logs(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<Vec<UsageLog>>> {
    let logs = state.logs().list_all(&token).await?;
    Ok(Json(logs))
}

/// The single most recent record for an owner, or JSON `null`.
#[instrument(skip(state))]
pub async fn latest_log(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<Option<UsageLog>>> {
    let log = state.logs().latest(&token).await?;
    Ok(Json(log))
}

/// Records within one calendar month, oldest date first.
#[instrument(skip(state))]
pub async fn monthly_logs(
    State(state): State<AppState>,
    Path((token, year, month)): Path<(String, i32, u32)>,
) -> Result<Json<Vec<UsageLog>>> {
    let (start, end) =
        month_bounds(year, month).map_err(|e| AppError::Validation(e.to_string()))?;
    let logs = state.logs().list_range(&token, start, end).await?;
    Ok(Json(logs))
}

/// Derived summary over all of an owner's records.
#[instrument(skip(state))]
pub async fn summary(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<UsageSummary>> {
    let summary = state.logs().summary(&token).await?;
    Ok(Json(summary))
}

/// Delete one (token, date) record.
///
/// Returns the deleted record plus the owner's recomputed latest record;
/// 404 if no record exists for the date.
#[instrument(skip(state))]
pub async fn delete_log(
    State(state): State<AppState>,
    Path((token, date)): Path<(String, String)>,
) -> Result<Json<DeleteLogResponse>> {
    let date = parse_date(&date)?;

    let Some((deleted, latest_log)) = state.logs().delete(&token, date).await? else {
        return Err(AppError::NotFound("Log not found".to_owned()));
    };

    Ok(Json(DeleteLogResponse {
        deleted,
        latest_log,
    }))
}

/// Wipe every record for every owner.
#[instrument(skip(state))]
pub async fn clear_logs(State(state): State<AppState>) -> Result<Json<ClearLogsResponse>> {
    let cleared = state.logs().clear_all().await?;
    tracing::info!(cleared, "All usage logs cleared");
    Ok(Json(ClearLogsResponse { cleared }))
}
