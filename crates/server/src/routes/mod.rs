//! HTTP route handlers for the usage-log store.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                                      - Service banner
//! GET    /health                                - Liveness check
//! GET    /health/ready                          - Readiness check (probes the database)
//!
//! # Usage logs
//! POST   /api/logs                              - Upsert one (token, date) record
//! GET    /api/logs/{token}                      - All records, date descending
//! GET    /api/logs/{token}/latest               - Most recent record or null
//! GET    /api/logs/{token}/monthly/{year}/{month} - Records in the month, date ascending
//! GET    /api/logs/{token}/summary              - Derived owner summary
//! DELETE /api/logs/{token}/{date}               - Delete one record
//! DELETE /api/logs                              - Wipe all records (administrative)
//! ```

pub mod logs;

use axum::{
    Json, Router,
    routing::{delete, get, post},
};
use serde_json::{Value, json};

use crate::state::AppState;

/// Build the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/api/logs", post(logs::save_log).delete(logs::clear_logs))
        .route("/api/logs/{token}", get(logs::list_logs))
        .route("/api/logs/{token}/latest", get(logs::latest_log))
        .route(
            "/api/logs/{token}/monthly/{year}/{month}",
            get(logs::monthly_logs),
        )
        .route("/api/logs/{token}/summary", get(logs::summary))
        .route("/api/logs/{token}/{date}", delete(logs::delete_log))
}

/// Service banner listing the available endpoints.
async fn root() -> Json<Value> {
    Json(json!({
        "status": "Server is running",
        "endpoints": {
            "logs": "/api/logs",
            "logsForToken": "/api/logs/{token}",
            "latestLogForToken": "/api/logs/{token}/latest",
            "monthlyLogs": "/api/logs/{token}/monthly/{year}/{month}",
            "summary": "/api/logs/{token}/summary"
        }
    }))
}
