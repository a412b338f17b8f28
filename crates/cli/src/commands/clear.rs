//! Administrative bulk-clear command.
//!
//! Wipes every usage log for every owner by calling the store's
//! `DELETE /api/logs` endpoint. Not owner-scoped; guarded by a
//! confirmation flag.
//!
//! # Environment Variables
//!
//! - `OCULOG_API_URL` - Base URL of the usage-log store API
//!   (default: <http://localhost:3000/api>)

use thiserror::Error;

use oculog_client::{ApiClient, ApiError, ClientConfig};

/// Errors that can occur while clearing the store.
#[derive(Debug, Error)]
pub enum ClearError {
    #[error("refusing to clear the store without --yes")]
    NotConfirmed,
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

/// Wipe the entire usage-log store.
///
/// # Errors
///
/// Returns an error without the confirmation flag, or if the store
/// rejects the request.
pub async fn run(yes: bool) -> Result<(), ClearError> {
    if !yes {
        return Err(ClearError::NotConfirmed);
    }

    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    let api = ApiClient::new(config.api_base_url);

    let cleared = api.clear_logs().await?;
    tracing::info!(cleared, "All usage logs cleared");
    Ok(())
}
