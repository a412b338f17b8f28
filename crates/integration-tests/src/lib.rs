//! Integration tests for Oculog.
//!
//! # Running Tests
//!
//! The tests in `tests/` exercise a running `oculog-server` end to end and
//! are `#[ignore]`d by default. To run them:
//!
//! ```bash
//! # Start PostgreSQL and run migrations
//! cargo run -p oculog-cli -- migrate
//!
//! # Start the server
//! cargo run -p oculog-server
//!
//! # Run the ignored tests, single-threaded - some of them wipe the store
//! cargo test -p oculog-integration-tests -- --ignored --test-threads=1
//! ```
//!
//! `OCULOG_API_URL` overrides the default `http://localhost:3000/api`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use serde_json::Value;

/// Base URL for the usage-log store API (configurable via environment).
#[must_use]
pub fn api_base_url() -> String {
    std::env::var("OCULOG_API_URL")
        .unwrap_or_else(|_| "http://localhost:3000/api".to_owned())
}

/// Upsert one log row through the HTTP surface.
///
/// # Panics
///
/// Panics if the request cannot be sent.
pub async fn post_log(client: &reqwest::Client, body: &Value) -> reqwest::Response {
    client
        .post(format!("{}/logs", api_base_url()))
        .json(body)
        .send()
        .await
        .expect("Failed to POST log")
}

/// Best-effort cleanup of one (token, date) row; 404 is fine.
pub async fn delete_log(client: &reqwest::Client, token: &str, date: &str) {
    let _ = client
        .delete(format!("{}/logs/{token}/{date}", api_base_url()))
        .send()
        .await;
}
