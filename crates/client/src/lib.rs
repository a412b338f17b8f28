//! Oculog Client - local cache and sync layer.
//!
//! Maintains a file-backed mirror of one owner's usage log, updated
//! optimistically and pushed to the remote store, with a process-wide
//! change-notification channel telling presentation code to re-fetch and
//! re-render.
//!
//! # Architecture
//!
//! - [`ApiClient`] - reqwest client for the usage-log store's HTTP API
//! - [`LocalStore`] - the persisted blob (`{token, tokenData, generatedTokens}`)
//! - [`ChangeNotifier`] - payloadless broadcast signal
//! - [`UsageTracker`] - the facade tying the three together
//!
//! The canonical copy of an owner's state lives in the store; the mirror
//! here is a derived, possibly stale copy whose writes are forwarded, not
//! authoritative. Sync failures degrade to "operation silently did not
//! sync" with a log line - storage errors are never surfaced to the end
//! user as distinct categories.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod events;
pub mod store;
pub mod tracker;

pub use api::{ApiClient, ApiError};
pub use config::ClientConfig;
pub use events::{ChangeListener, ChangeNotifier};
pub use store::{AppData, LocalStore};
pub use tracker::UsageTracker;
