//! File-backed local mirror.
//!
//! One serialized blob under a fixed path, holding the current owner
//! pointer and the per-owner state for every owner seen on this machine.
//! Load and save never fail the caller: a missing or corrupt file loads
//! as the default, and a failed write is logged and swallowed - the store
//! of record is the remote log, not this file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use oculog_core::OwnerUsageState;

/// The persisted blob.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppData {
    /// Currently authenticated owner, if any.
    pub token: Option<String>,
    /// Per-owner mirrored state, keyed by token.
    pub token_data: BTreeMap<String, OwnerUsageState>,
    /// Kept for blob compatibility with older clients that minted their
    /// own tokens.
    pub generated_tokens: Vec<String>,
}

/// Loads and saves the [`AppData`] blob at a fixed path.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the blob, falling back to the default on a missing, unreadable,
    /// or corrupt file.
    #[must_use]
    pub fn load(&self) -> AppData {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return AppData::default(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to load local data");
                return AppData::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Corrupt local data, starting fresh");
                AppData::default()
            }
        }
    }

    /// Persist the blob. Failures are logged and swallowed.
    pub fn save(&self, data: &AppData) {
        let serialized = match serde_json::to_string_pretty(data) {
            Ok(serialized) => serialized,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize local data");
                return;
            }
        };

        if let Err(e) = std::fs::write(&self.path, serialized) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to save local data");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use oculog_core::WearType;

    fn store_in(dir: &tempfile::TempDir) -> LocalStore {
        LocalStore::new(dir.path().join("oculog-data.json"))
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);

        assert_eq!(store.load(), AppData::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);

        let mut state = OwnerUsageState::default();
        state.record(
            NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date"),
            WearType::Lenses,
        );

        let mut data = AppData::default();
        data.token = Some("EYEWEAR21".to_owned());
        data.token_data.insert("EYEWEAR21".to_owned(), state);

        store.save(&data);
        assert_eq!(store.load(), data);
    }

    #[test]
    fn corrupt_file_loads_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);

        std::fs::write(store.path(), "{not json").expect("write corrupt file");
        assert_eq!(store.load(), AppData::default());
    }

    #[test]
    fn blob_uses_camel_case_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);

        let mut data = AppData::default();
        data.token = Some("VISION48X".to_owned());
        data.token_data
            .insert("VISION48X".to_owned(), OwnerUsageState::default());
        store.save(&data);

        let raw = std::fs::read_to_string(store.path()).expect("read blob");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
        assert!(value.get("tokenData").is_some());
        assert!(value.get("generatedTokens").is_some());
        assert!(
            value["tokenData"]["VISION48X"].get("lensUsageDays").is_some()
        );
    }
}
