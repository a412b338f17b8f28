//! The client cache facade.
//!
//! [`UsageTracker`] holds one owner's mirrored usage state, applies the
//! counter invariants locally first, then forwards the newest record to
//! the remote store. Every mutation persists the mirror and emits a
//! change notification whether or not the push succeeded - sync failures
//! degrade to a log line, never to a user-facing error.

use chrono::{Local, NaiveDate};

use oculog_core::{MonthStats, OwnerUsageState, Token, UsageLog, WearType};

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::events::{ChangeListener, ChangeNotifier};
use crate::store::{AppData, LocalStore};

/// Local cache and sync facade for one machine's usage data.
pub struct UsageTracker {
    api: ApiClient,
    store: LocalStore,
    notifier: ChangeNotifier,
}

impl UsageTracker {
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            api: ApiClient::new(config.api_base_url.clone()),
            store: LocalStore::new(config.data_path.clone()),
            notifier: ChangeNotifier::new(),
        }
    }

    /// Register a listener for change notifications.
    #[must_use]
    pub fn subscribe(&self) -> ChangeListener {
        self.notifier.subscribe()
    }

    /// Whether an owner is currently authenticated on this machine.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.store.load().token.is_some()
    }

    /// Today's calendar date in the local timezone.
    #[must_use]
    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Authenticate with an owner token.
    ///
    /// Fails fast on a token outside the allow-list. Otherwise the owner's
    /// full log list is fetched and the mirror rebuilt from it - entries
    /// from every row, counter fields from the newest. A fetch failure
    /// fails the authentication; the client never authenticates against
    /// stale local data.
    pub async fn authenticate(&self, token: &str) -> bool {
        let Ok(token) = Token::parse(token) else {
            tracing::debug!(token, "Invalid token attempted");
            return false;
        };

        let logs = match self.api.get_logs(token.as_str()).await {
            Ok(logs) => logs,
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch logs during authentication");
                return false;
            }
        };

        let mut data = self.store.load();
        data.token = Some(token.as_str().to_owned());
        data.token_data
            .insert(token.into_inner(), OwnerUsageState::from_logs(&logs));

        self.save(&data).await;
        true
    }

    /// Clear the current-owner pointer. The owner's mirrored state is
    /// kept for the next authentication.
    pub async fn logout(&self) {
        let mut data = self.store.load();
        data.token = None;
        self.save(&data).await;
    }

    /// Record what was worn on a date, replacing any prior entry.
    ///
    /// No-op when no owner is authenticated.
    pub async fn add_entry(&self, date: NaiveDate, wear_type: WearType) {
        let mut data = self.store.load();
        let Some(token) = data.token.clone() else {
            return;
        };

        data.token_data.entry(token).or_default().record(date, wear_type);
        self.save(&data).await;
    }

    /// Remove the entry for a date.
    ///
    /// Updates and persists the mirror only: no delete is sent to the
    /// store. The save path re-pushes the newest remaining entry with the
    /// corrected counter, so the counter reaches the store but the removed
    /// row survives remotely until the next full re-fetch.
    pub async fn remove_entry(&self, date: NaiveDate) {
        let mut data = self.store.load();
        let Some(token) = data.token.clone() else {
            return;
        };
        let Some(state) = data.token_data.get_mut(&token) else {
            return;
        };

        state.remove(date);
        self.save(&data).await;
    }

    /// Manually clear the lens-cycle counter, stamping today as the
    /// replacement date.
    pub async fn reset_lens_counter(&self) {
        let mut data = self.store.load();
        let Some(token) = data.token.clone() else {
            return;
        };
        let Some(state) = data.token_data.get_mut(&token) else {
            return;
        };

        state.reset_counter(Self::today());
        self.save(&data).await;
    }

    /// What the current owner recorded for a date, if anything.
    #[must_use]
    pub fn entry_for_date(&self, date: NaiveDate) -> Option<WearType> {
        self.current_state().entry_for(date)
    }

    /// Monthly glasses/lens day counts for the current owner.
    #[must_use]
    pub fn month_stats(&self, year: i32, month: u32) -> MonthStats {
        self.current_state().month_stats(year, month)
    }

    /// Wear days left in the current owner's lens cycle.
    #[must_use]
    pub fn days_remaining(&self) -> u32 {
        self.current_state().days_remaining()
    }

    /// Whether the current owner's lens replacement is due.
    #[must_use]
    pub fn is_replacement_due(&self) -> bool {
        self.current_state().is_replacement_due()
    }

    /// The current owner's mirrored state, or the default when nobody is
    /// authenticated.
    #[must_use]
    pub fn current_state(&self) -> OwnerUsageState {
        let data = self.store.load();
        data.token
            .as_ref()
            .and_then(|token| data.token_data.get(token))
            .cloned()
            .unwrap_or_default()
    }

    /// Persist the mirror, forward the newest entry to the store, and
    /// notify listeners.
    ///
    /// Only the newest-dated entry is pushed, carrying the owner's current
    /// counter fields - the newest row is the store's authoritative copy
    /// of the counter. Push failures are logged and swallowed; the change
    /// notification is emitted regardless.
    async fn save(&self, data: &AppData) {
        self.store.save(data);

        if let Some(token) = &data.token
            && let Some(state) = data.token_data.get(token)
            && let Some(entry) = state.latest()
        {
            let log = UsageLog {
                token: token.clone(),
                date: entry.date,
                wear_type: entry.wear_type,
                lens_usage_days: state.lens_usage_days,
                last_lens_replacement_date: state.last_lens_replacement_date,
            };

            if let Err(e) = self.api.save_log(&log).await {
                tracing::warn!(error = %e, "Failed to push latest entry to the store");
            }
        }

        self.notifier.emit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Nothing listens on the discard port, so pushes fail fast; every
    // local-state guarantee must hold anyway.
    const UNREACHABLE_API: &str = "http://127.0.0.1:9/api";

    fn tracker_in(dir: &tempfile::TempDir) -> UsageTracker {
        UsageTracker::new(&ClientConfig {
            api_base_url: UNREACHABLE_API.to_owned(),
            data_path: dir.path().join("oculog-data.json"),
        })
    }

    fn seed_owner(dir: &tempfile::TempDir, token: &str) {
        let store = LocalStore::new(dir.path().join("oculog-data.json"));
        let mut data = AppData::default();
        data.token = Some(token.to_owned());
        data.token_data
            .insert(token.to_owned(), OwnerUsageState::default());
        store.save(&data);
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[tokio::test]
    async fn authenticate_rejects_unknown_token_without_touching_state() {
        let dir = tempfile::tempdir().expect("tempdir");
        let tracker = tracker_in(&dir);

        assert!(!tracker.authenticate("ABC123").await);
        assert!(!tracker.is_authenticated());
        assert!(!dir.path().join("oculog-data.json").exists());
    }

    #[tokio::test]
    async fn authenticate_fails_when_store_is_unreachable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let tracker = tracker_in(&dir);

        // Valid token, but the fetch cannot succeed - authentication must
        // fail rather than fall back to local data.
        assert!(!tracker.authenticate("EYEWEAR21").await);
        assert!(!tracker.is_authenticated());
    }

    #[tokio::test]
    async fn add_entry_applies_invariants_and_notifies() {
        let dir = tempfile::tempdir().expect("tempdir");
        seed_owner(&dir, "EYEWEAR21");
        let tracker = tracker_in(&dir);
        let mut listener = tracker.subscribe();

        tracker.add_entry(date(2025, 6, 1), WearType::Lenses).await;

        assert_eq!(
            tracker.entry_for_date(date(2025, 6, 1)),
            Some(WearType::Lenses)
        );
        assert_eq!(tracker.days_remaining(), 29);
        assert_eq!(
            tracker.current_state().last_lens_replacement_date,
            Some(date(2025, 6, 1))
        );
        // The push failed (nothing is listening), but the notification
        // still goes out.
        assert!(listener.try_changed());
    }

    #[tokio::test]
    async fn add_entry_replaces_prior_entry_for_the_date() {
        let dir = tempfile::tempdir().expect("tempdir");
        seed_owner(&dir, "EYEWEAR21");
        let tracker = tracker_in(&dir);

        tracker.add_entry(date(2025, 6, 1), WearType::Glasses).await;
        tracker.add_entry(date(2025, 6, 1), WearType::Lenses).await;

        let state = tracker.current_state();
        assert_eq!(state.entries.len(), 1);
        assert_eq!(state.entry_for(date(2025, 6, 1)), Some(WearType::Lenses));
    }

    #[tokio::test]
    async fn remove_entry_decrements_counter_floored_at_zero() {
        let dir = tempfile::tempdir().expect("tempdir");
        seed_owner(&dir, "LENSES73Y");
        let tracker = tracker_in(&dir);

        tracker.add_entry(date(2025, 6, 1), WearType::Lenses).await;
        tracker.remove_entry(date(2025, 6, 1)).await;

        assert_eq!(tracker.entry_for_date(date(2025, 6, 1)), None);
        assert_eq!(tracker.current_state().lens_usage_days, 0);

        // Removing again must not underflow.
        tracker.remove_entry(date(2025, 6, 1)).await;
        assert_eq!(tracker.current_state().lens_usage_days, 0);
    }

    #[tokio::test]
    async fn reset_zeroes_counter_and_stamps_today() {
        let dir = tempfile::tempdir().expect("tempdir");
        seed_owner(&dir, "OPTICS92Z");
        let tracker = tracker_in(&dir);

        tracker.add_entry(date(2025, 6, 1), WearType::Lenses).await;
        tracker.add_entry(date(2025, 6, 2), WearType::Lenses).await;

        let before = UsageTracker::today();
        tracker.reset_lens_counter().await;
        let after = UsageTracker::today();

        let state = tracker.current_state();
        assert_eq!(state.lens_usage_days, 0);
        let stamped = state.last_lens_replacement_date.expect("stamped");
        assert!(stamped == before || stamped == after);
        // The entries themselves are untouched by a reset.
        assert_eq!(state.entries.len(), 2);
    }

    #[tokio::test]
    async fn month_stats_cover_only_the_requested_month() {
        let dir = tempfile::tempdir().expect("tempdir");
        seed_owner(&dir, "GLASSES05");
        let tracker = tracker_in(&dir);

        tracker.add_entry(date(2025, 6, 1), WearType::Glasses).await;
        tracker.add_entry(date(2025, 6, 2), WearType::Lenses).await;
        tracker.add_entry(date(2025, 7, 1), WearType::Lenses).await;

        let stats = tracker.month_stats(2025, 6);
        assert_eq!(stats, MonthStats { glasses: 1, lenses: 1 });
    }

    #[tokio::test]
    async fn mutations_without_an_owner_are_no_ops() {
        let dir = tempfile::tempdir().expect("tempdir");
        let tracker = tracker_in(&dir);

        tracker.add_entry(date(2025, 6, 1), WearType::Lenses).await;
        tracker.remove_entry(date(2025, 6, 1)).await;
        tracker.reset_lens_counter().await;

        assert!(!dir.path().join("oculog-data.json").exists());
        assert_eq!(tracker.current_state(), OwnerUsageState::default());
    }

    #[tokio::test]
    async fn logout_clears_owner_but_keeps_mirrored_state() {
        let dir = tempfile::tempdir().expect("tempdir");
        seed_owner(&dir, "EYEWEAR21");
        let tracker = tracker_in(&dir);

        tracker.add_entry(date(2025, 6, 1), WearType::Lenses).await;
        tracker.logout().await;

        assert!(!tracker.is_authenticated());
        let store = LocalStore::new(dir.path().join("oculog-data.json"));
        let data = store.load();
        assert!(data.token.is_none());
        assert!(data.token_data.contains_key("EYEWEAR21"));
    }
}
