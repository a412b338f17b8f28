//! Lens-cycle derivation and monthly statistics.
//!
//! Pure, total functions over in-memory wear records. The 30-day cycle
//! length is a fixed policy constant, not configuration.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::{UsageLog, UsageSummary, WearEntry, WearType};

/// Length of one lens cycle in wear days.
pub const LENS_CYCLE_DAYS: u32 = 30;

/// Wear days left before lens replacement is due, floored at zero.
#[must_use]
pub const fn days_remaining(lens_usage_days: u32) -> u32 {
    LENS_CYCLE_DAYS.saturating_sub(lens_usage_days)
}

/// Whether the lens-wear counter has reached the replacement threshold.
#[must_use]
pub const fn is_replacement_due(lens_usage_days: u32) -> bool {
    lens_usage_days >= LENS_CYCLE_DAYS
}

/// Per-wear-type day counts for one calendar month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthStats {
    pub glasses: u32,
    pub lenses: u32,
}

/// Count entries by wear type within the given calendar month.
///
/// `month` is 1-based. Entries outside the month are ignored; every entry
/// inside it lands in exactly one of the two counts.
pub fn month_stats<I>(entries: I, year: i32, month: u32) -> MonthStats
where
    I: IntoIterator<Item = WearEntry>,
{
    let mut stats = MonthStats::default();
    for entry in entries {
        if entry.date.year() == year && entry.date.month() == month {
            match entry.wear_type {
                WearType::Glasses => stats.glasses += 1,
                WearType::Lenses => stats.lenses += 1,
            }
        }
    }
    stats
}

/// Errors that can occur when computing a calendar month range.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid calendar month {year}-{month}")]
pub struct MonthRangeError {
    pub year: i32,
    pub month: u32,
}

/// Half-open date range `[year-month-01, next-month-01)` for a calendar
/// month, wrapping December into January of the following year.
///
/// # Errors
///
/// Returns an error if `month` is not in `1..=12` or the year is outside
/// the representable calendar.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), MonthRangeError> {
    let err = MonthRangeError { year, month };
    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or(err.clone())?;

    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1).ok_or(err)?;

    Ok((start, end))
}

/// Derive an owner's [`UsageSummary`] from their full set of log rows.
///
/// The day counts come from scanning every row; the current counter fields
/// come from the newest row as stored - the store trusts whatever counter
/// value the writer carried forward, it does not recompute from history.
#[must_use]
pub fn summarize(logs: &[UsageLog]) -> UsageSummary {
    let latest = logs.iter().max_by_key(|log| log.date).cloned();

    let lens_days = logs
        .iter()
        .filter(|log| log.wear_type == WearType::Lenses)
        .count();
    let glasses_days = logs.len() - lens_days;

    UsageSummary {
        total_days: u32::try_from(logs.len()).unwrap_or(u32::MAX),
        lens_usage_days: u32::try_from(lens_days).unwrap_or(u32::MAX),
        glasses_usage_days: u32::try_from(glasses_days).unwrap_or(u32::MAX),
        last_lens_replacement_date: latest
            .as_ref()
            .and_then(|log| log.last_lens_replacement_date),
        current_lens_usage_days: latest.as_ref().map_or(0, |log| log.lens_usage_days),
        latest_log: latest,
    }
}

/// One owner's usage state: the per-date wear records plus the lens-cycle
/// counter carried alongside them.
///
/// This is the client-side mirror of what the store holds for an owner,
/// and the single place the counter invariants are applied:
/// - recording a `lenses` day increments the counter and pins
///   `last_lens_replacement_date` to that date if it was unset;
/// - removing a `lenses` day decrements the counter, floored at zero;
/// - a manual reset zeroes the counter and stamps the reset date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OwnerUsageState {
    pub entries: BTreeMap<NaiveDate, WearType>,
    pub lens_usage_days: u32,
    pub last_lens_replacement_date: Option<NaiveDate>,
}

impl OwnerUsageState {
    /// Rebuild the state from the store's rows for this owner.
    ///
    /// Entries come from every row; the counter fields come from the
    /// newest row's forward-carried values.
    #[must_use]
    pub fn from_logs(logs: &[UsageLog]) -> Self {
        let entries = logs
            .iter()
            .map(|log| (log.date, log.wear_type))
            .collect::<BTreeMap<_, _>>();
        let latest = logs.iter().max_by_key(|log| log.date);

        Self {
            entries,
            lens_usage_days: latest.map_or(0, |log| log.lens_usage_days),
            last_lens_replacement_date: latest.and_then(|log| log.last_lens_replacement_date),
        }
    }

    /// Record what was worn on a date, replacing any prior entry for it.
    ///
    /// Each `lenses` write increments the counter - the increment is keyed
    /// to the write, not to first-write-per-date.
    pub fn record(&mut self, date: NaiveDate, wear_type: WearType) {
        self.entries.insert(date, wear_type);

        if wear_type == WearType::Lenses {
            self.lens_usage_days += 1;
            if self.last_lens_replacement_date.is_none() {
                self.last_lens_replacement_date = Some(date);
            }
        }
    }

    /// Remove the entry for a date, if any, returning what was recorded.
    pub fn remove(&mut self, date: NaiveDate) -> Option<WearType> {
        let removed = self.entries.remove(&date);
        if removed == Some(WearType::Lenses) {
            self.lens_usage_days = self.lens_usage_days.saturating_sub(1);
        }
        removed
    }

    /// Manually clear the lens-cycle counter, stamping `today` as the
    /// replacement date.
    pub fn reset_counter(&mut self, today: NaiveDate) {
        self.lens_usage_days = 0;
        self.last_lens_replacement_date = Some(today);
    }

    /// What was recorded for a date, if anything.
    #[must_use]
    pub fn entry_for(&self, date: NaiveDate) -> Option<WearType> {
        self.entries.get(&date).copied()
    }

    /// The newest-dated entry, if any exist.
    #[must_use]
    pub fn latest(&self) -> Option<WearEntry> {
        self.entries
            .last_key_value()
            .map(|(date, wear_type)| WearEntry::new(*date, *wear_type))
    }

    /// Iterate the entries as [`WearEntry`] values, oldest date first.
    pub fn iter(&self) -> impl Iterator<Item = WearEntry> + '_ {
        self.entries
            .iter()
            .map(|(date, wear_type)| WearEntry::new(*date, *wear_type))
    }

    /// Monthly glasses/lens day counts over this owner's entries.
    #[must_use]
    pub fn month_stats(&self, year: i32, month: u32) -> MonthStats {
        month_stats(self.iter(), year, month)
    }

    /// Wear days left in the current lens cycle.
    #[must_use]
    pub const fn days_remaining(&self) -> u32 {
        days_remaining(self.lens_usage_days)
    }

    /// Whether lens replacement is due.
    #[must_use]
    pub const fn is_replacement_due(&self) -> bool {
        is_replacement_due(self.lens_usage_days)
    }
}
