//! Stored usage-log records and the per-owner summary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::wear::{WearEntry, WearType};

/// One stored row of the usage log, keyed by `(token, date)`.
///
/// The counter fields are forward-carried: every write stores the owner's
/// current `lens_usage_days` and `last_lens_replacement_date` alongside the
/// day's record, rather than deriving them from row history. The newest row
/// is therefore the authoritative copy of the counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageLog {
    pub token: String,
    pub date: NaiveDate,
    pub wear_type: WearType,
    #[serde(default)]
    pub lens_usage_days: u32,
    #[serde(default)]
    pub last_lens_replacement_date: Option<NaiveDate>,
}

impl UsageLog {
    /// The day's wear record, without the carried counter fields.
    #[must_use]
    pub const fn entry(&self) -> WearEntry {
        WearEntry::new(self.date, self.wear_type)
    }
}

/// Per-owner aggregate over the full log.
///
/// The day counts are derived by scanning every row; the two `current`
/// fields are taken from the newest row's forward-carried values, not
/// recomputed from history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    pub total_days: u32,
    pub lens_usage_days: u32,
    pub glasses_usage_days: u32,
    pub last_lens_replacement_date: Option<NaiveDate>,
    pub current_lens_usage_days: u32,
    pub latest_log: Option<UsageLog>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_log_wire_format_is_camel_case() {
        let log = UsageLog {
            token: "EYEWEAR21".to_owned(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date"),
            wear_type: WearType::Lenses,
            lens_usage_days: 4,
            last_lens_replacement_date: NaiveDate::from_ymd_opt(2025, 5, 28),
        };

        let json = serde_json::to_value(&log).expect("serialize");
        assert_eq!(json["token"], "EYEWEAR21");
        assert_eq!(json["date"], "2025-06-01");
        assert_eq!(json["wearType"], "lenses");
        assert_eq!(json["lensUsageDays"], 4);
        assert_eq!(json["lastLensReplacementDate"], "2025-05-28");
    }

    #[test]
    fn counter_fields_default_when_absent() {
        let log: UsageLog = serde_json::from_str(
            r#"{"token":"VISION48X","date":"2025-06-02","wearType":"glasses"}"#,
        )
        .expect("deserialize");

        assert_eq!(log.lens_usage_days, 0);
        assert_eq!(log.last_lens_replacement_date, None);
    }
}
