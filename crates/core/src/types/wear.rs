//! Wear record types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What the user wore on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WearType {
    Glasses,
    Lenses,
}

impl std::fmt::Display for WearType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Glasses => write!(f, "glasses"),
            Self::Lenses => write!(f, "lenses"),
        }
    }
}

impl std::str::FromStr for WearType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "glasses" => Ok(Self::Glasses),
            "lenses" => Ok(Self::Lenses),
            _ => Err(format!("invalid wear type: {s}")),
        }
    }
}

/// One day's recorded choice of glasses vs. lenses.
///
/// At most one entry exists per owner per calendar date; recording a new
/// entry for an existing date replaces the prior one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WearEntry {
    pub date: NaiveDate,
    pub wear_type: WearType,
}

impl WearEntry {
    #[must_use]
    pub const fn new(date: NaiveDate, wear_type: WearType) -> Self {
        Self { date, wear_type }
    }
}
