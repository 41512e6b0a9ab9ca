//! Date-range presets for the dashboard period filter

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Inclusive date range resolved from a preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Quick-select periods offered by the dashboard date filter.
///
/// The serialized identifiers match the filter values the dashboard sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodPreset {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "week")]
    Week,
    #[serde(rename = "month")]
    Month,
    #[serde(rename = "3months")]
    ThreeMonths,
    #[serde(rename = "6months")]
    SixMonths,
    #[serde(rename = "year")]
    Year,
}

impl PeriodPreset {
    /// Parse a filter value; unknown values yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "today" => Some(Self::Today),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "3months" => Some(Self::ThreeMonths),
            "6months" => Some(Self::SixMonths),
            "year" => Some(Self::Year),
            _ => None,
        }
    }

    /// Resolve the preset against a reference date, usually today
    pub fn resolve(self, today: NaiveDate) -> DateRange {
        let from = match self {
            Self::Today => today,
            Self::Week => today - Duration::weeks(1),
            Self::Month => sub_months(today, 1),
            Self::ThreeMonths => sub_months(today, 3),
            Self::SixMonths => sub_months(today, 6),
            Self::Year => sub_months(today, 12),
        };
        DateRange { from, to: today }
    }
}

fn sub_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months)).unwrap_or(date)
}
