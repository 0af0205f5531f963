use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::dates::format_ymd;
use crate::models::OrganizationRecord;

pub const ONGOING_LABEL: &str = "Ongoing";
/// Trials ending within this many days are flagged yellow.
pub const ENDING_SOON_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIndicator {
    /// Open-ended or more than a week left.
    Green,
    Yellow,
    /// Trial already over.
    Red,
}

impl StatusIndicator {
    pub fn as_emoji(self) -> &'static str {
        match self {
            StatusIndicator::Green => "🟢",
            StatusIndicator::Yellow => "🟡",
            StatusIndicator::Red => "🔴",
        }
    }
}

/// Whole days left until the end date (taken at 00:00), rounded toward
/// negative infinity. An end date of today is already -1 once the day has
/// started.
pub fn days_remaining(end_date: NaiveDate, now: NaiveDateTime) -> i64 {
    let delta = end_date.and_time(NaiveTime::MIN) - now;
    // num_days truncates toward zero; step down when a remainder is left.
    let days = delta.num_days();
    if delta < Duration::days(days) {
        days - 1
    } else {
        days
    }
}

pub fn classify(end_date: Option<NaiveDate>, now: NaiveDateTime) -> (StatusIndicator, String) {
    let Some(end_date) = end_date else {
        return (StatusIndicator::Green, ONGOING_LABEL.to_string());
    };

    let indicator = match days_remaining(end_date, now) {
        d if d < 0 => StatusIndicator::Red,
        d if d <= ENDING_SOON_DAYS => StatusIndicator::Yellow,
        _ => StatusIndicator::Green,
    };
    (indicator, format_ymd(end_date))
}

/// `{indicator} {start} ~ {end or Ongoing}`
pub fn trial_duration_label(record: &OrganizationRecord, now: NaiveDateTime) -> String {
    let (indicator, display) = classify(record.trial_end_date, now);
    format!(
        "{} {} ~ {}",
        indicator.as_emoji(),
        format_ymd(record.trial_start_date),
        display
    )
}
