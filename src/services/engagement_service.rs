use std::collections::HashMap;
use std::fmt;

use chrono::{Duration, NaiveDateTime};

use crate::models::ActivityEvent;

pub const DEFAULT_WINDOW_DAYS: i64 = 14;
/// Roughly a century; longer windows are rejected by the config loader.
pub const MAX_WINDOW_DAYS: i64 = 36_500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engagement {
    High,
    Low,
}

impl Engagement {
    pub fn as_str(self) -> &'static str {
        match self {
            Engagement::High => "High",
            Engagement::Low => "Low",
        }
    }
}

impl fmt::Display for Engagement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether events stamped after "now" still count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowUpperBound {
    /// Anything at or after the window start counts, future-dated rows included.
    Open,
    Now,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngagementWindow {
    pub days: i64,
    pub upper_bound: WindowUpperBound,
}

impl Default for EngagementWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_DAYS, WindowUpperBound::Open)
    }
}

impl EngagementWindow {
    pub fn new(days: i64, upper_bound: WindowUpperBound) -> Self {
        Self { days, upper_bound }
    }

    /// Saturates at the earliest representable time instead of panicking.
    pub fn start(&self, now: NaiveDateTime) -> NaiveDateTime {
        Duration::try_days(self.days)
            .and_then(|d| now.checked_sub_signed(d))
            .unwrap_or(NaiveDateTime::MIN)
    }

    pub fn end(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        match self.upper_bound {
            WindowUpperBound::Open => None,
            WindowUpperBound::Now => Some(now),
        }
    }
}

/// Activity timestamps grouped per organization and sorted, so each roster
/// organization costs one binary search instead of a scan of the whole log.
#[derive(Debug, Default)]
pub struct EngagementIndex {
    by_org: HashMap<String, Vec<NaiveDateTime>>,
}

impl EngagementIndex {
    pub fn build(events: &[ActivityEvent]) -> Self {
        let mut by_org: HashMap<String, Vec<NaiveDateTime>> = HashMap::new();
        for event in events {
            by_org
                .entry(event.organization.clone())
                .or_default()
                .push(event.created_at);
        }
        for timestamps in by_org.values_mut() {
            timestamps.sort_unstable();
        }
        Self { by_org }
    }

    pub fn organization_count(&self) -> usize {
        self.by_org.len()
    }

    /// Any event for `organization` with `from <= created_at` (and
    /// `created_at <= to` when given)? Names match exactly.
    pub fn has_activity(
        &self,
        organization: &str,
        from: NaiveDateTime,
        to: Option<NaiveDateTime>,
    ) -> bool {
        let Some(timestamps) = self.by_org.get(organization) else {
            return false;
        };
        let first = timestamps.partition_point(|t| *t < from);
        match (timestamps.get(first), to) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(t), Some(to)) => *t <= to,
        }
    }

    pub fn engagement(
        &self,
        organization: &str,
        now: NaiveDateTime,
        window: EngagementWindow,
    ) -> Engagement {
        if self.has_activity(organization, window.start(now), window.end(now)) {
            Engagement::High
        } else {
            Engagement::Low
        }
    }
}
