use chrono::NaiveDateTime;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::OverviewResult;
use crate::models::{ActivityEvent, RosterRow};
use crate::services::engagement_service::{Engagement, EngagementIndex, EngagementWindow};
use crate::services::trial_filter_service;
use crate::services::trial_status_service;
use crate::sources::{activity_repo, roster_repo};

pub const DETAIL_ROUTE: &str = "Usage_Summary";
pub const DETAIL_QUERY_PARAM: &str = "selected_org";

pub struct DisplayRow {
    pub organization: String,
    /// Raw href; the template escapes it like every other value.
    pub organization_link: String,
    pub trial_duration: String,
    pub engagement: Engagement,
}

pub struct OverviewPageData {
    pub rows: Vec<DisplayRow>,
    pub generated_at: String,
}

pub fn detail_link(organization: &str) -> String {
    format!("{DETAIL_ROUTE}?{DETAIL_QUERY_PARAM}={organization}")
}

/// Filter, sort, classify and join against the activity log.
pub fn build_display_rows(
    roster: &[RosterRow],
    events: &[ActivityEvent],
    now: NaiveDateTime,
    window: EngagementWindow,
) -> OverviewResult<Vec<DisplayRow>> {
    let mut records = trial_filter_service::filter_trials(roster)?;
    trial_filter_service::sort_by_end_date(&mut records);

    let index = EngagementIndex::build(events);
    let rows: Vec<DisplayRow> = records
        .iter()
        .map(|record| DisplayRow {
            organization: record.organization.clone(),
            organization_link: detail_link(&record.organization),
            trial_duration: trial_status_service::trial_duration_label(record, now),
            engagement: index.engagement(&record.organization, now, window),
        })
        .collect();

    debug!(
        roster_rows = roster.len(),
        trial_rows = rows.len(),
        events = events.len(),
        active_orgs = index.organization_count(),
        high = rows.iter().filter(|r| r.engagement == Engagement::High).count(),
        "overview rows built"
    );
    Ok(rows)
}

pub fn build_overview_page(
    config: &AppConfig,
    now: NaiveDateTime,
) -> OverviewResult<OverviewPageData> {
    let roster = roster_repo::load_roster(&config.roster_path, &config.roster_sheet)?;
    let events = activity_repo::load_activity_events(&config.activity_path)?;
    let rows = build_display_rows(&roster, &events, now, config.engagement_window)?;

    Ok(OverviewPageData {
        rows,
        generated_at: now.format("%Y-%m-%d %H:%M").to_string(),
    })
}
