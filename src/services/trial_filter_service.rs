use crate::error::{OverviewError, OverviewResult};
use crate::models::{OrganizationRecord, RosterRow, SheetValue};
use crate::sources::roster_repo::{COL_TRIAL_END_DATE, COL_TRIAL_START_DATE};

pub const TRIAL_STATUS: &str = "trial";

pub fn is_trial(status: &SheetValue) -> bool {
    status
        .as_text()
        .is_some_and(|s| s.trim().to_lowercase() == TRIAL_STATUS)
}

/// Keeps trial rows in source order and parses their dates. Only surviving
/// rows are parsed, so a bad date on a paid organization does not fail the
/// page.
pub fn filter_trials(rows: &[RosterRow]) -> OverviewResult<Vec<OrganizationRecord>> {
    rows.iter()
        .filter(|row| is_trial(&row.status))
        .map(normalize)
        .collect()
}

fn normalize(row: &RosterRow) -> OverviewResult<OrganizationRecord> {
    let start = row
        .trial_start_date
        .to_datetime()
        .map_err(|value| OverviewError::InvalidDate {
            row: row.row_number,
            column: COL_TRIAL_START_DATE,
            value,
        })?
        .ok_or_else(|| OverviewError::MissingStartDate {
            row: row.row_number,
            organization: row.organization.clone(),
        })?;

    let end = row
        .trial_end_date
        .to_datetime()
        .map_err(|value| OverviewError::InvalidDate {
            row: row.row_number,
            column: COL_TRIAL_END_DATE,
            value,
        })?;

    Ok(OrganizationRecord {
        organization: row.organization.clone(),
        status: row.status.display().trim().to_lowercase(),
        trial_start_date: start.date(),
        trial_end_date: end.map(|dt| dt.date()),
    })
}

/// Earliest end date first; open-ended trials go last. Stable, so equal keys
/// keep roster order.
pub fn sort_by_end_date(records: &mut [OrganizationRecord]) {
    records.sort_by_key(|r| (r.trial_end_date.is_none(), r.trial_end_date));
}
