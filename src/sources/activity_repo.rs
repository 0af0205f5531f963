use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::dates::parse_timestamp;
use crate::error::{OverviewError, OverviewResult};
use crate::models::ActivityEvent;

pub const COL_ORGANIZATION: &str = "organization";
pub const COL_CREATED_AT: &str = "created_at";

#[derive(Debug, Deserialize)]
struct ActivityCsvRow {
    organization: Option<String>,
    created_at: Option<String>,
}

/// Loads the activity log. Rows without an organization or a timestamp can
/// never count toward engagement and are dropped; a timestamp that does not
/// parse fails the load.
pub fn load_activity_events(path: &Path) -> OverviewResult<Vec<ActivityEvent>> {
    std::fs::metadata(path).map_err(|source| OverviewError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let csv_error = |source| OverviewError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let headers = reader.headers().map_err(csv_error)?.clone();
    for column in [COL_ORGANIZATION, COL_CREATED_AT] {
        if !headers.iter().any(|h| h == column) {
            return Err(OverviewError::MissingColumn {
                source_name: path.display().to_string(),
                column,
            });
        }
    }

    let mut events = Vec::new();
    let mut skipped = 0usize;
    for (i, row) in reader.deserialize::<ActivityCsvRow>().enumerate() {
        let row = row.map_err(csv_error)?;
        let Some(organization) = row.organization.filter(|o| !o.is_empty()) else {
            skipped += 1;
            continue;
        };
        let raw = row.created_at.unwrap_or_default();
        if raw.trim().is_empty() {
            skipped += 1;
            continue;
        }
        let created_at = parse_timestamp(&raw).ok_or_else(|| OverviewError::InvalidDate {
            row: i + 2,
            column: COL_CREATED_AT,
            value: raw.clone(),
        })?;
        events.push(ActivityEvent {
            organization,
            created_at,
        });
    }

    debug!(
        path = %path.display(),
        events = events.len(),
        skipped,
        "activity log loaded"
    );
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_events_and_ignores_extra_columns() {
        let file = write_csv(
            "user_id,organization,created_at,feature\n\
             u1,OrgA,2024-05-25 09:15:00,search\n\
             u2,OrgB,2024-05-01,export\n",
        );
        let events = load_activity_events(file.path()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].organization, "OrgA");
        assert_eq!(
            events[0].created_at,
            NaiveDate::from_ymd_opt(2024, 5, 25)
                .unwrap()
                .and_hms_opt(9, 15, 0)
                .unwrap()
        );
        assert_eq!(events[1].created_at.date(), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }

    #[test]
    fn rows_without_org_or_timestamp_are_dropped() {
        let file = write_csv("organization,created_at\n,2024-05-25\nOrgA,\nOrgA,2024-05-26\n");
        let events = load_activity_events(file.path()).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].organization, "OrgA");
    }

    #[test]
    fn malformed_timestamp_fails_with_row_number() {
        let file = write_csv("organization,created_at\nOrgA,2024-05-25\nOrgB,yesterday\n");
        let err = load_activity_events(file.path()).unwrap_err();
        match err {
            OverviewError::InvalidDate { row, column, value } => {
                assert_eq!(row, 3);
                assert_eq!(column, COL_CREATED_AT);
                assert_eq!(value, "yesterday");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_created_at_column_is_reported() {
        let file = write_csv("organization,timestamp\nOrgA,2024-05-25\n");
        let err = load_activity_events(file.path()).unwrap_err();
        assert!(matches!(
            err,
            OverviewError::MissingColumn {
                column: COL_CREATED_AT,
                ..
            }
        ));
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_activity_events(&dir.path().join("df_all.csv")).unwrap_err();
        assert!(matches!(err, OverviewError::SourceUnavailable { .. }));
    }
}
