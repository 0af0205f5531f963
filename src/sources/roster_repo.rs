use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::debug;

use crate::error::{OverviewError, OverviewResult};
use crate::models::{RosterRow, SheetValue};

pub const COL_ORGANIZATION: &str = "organization";
pub const COL_STATUS: &str = "status";
pub const COL_TRIAL_START_DATE: &str = "trial_start_date";
pub const COL_TRIAL_END_DATE: &str = "trial_end_date";

/// Loads every roster row in sheet order. Workbooks go through calamine;
/// `.csv` rosters are read with the same column names and no sheet.
pub fn load_roster(path: &Path, sheet: &str) -> OverviewResult<Vec<RosterRow>> {
    std::fs::metadata(path).map_err(|source| OverviewError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    let rows = if is_csv {
        load_roster_csv(path)?
    } else {
        load_roster_workbook(path, sheet)?
    };
    debug!(path = %path.display(), rows = rows.len(), "roster loaded");
    Ok(rows)
}

fn load_roster_workbook(path: &Path, sheet: &str) -> OverviewResult<Vec<RosterRow>> {
    let mut workbook = open_workbook_auto(path).map_err(|e| OverviewError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if !workbook.sheet_names().iter().any(|name| name == sheet) {
        return Err(OverviewError::SheetNotFound {
            path: path.to_path_buf(),
            sheet: sheet.to_string(),
        });
    }

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| OverviewError::Workbook {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let header_row_number = range.start().map(|(r, _)| r as usize + 1).unwrap_or(1);
    let grid = range
        .rows()
        .map(|cells| cells.iter().map(sheet_value).collect::<Vec<_>>());

    rows_from_grid(&format!("{} [{}]", path.display(), sheet), header_row_number, grid)
}

fn load_roster_csv(path: &Path) -> OverviewResult<Vec<RosterRow>> {
    let csv_error = |source| OverviewError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        grid.push(
            record
                .iter()
                .map(|field| {
                    if field.trim().is_empty() {
                        SheetValue::Empty
                    } else {
                        SheetValue::Text(field.to_string())
                    }
                })
                .collect::<Vec<_>>(),
        );
    }

    rows_from_grid(&path.display().to_string(), 1, grid.into_iter())
}

fn sheet_value(cell: &Data) -> SheetValue {
    match cell {
        Data::Empty => SheetValue::Empty,
        Data::String(s) => SheetValue::Text(s.clone()),
        Data::Int(n) => SheetValue::Number(*n as f64),
        Data::Float(f) => SheetValue::Number(*f),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(SheetValue::DateTime)
            .unwrap_or_else(|| SheetValue::Other(dt.to_string())),
        Data::DateTimeIso(s) => SheetValue::Text(s.clone()),
        Data::DurationIso(s) => SheetValue::Other(s.clone()),
        Data::Bool(b) => SheetValue::Other(b.to_string()),
        Data::Error(e) => SheetValue::Other(format!("#ERR({:?})", e)),
    }
}

/// Maps a header-first grid onto roster rows. Extra columns are ignored;
/// short rows read as empty cells.
pub(crate) fn rows_from_grid(
    source_name: &str,
    header_row_number: usize,
    mut grid: impl Iterator<Item = Vec<SheetValue>>,
) -> OverviewResult<Vec<RosterRow>> {
    let header = grid.next().unwrap_or_default();
    let column = |name: &'static str| {
        header
            .iter()
            .position(|cell| cell.display().trim() == name)
            .ok_or_else(|| OverviewError::MissingColumn {
                source_name: source_name.to_string(),
                column: name,
            })
    };

    let org_idx = column(COL_ORGANIZATION)?;
    let status_idx = column(COL_STATUS)?;
    let start_idx = column(COL_TRIAL_START_DATE)?;
    let end_idx = column(COL_TRIAL_END_DATE)?;

    let cell = |cells: &[SheetValue], idx: usize| {
        cells.get(idx).cloned().unwrap_or(SheetValue::Empty)
    };

    Ok(grid
        .enumerate()
        .map(|(i, cells)| RosterRow {
            row_number: header_row_number + 1 + i,
            organization: cell(&cells, org_idx).display(),
            status: cell(&cells, status_idx),
            trial_start_date: cell(&cells, start_idx),
            trial_end_date: cell(&cells, end_idx),
        })
        .collect())
}
