use chrono::NaiveDateTime;

use crate::dates::{excel_serial_to_datetime, parse_timestamp};

/// A single cell from the roster source, reduced to the shapes the pipeline
/// cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetValue {
    Empty,
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
    /// Error cells, booleans, durations. Never a valid date or status.
    Other(String),
}

impl SheetValue {
    /// `Ok(None)` for empty cells, `Err(raw)` when the cell holds something
    /// that is not a date.
    pub fn to_datetime(&self) -> Result<Option<NaiveDateTime>, String> {
        match self {
            SheetValue::Empty => Ok(None),
            SheetValue::Text(s) if s.trim().is_empty() => Ok(None),
            SheetValue::Text(s) => parse_timestamp(s).map(Some).ok_or_else(|| s.clone()),
            SheetValue::Number(n) => excel_serial_to_datetime(*n)
                .map(Some)
                .ok_or_else(|| n.to_string()),
            SheetValue::DateTime(dt) => Ok(Some(*dt)),
            SheetValue::Other(raw) => Err(raw.clone()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SheetValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn display(&self) -> String {
        match self {
            SheetValue::Empty => String::new(),
            SheetValue::Text(s) | SheetValue::Other(s) => s.clone(),
            SheetValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                format!("{}", *n as i64)
            }
            SheetValue::Number(n) => n.to_string(),
            SheetValue::DateTime(dt) => dt.to_string(),
        }
    }
}

// Raw roster row as read from the sheet, before filtering or date parsing.
#[derive(Debug, Clone)]
pub struct RosterRow {
    /// 1-based row number in the source, header included.
    pub row_number: usize,
    pub organization: String,
    pub status: SheetValue,
    pub trial_start_date: SheetValue,
    pub trial_end_date: SheetValue,
}
