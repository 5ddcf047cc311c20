use chrono::{DateTime, NaiveDate, Utc};
use std::cmp::Ordering;
use std::fmt;

/// A single cell, typed so sorting compares numbers and dates correctly.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
}

impl CellValue {
    fn rank(&self) -> u8 {
        match self {
            CellValue::Empty => 0,
            CellValue::Bool(_) => 1,
            CellValue::Number(_) => 2,
            CellValue::Date(_) | CellValue::DateTime(_) => 3,
            CellValue::Text(_) => 4,
        }
    }

    /// Total order used by column sort. `Empty` sorts first; text compares
    /// case-insensitively.
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Text(a), CellValue::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
            (CellValue::DateTime(a), CellValue::DateTime(b)) => a.cmp(b),
            (CellValue::Date(a), CellValue::DateTime(b)) => a.cmp(&b.date_naive()),
            (CellValue::DateTime(a), CellValue::Date(b)) => a.date_naive().cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    /// Case-insensitive substring match on the displayed form.
    pub fn contains_ignore_case(&self, needle_lower: &str) -> bool {
        self.to_string().to_lowercase().contains(needle_lower)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::DateTime(dt) => f.write_str(&dt.to_rfc3339()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::from(value.as_str())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<Option<NaiveDate>> for CellValue {
    fn from(value: Option<NaiveDate>) -> Self {
        value.map_or(CellValue::Empty, CellValue::Date)
    }
}

impl From<Option<DateTime<Utc>>> for CellValue {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(CellValue::Empty, CellValue::DateTime)
    }
}

/// A record displayable in a data table.
pub trait TableRow {
    /// Stable identifier used by row selection.
    fn row_id(&self) -> String;

    /// Every cell of the row, keyed by column key.
    fn cells(&self) -> Vec<(&'static str, CellValue)>;

    fn cell(&self, key: &str) -> CellValue {
        self.cells()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map_or(CellValue::Empty, |(_, v)| v)
    }
}
