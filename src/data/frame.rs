use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Cell – a single value read from a source table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring common Pandas dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Timestamp(NaiveDateTime),
    Null,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Timestamp(t) => write!(f, "{t}"),
            Cell::Null => write!(f, "<null>"),
        }
    }
}

impl Cell {
    /// Guess the type of a textual value (CSV fields).
    pub fn guess(s: &str) -> Cell {
        if s.is_empty() {
            return Cell::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return Cell::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return Cell::Float(f);
        }
        if s == "true" || s == "false" {
            return Cell::Bool(s == "true");
        }
        Cell::Text(s.to_string())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Float(v) => Some(*v),
            Cell::Integer(i) => Some(*i as f64),
            Cell::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Text form used for identifiers and labels. Whole floats lose their
    /// fractional part so `100009425.0` and `100009425` name the same id.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Text(s) => Some(s.clone()),
            Cell::Integer(i) => Some(i.to_string()),
            Cell::Float(v) if v.fract() == 0.0 && v.is_finite() => Some(format!("{}", *v as i64)),
            Cell::Float(v) => Some(v.to_string()),
            Cell::Bool(b) => Some(b.to_string()),
            Cell::Timestamp(t) => Some(t.to_string()),
            Cell::Null => None,
        }
    }

    /// Integers are read as epoch milliseconds, the pandas JSON default.
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Cell::Timestamp(t) => Some(*t),
            Cell::Text(s) => parse_timestamp(s),
            Cell::Integer(ms) => DateTime::from_timestamp_millis(*ms).map(|dt| dt.naive_utc()),
            _ => None,
        }
    }
}

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse the timestamp spellings produced by pandas and ISO tools.
///
/// Offset timestamps keep their recorded wall-clock time, so a counter's
/// local calendar day is the day it is filtered on.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    for fmt in DATETIME_FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(t);
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local())
}

// ---------------------------------------------------------------------------
// Frame – a loaded table before typing
// ---------------------------------------------------------------------------

/// Schema problems found while typing a loaded table.
#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("no '{stem}' table in {dir} (tried .parquet, .pq, .json, .csv)")]
    MissingTable { stem: String, dir: String },
    #[error("{table}: missing column '{column}'")]
    MissingColumn { table: String, column: String },
    #[error("{table} row {row}: column '{column}' has invalid value {value}")]
    InvalidValue {
        table: String,
        row: usize,
        column: String,
        value: String,
    },
}

/// Column names plus rows of cells, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Table name used in error messages.
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Frame {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Frame {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn optional_column(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn column(&self, column: &str) -> Result<usize, TableError> {
        self.optional_column(column).ok_or_else(|| TableError::MissingColumn {
            table: self.name.clone(),
            column: column.to_string(),
        })
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&Cell::Null)
    }

    /// Read one cell through `convert`, reporting the location on failure.
    pub fn typed<T>(
        &self,
        row: usize,
        col: usize,
        convert: impl Fn(&Cell) -> Option<T>,
    ) -> Result<T, TableError> {
        let cell = self.cell(row, col);
        convert(cell).ok_or_else(|| TableError::InvalidValue {
            table: self.name.clone(),
            row,
            column: self.columns[col].clone(),
            value: cell.to_string(),
        })
    }
}
