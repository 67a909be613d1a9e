use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Well-known column names
// ---------------------------------------------------------------------------

/// Grouping attribute added by the loader: the stem of the file a row came from.
pub const SOURCE_COLUMN: &str = "source_file";
pub const POSITION_COLUMN: &str = "Position";
pub const AGE_COLUMN: &str = "Age";
pub const HEIGHT_COLUMN: &str = "Height";
pub const PASSPORT_COLUMN: &str = "Passport country";

/// Columns shown in the result table, in display order.
pub const DISPLAY_COLUMNS: [&str; 9] = [
    "Full name",
    "Team within selected timeframe",
    AGE_COLUMN,
    POSITION_COLUMN,
    PASSPORT_COLUMN,
    "Defensive duels per 90",
    "Defensive duels won, %",
    "Offensive duels per 90",
    "Offensive duels won, %",
];

// ---------------------------------------------------------------------------
// CellValue – a single cell of the player table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the common dtypes of scouting exports.
/// Stored in `BTreeSet`s downstream, so `CellValue` must be `Ord`; equality,
/// ordering and hashing all follow the floats' total order.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use std::cmp::Ordering;
        use CellValue::*;

        fn rank(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Numeric view of the cell; text and null cells have none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) if !v.is_nan() => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Record / Dataset
// ---------------------------------------------------------------------------

/// One player's row: column name → value. A missing key reads as null.
pub type Record = BTreeMap<String, CellValue>;

static NULL: CellValue = CellValue::Null;

/// Returned by [`Dataset::project`] when the schema lacks requested columns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing columns: {}", .missing.join(", "))]
pub struct ProjectionError {
    pub missing: Vec<String>,
}

/// An ordered player table sharing one column schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Column names in first-seen order.
    pub columns: Vec<String>,
    /// Rows in source order.
    pub records: Vec<Record>,
}

impl Dataset {
    /// Build a dataset from rows, deriving the column list from the given
    /// order and then any extra keys found in the rows.
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        let mut ds = Dataset { columns, records };
        let mut seen: BTreeSet<String> = ds.columns.iter().cloned().collect();
        let mut extra = Vec::new();
        for rec in &ds.records {
            for key in rec.keys() {
                if seen.insert(key.clone()) {
                    extra.push(key.clone());
                }
            }
        }
        ds.columns.extend(extra);
        ds
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Value of `column` in row `row`; null when the row lacks it.
    pub fn value(&self, row: usize, column: &str) -> &CellValue {
        self.records
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&NULL)
    }

    /// Sorted set of non-null values in a column.
    pub fn unique_values(&self, column: &str) -> BTreeSet<CellValue> {
        self.records
            .iter()
            .filter_map(|r| r.get(column))
            .filter(|v| !v.is_null())
            .cloned()
            .collect()
    }

    /// Keep only the rows matching `keep`, preserving order.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Record) -> bool,
    {
        self.records.retain(|r| keep(r));
    }

    /// A new dataset holding exactly `columns`, in that order.
    pub fn project(&self, columns: &[&str]) -> Result<Dataset, ProjectionError> {
        let missing: Vec<String> = columns
            .iter()
            .filter(|c| !self.has_column(c))
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ProjectionError { missing });
        }

        let records = self
            .records
            .iter()
            .map(|rec| {
                columns
                    .iter()
                    .filter_map(|c| rec.get(*c).map(|v| (c.to_string(), v.clone())))
                    .collect()
            })
            .collect();
        Ok(Dataset {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            records,
        })
    }

    /// Observed (min, max) of a numeric column, each truncated toward zero.
    /// `None` when the column holds no numeric value.
    pub fn numeric_bounds(&self, column: &str) -> Option<(i64, i64)> {
        let (min, max) = self
            .records
            .iter()
            .filter_map(|r| r.get(column).and_then(CellValue::as_f64))
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })?;
        Some((min.trunc() as i64, max.trunc() as i64))
    }
}
