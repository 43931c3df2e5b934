use std::collections::BTreeMap;
use std::io;

use serde_json::Value;

/// Row-oriented worksheet data as returned by a [`crate::TableSource`]. The
/// column set may vary per row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub rows: Vec<BTreeMap<String, Value>>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Errors emitted while pulling and parsing worksheet exports. All of them
/// abort the current load; there are no partial results.
#[derive(Debug)]
pub enum IngestError {
    Io(io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    MissingWorksheet { workbook: String, worksheet: String },
    MissingColumn { worksheet: String, column: String },
    Date { value: String },
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {}", err),
            Self::Csv(err) => write!(f, "csv error: {}", err),
            Self::Json(err) => write!(f, "json error: {}", err),
            Self::MissingWorksheet {
                workbook,
                worksheet,
            } => write!(f, "worksheet {} not found in workbook {}", worksheet, workbook),
            Self::MissingColumn { worksheet, column } => {
                write!(f, "worksheet {} is missing column {}", worksheet, column)
            }
            Self::Date { value } => write!(f, "unparseable date: {}", value),
        }
    }
}

impl std::error::Error for IngestError {}

impl From<io::Error> for IngestError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
