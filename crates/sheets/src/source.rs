use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use serde_json::Value;
use walkdir::WalkDir;

use crate::types::{IngestError, RawTable, Result};

/// Ingestion collaborator: given a workbook identifier and a worksheet name,
/// returns the raw row-oriented table. Credentials and transport are the
/// implementation's concern.
pub trait TableSource: Send + Sync {
    fn fetch(&self, workbook: &str, worksheet: &str) -> Result<RawTable>;
}

/// File-backed source reading spreadsheet exports from a local directory.
/// Each workbook is a directory; each worksheet is a `<name>.csv` or
/// `<name>.json` file anywhere below it.
pub struct WorkbookDir {
    root: PathBuf,
}

impl WorkbookDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn find_worksheet(&self, workbook: &str, worksheet: &str) -> Option<PathBuf> {
        let dir = self.root.join(workbook);
        WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .find(|entry| {
                entry.file_type().is_file()
                    && entry.path().file_stem().and_then(|stem| stem.to_str()) == Some(worksheet)
                    && is_worksheet_file(entry.path())
            })
            .map(|entry| entry.into_path())
    }
}

impl TableSource for WorkbookDir {
    fn fetch(&self, workbook: &str, worksheet: &str) -> Result<RawTable> {
        let path = self.find_worksheet(workbook, worksheet).ok_or_else(|| {
            IngestError::MissingWorksheet {
                workbook: workbook.to_string(),
                worksheet: worksheet.to_string(),
            }
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => table_from_json(&path),
            _ => table_from_csv(&path),
        }
    }
}

fn is_worksheet_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("csv") | Some("json")
    )
}

fn table_from_csv(path: &Path) -> Result<RawTable> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: BTreeMap<String, Value> = headers
            .iter()
            .zip(record.iter())
            .map(|(header, field)| {
                let value = if field.trim().is_empty() {
                    Value::Null
                } else {
                    Value::String(field.to_string())
                };
                (header.to_string(), value)
            })
            .collect();
        rows.push(row);
    }
    Ok(RawTable { rows })
}

fn table_from_json(path: &Path) -> Result<RawTable> {
    let file = File::open(path)?;
    let rows: Vec<BTreeMap<String, Value>> = serde_json::from_reader(file)?;
    Ok(RawTable { rows })
}
