use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::source::TableSource;
use crate::types::{RawTable, Result};

/// Read-through cache over a [`TableSource`], keyed by (workbook, worksheet).
/// Fetches are memoized for the process lifetime; `clear` forces the next
/// request to re-pull.
pub struct TableCache {
    source: Arc<dyn TableSource>,
    entries: Mutex<HashMap<(String, String), Arc<RawTable>>>,
}

impl TableCache {
    pub fn new(source: Arc<dyn TableSource>) -> Self {
        Self {
            source,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, workbook: &str, worksheet: &str) -> Result<Arc<RawTable>> {
        let key = (workbook.to_string(), worksheet.to_string());
        let mut entries = self.entries.lock().expect("table cache lock");
        if let Some(table) = entries.get(&key) {
            return Ok(table.clone());
        }
        let table = Arc::new(self.source.fetch(workbook, worksheet)?);
        entries.insert(key, table.clone());
        Ok(table)
    }

    pub fn clear(&self) {
        self.entries.lock().expect("table cache lock").clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::types::IngestError;

    struct CountingSource {
        fetches: AtomicUsize,
    }

    impl TableSource for CountingSource {
        fn fetch(&self, _workbook: &str, worksheet: &str) -> Result<RawTable> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if worksheet == "missing" {
                return Err(IngestError::MissingWorksheet {
                    workbook: "wb".to_string(),
                    worksheet: worksheet.to_string(),
                });
            }
            Ok(RawTable::default())
        }
    }

    #[test]
    fn repeated_gets_fetch_once_per_key() {
        let source = Arc::new(CountingSource {
            fetches: AtomicUsize::new(0),
        });
        let cache = TableCache::new(source.clone());

        cache.get("wb", "users").expect("first get");
        cache.get("wb", "users").expect("second get");
        cache.get("wb", "spend").expect("other worksheet");

        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn clear_forces_a_refetch() {
        let source = Arc::new(CountingSource {
            fetches: AtomicUsize::new(0),
        });
        let cache = TableCache::new(source.clone());

        cache.get("wb", "users").expect("get");
        cache.clear();
        cache.get("wb", "users").expect("get after clear");

        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failed_fetches_are_not_cached() {
        let source = Arc::new(CountingSource {
            fetches: AtomicUsize::new(0),
        });
        let cache = TableCache::new(source.clone());

        assert!(cache.get("wb", "missing").is_err());
        assert!(cache.get("wb", "missing").is_err());

        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }
}
