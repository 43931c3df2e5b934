mod analytics;

use std::sync::Arc;

use crate::app::AppConfig;
use sheets::{TableCache, TableSource, WorkbookDir};

pub use analytics::{AnalyticsService, Dataset};

type SharedConfig = Arc<AppConfig>;

/// Service registry for app-level operations.
#[derive(Clone)]
pub struct AppServices {
    pub analytics: AnalyticsService,
    cache: Arc<TableCache>,
}

impl AppServices {
    pub fn new(config: &AppConfig) -> Self {
        let source: Arc<dyn TableSource> = Arc::new(WorkbookDir::new(&config.workbook_dir));
        Self::with_source(config, source)
    }

    pub fn with_source(config: &AppConfig, source: Arc<dyn TableSource>) -> Self {
        let shared = Arc::new(config.clone());
        let cache = Arc::new(TableCache::new(source));
        Self {
            analytics: AnalyticsService::new(shared, cache.clone()),
            cache,
        }
    }

    /// Drops every cached worksheet; the next chart request re-pulls.
    pub fn reload(&self) {
        self.cache.clear();
    }
}
