use std::path::PathBuf;
use std::sync::Arc;

use crate::services::AppServices;
use sheets::TableSource;

/// Where the spreadsheet exports live and which workbook to read.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub workbook_dir: PathBuf,
    pub workbook: String,
}

/// Application state shared by frontend backends.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub services: AppServices,
}

impl AppState {
    pub fn new(workbook_dir: PathBuf, workbook: String) -> Self {
        let config = AppConfig {
            workbook_dir,
            workbook,
        };
        let services = AppServices::new(&config);
        Self { config, services }
    }

    /// State backed by an injected ingestion collaborator instead of the
    /// workbook directory.
    pub fn with_source(config: AppConfig, source: Arc<dyn TableSource>) -> Self {
        let services = AppServices::with_source(&config, source);
        Self { config, services }
    }
}
