pub mod app;
pub mod config;
pub mod error;
pub mod services;
pub mod startup;
pub mod util;

pub use app::{AppConfig, AppState};
pub use config::PeriodParams;
pub use error::{ApiError, AppError, Result};
pub use services::{AnalyticsService, AppServices, Dataset};
pub use startup::{AppPaths, ensure_app_data_dir};
pub use util::period::resolve_period;
