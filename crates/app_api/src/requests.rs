use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct EmptyRequest {}

/// Grouping-period selector shared by every chart endpoint. `show_sundays`
/// only applies to the daily period.
#[derive(Debug, Deserialize, Default)]
pub struct ChartRequest {
    pub period: Option<String>,
    pub show_sundays: Option<bool>,
}
