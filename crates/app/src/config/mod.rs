use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PeriodParams {
    pub period: Option<String>,
    pub show_sundays: Option<bool>,
}
