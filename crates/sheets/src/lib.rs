mod cache;
mod normalize;
mod parser;
mod source;
mod types;

pub use cache::TableCache;
pub use normalize::{cell_bool, cell_f64, cell_str, normalize};
pub use parser::{
    ADS_WORKSHEET, SPEND_WORKSHEET, USERS_WORKSHEET, ads_from_table, parse_sheet_date,
    spend_from_table, users_from_table,
};
pub use source::{TableSource, WorkbookDir};
pub use types::{IngestError, RawTable, Result};
