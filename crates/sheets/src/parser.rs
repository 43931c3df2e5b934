use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::Value;

use funnel_core::{AdDailyRecord, SpendRecord, UserRecord};

use crate::normalize::{cell_bool, cell_f64, cell_str};
use crate::types::{IngestError, RawTable, Result};

pub const USERS_WORKSHEET: &str = "users";
pub const SPEND_WORKSHEET: &str = "spend";
pub const ADS_WORKSHEET: &str = "meta-ads-per-day";

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Parses a sheet date cell, keeping only the calendar date of a
/// space-separated timestamp. A parse failure is fatal for the load.
pub fn parse_sheet_date(raw: &str) -> Result<NaiveDate> {
    let token = raw.split_whitespace().next().ok_or_else(|| IngestError::Date {
        value: raw.to_string(),
    })?;
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(token, format).ok())
        .ok_or_else(|| IngestError::Date {
            value: raw.to_string(),
        })
}

pub fn users_from_table(table: &RawTable) -> Result<Vec<UserRecord>> {
    table
        .rows
        .iter()
        .map(|row| {
            Ok(UserRecord {
                created_at: date_cell(row, USERS_WORKSHEET, "created_at")?,
                first_business: cell_str(row, "first_business"),
                email: cell_str(row, "email"),
                given_name: cell_str(row, "given_name"),
                subscription_id: cell_str(row, "subscription.subscription_id"),
                is_appsumo: cell_bool(row, "subscription.is_appsumo"),
                has_post: cell_bool(row, "has_post").unwrap_or(false),
            })
        })
        .collect()
}

pub fn spend_from_table(table: &RawTable) -> Result<Vec<SpendRecord>> {
    table
        .rows
        .iter()
        .map(|row| {
            Ok(SpendRecord {
                charge_date: date_cell(row, SPEND_WORKSHEET, "charge_date")?,
                initial_spend: cell_f64(row, "initial_spend"),
                total_spend: cell_f64(row, "total_spend"),
            })
        })
        .collect()
}

pub fn ads_from_table(table: &RawTable) -> Result<Vec<AdDailyRecord>> {
    table
        .rows
        .iter()
        .map(|row| {
            Ok(AdDailyRecord {
                date: date_cell(row, ADS_WORKSHEET, "Day")?,
                amount_spent: cell_f64(row, "Amount spent (USD)"),
                link_clicks: cell_f64(row, "Link clicks"),
                cpc: cell_f64(row, "CPC (cost per link click)"),
                purchases: cell_f64(row, "Purchases"),
                cost_per_purchase: cell_f64(row, "Cost per purchase"),
            })
        })
        .collect()
}

fn date_cell(
    row: &BTreeMap<String, Value>,
    worksheet: &str,
    column: &str,
) -> Result<NaiveDate> {
    let raw = cell_str(row, column).ok_or_else(|| IngestError::MissingColumn {
        worksheet: worksheet.to_string(),
        column: column.to_string(),
    })?;
    parse_sheet_date(&raw)
}
