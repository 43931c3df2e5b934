use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    AdDailyRecord, DailySpend, FunnelFlag, MergedDailyRecord, Period, SpendRecord, UserRecord,
};

/// Funnel-stage fractions for one period bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelPctPoint {
    pub bucket: NaiveDate,
    pub pct_has_business: f64,
    pub pct_has_post: f64,
    pub pct_has_email: f64,
    pub pct_has_name: f64,
    pub pct_has_subscription: f64,
    pub pct_subscribed_x10: f64,
}

/// Funnel-stage user counts for one period bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelCountPoint {
    pub bucket: NaiveDate,
    pub has_business: u64,
    pub has_post: u64,
    pub has_email: u64,
    pub has_name: u64,
    pub has_subscription: u64,
}

/// Spend and acquisition-cost metrics for one period bucket. `cac` and `cpc`
/// are `None` when the period has no purchases or no clicks to weight by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendPoint {
    pub bucket: NaiveDate,
    pub initial_spend: Option<f64>,
    pub total_spend: Option<f64>,
    pub cac: Option<f64>,
    pub cpc: Option<f64>,
    pub ad_spend: f64,
}

/// Ad event counts for one period bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdCountPoint {
    pub bucket: NaiveDate,
    pub purchases: f64,
    pub clicks: Option<f64>,
}

/// Collapses charge rows to one row per calendar day, averaging the spend
/// amounts. Days without charges are absent from the output, not zero.
pub fn daily_spend(records: &[SpendRecord]) -> Vec<DailySpend> {
    let mut by_day: BTreeMap<NaiveDate, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for record in records {
        let entry = by_day.entry(record.charge_date).or_default();
        if let Some(value) = record.initial_spend {
            entry.0.push(value);
        }
        if let Some(value) = record.total_spend {
            entry.1.push(value);
        }
    }
    by_day
        .into_iter()
        .map(|(date, (initial, total))| DailySpend {
            date,
            initial_spend: mean(&initial),
            total_spend: mean(&total),
        })
        .collect()
}

/// Inner join of daily spend and ad-daily rows on date.
pub fn merge_daily(spend: &[DailySpend], ads: &[AdDailyRecord]) -> Vec<MergedDailyRecord> {
    let ads_by_date: BTreeMap<NaiveDate, &AdDailyRecord> =
        ads.iter().map(|record| (record.date, record)).collect();
    spend
        .iter()
        .filter_map(|day| {
            let ad = ads_by_date.get(&day.date)?;
            Some(MergedDailyRecord {
                date: day.date,
                initial_spend: day.initial_spend,
                total_spend: day.total_spend,
                amount_spent: ad.amount_spent,
                link_clicks: ad.link_clicks,
                cpc: ad.cpc,
                purchases: ad.purchases,
                cost_per_purchase: ad.cost_per_purchase,
            })
        })
        .collect()
}

pub fn resample_funnel_pct(users: &[UserRecord], period: Period) -> Vec<FunnelPctPoint> {
    bucket_users(users, period)
        .into_iter()
        .map(|(bucket, group)| {
            let pct_has_subscription = flag_mean(&group, FunnelFlag::HasSubscription);
            FunnelPctPoint {
                bucket,
                pct_has_business: flag_mean(&group, FunnelFlag::HasBusiness),
                pct_has_post: flag_mean(&group, FunnelFlag::HasPost),
                pct_has_email: flag_mean(&group, FunnelFlag::HasEmail),
                pct_has_name: flag_mean(&group, FunnelFlag::HasName),
                pct_has_subscription,
                pct_subscribed_x10: pct_has_subscription * 10.0,
            }
        })
        .collect()
}

pub fn resample_funnel_counts(users: &[UserRecord], period: Period) -> Vec<FunnelCountPoint> {
    bucket_users(users, period)
        .into_iter()
        .map(|(bucket, group)| FunnelCountPoint {
            bucket,
            has_business: flag_count(&group, FunnelFlag::HasBusiness),
            has_post: flag_count(&group, FunnelFlag::HasPost),
            has_email: flag_count(&group, FunnelFlag::HasEmail),
            has_name: flag_count(&group, FunnelFlag::HasName),
            has_subscription: flag_count(&group, FunnelFlag::HasSubscription),
        })
        .collect()
}

pub fn resample_spend(merged: &[MergedDailyRecord], period: Period) -> Vec<SpendPoint> {
    bucket_merged(merged, period)
        .into_iter()
        .map(|(bucket, group)| SpendPoint {
            bucket,
            initial_spend: mean_of(&group, |row| row.initial_spend),
            total_spend: mean_of(&group, |row| row.total_spend),
            cac: weighted_average(
                group
                    .iter()
                    .map(|row| (row.cost_per_purchase, row.purchases)),
            ),
            cpc: weighted_average(group.iter().map(|row| (row.cpc, row.link_clicks))),
            ad_spend: sum_of(&group, |row| row.amount_spent),
        })
        .collect()
}

pub fn resample_ad_counts(merged: &[MergedDailyRecord], period: Period) -> Vec<AdCountPoint> {
    bucket_merged(merged, period)
        .into_iter()
        .map(|(bucket, group)| AdCountPoint {
            bucket,
            purchases: sum_of(&group, |row| row.purchases),
            // Clicks are averaged, not summed, matching the sheet dashboard.
            clicks: mean_of(&group, |row| row.link_clicks),
        })
        .collect()
}

/// Weight-proportional average of `(rate, weight)` pairs. Rows without a
/// weight are skipped; rows with a weight but no rate still count toward the
/// denominator. A zero weight sum yields `None`, never a NaN.
pub fn weighted_average<I>(pairs: I) -> Option<f64>
where
    I: IntoIterator<Item = (Option<f64>, Option<f64>)>,
{
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (rate, weight) in pairs {
        if let Some(weight) = weight {
            denominator += weight;
            if let Some(rate) = rate {
                numerator += rate * weight;
            }
        }
    }
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}

fn bucket_users(users: &[UserRecord], period: Period) -> BTreeMap<NaiveDate, Vec<&UserRecord>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<&UserRecord>> = BTreeMap::new();
    for user in users {
        buckets
            .entry(period.bucket_start(user.created_at))
            .or_default()
            .push(user);
    }
    buckets
}

fn bucket_merged(
    merged: &[MergedDailyRecord],
    period: Period,
) -> BTreeMap<NaiveDate, Vec<&MergedDailyRecord>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<&MergedDailyRecord>> = BTreeMap::new();
    for row in merged {
        buckets
            .entry(period.bucket_start(row.date))
            .or_default()
            .push(row);
    }
    buckets
}

fn flag_count(users: &[&UserRecord], flag: FunnelFlag) -> u64 {
    users.iter().filter(|user| flag.applies(user)).count() as u64
}

fn flag_mean(users: &[&UserRecord], flag: FunnelFlag) -> f64 {
    if users.is_empty() {
        return 0.0;
    }
    flag_count(users, flag) as f64 / users.len() as f64
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn mean_of<F>(rows: &[&MergedDailyRecord], field: F) -> Option<f64>
where
    F: Fn(&MergedDailyRecord) -> Option<f64>,
{
    let values: Vec<f64> = rows.iter().filter_map(|row| field(row)).collect();
    mean(&values)
}

fn sum_of<F>(rows: &[&MergedDailyRecord], field: F) -> f64
where
    F: Fn(&MergedDailyRecord) -> Option<f64>,
{
    rows.iter().filter_map(|row| field(row)).sum()
}
