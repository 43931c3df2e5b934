use std::sync::Arc;

use crate::error::Result;
use crate::services::SharedConfig;
use funnel_core::{
    AdCountPoint, ChartMarker, FunnelCountPoint, FunnelPctPoint, MergedDailyRecord, Period,
    SUNDAY_OVERLAY_YEAR, SpendPoint, UserRecord, business_events, daily_spend, event_color,
    merge_daily, resample_ad_counts, resample_funnel_counts, resample_funnel_pct, resample_spend,
    sundays_in_year, users_after_cutoff,
};
use sheets::{
    ADS_WORKSHEET, RawTable, SPEND_WORKSHEET, TableCache, USERS_WORKSHEET, ads_from_table,
    normalize, spend_from_table, users_from_table,
};

/// Typed snapshot of the three worksheets after cleaning, the cutoff filter,
/// daily averaging and the inner join. Rebuilt per request from cached raw
/// tables.
pub struct Dataset {
    pub users: Vec<UserRecord>,
    pub merged: Vec<MergedDailyRecord>,
}

#[derive(Clone)]
pub struct AnalyticsService {
    config: SharedConfig,
    cache: Arc<TableCache>,
}

impl AnalyticsService {
    pub(super) fn new(config: SharedConfig, cache: Arc<TableCache>) -> Self {
        Self { config, cache }
    }

    fn worksheet(&self, name: &str) -> Result<RawTable> {
        let raw = self.cache.get(&self.config.workbook, name)?;
        Ok(normalize((*raw).clone()))
    }

    pub fn dataset(&self) -> Result<Dataset> {
        let users = users_from_table(&self.worksheet(USERS_WORKSHEET)?)?;
        let spend = spend_from_table(&self.worksheet(SPEND_WORKSHEET)?)?;
        let ads = ads_from_table(&self.worksheet(ADS_WORKSHEET)?)?;
        Ok(Dataset {
            users: users_after_cutoff(users),
            merged: merge_daily(&daily_spend(&spend), &ads),
        })
    }

    pub fn user_funnel(&self, period: Period) -> Result<Vec<FunnelPctPoint>> {
        Ok(resample_funnel_pct(&self.dataset()?.users, period))
    }

    pub fn funnel_counts(&self, period: Period) -> Result<Vec<FunnelCountPoint>> {
        Ok(resample_funnel_counts(&self.dataset()?.users, period))
    }

    pub fn spend_series(&self, period: Period) -> Result<Vec<SpendPoint>> {
        Ok(resample_spend(&self.dataset()?.merged, period))
    }

    pub fn ad_counts(&self, period: Period) -> Result<Vec<AdCountPoint>> {
        Ok(resample_ad_counts(&self.dataset()?.merged, period))
    }

    /// Vertical reference lines for the current view: the fixed business
    /// events always, plus the Sunday overlay for the daily period when
    /// enabled, truncated at the last merged date.
    pub fn markers(&self, period: Period, show_sundays: bool) -> Result<Vec<ChartMarker>> {
        let mut markers: Vec<ChartMarker> = business_events()
            .into_iter()
            .map(|event| ChartMarker {
                name: Some(event.name.to_string()),
                date: event.date,
                color: event_color(event.name).to_string(),
                dash: "dash".to_string(),
                opacity: 1.0,
            })
            .collect();

        if period == Period::Daily && show_sundays {
            let last_merged = self.dataset()?.merged.last().map(|row| row.date);
            if let Some(last) = last_merged {
                for sunday in sundays_in_year(SUNDAY_OVERLAY_YEAR) {
                    if sunday > last {
                        break;
                    }
                    markers.push(ChartMarker {
                        name: None,
                        date: sunday,
                        color: "blue".to_string(),
                        dash: "dash".to_string(),
                        opacity: 0.1,
                    });
                }
            }
        }

        Ok(markers)
    }
}
