use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

pub mod markers;
pub mod resample;

pub use markers::{
    ChartMarker, EventMarker, SUNDAY_OVERLAY_YEAR, business_events, event_color, sundays_in_year,
};
pub use resample::{
    AdCountPoint, FunnelCountPoint, FunnelPctPoint, SpendPoint, daily_spend, merge_daily,
    resample_ad_counts, resample_funnel_counts, resample_funnel_pct, resample_spend,
    weighted_average,
};

/// One registered user, as exported from the `users` worksheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub created_at: NaiveDate,
    pub first_business: Option<String>,
    pub email: Option<String>,
    pub given_name: Option<String>,
    pub subscription_id: Option<String>,
    pub is_appsumo: Option<bool>,
    pub has_post: bool,
}

/// One billing charge. Several charges may share a charge date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpendRecord {
    pub charge_date: NaiveDate,
    pub initial_spend: Option<f64>,
    pub total_spend: Option<f64>,
}

/// One calendar day of ad-platform activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdDailyRecord {
    pub date: NaiveDate,
    pub amount_spent: Option<f64>,
    pub link_clicks: Option<f64>,
    pub cpc: Option<f64>,
    pub purchases: Option<f64>,
    pub cost_per_purchase: Option<f64>,
}

/// Per-day average of the charges sharing a charge date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySpend {
    pub date: NaiveDate,
    pub initial_spend: Option<f64>,
    pub total_spend: Option<f64>,
}

/// Inner join of [`DailySpend`] and [`AdDailyRecord`] on date. Days missing
/// from either side are dropped, so the series may have gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedDailyRecord {
    pub date: NaiveDate,
    pub initial_spend: Option<f64>,
    pub total_spend: Option<f64>,
    pub amount_spent: Option<f64>,
    pub link_clicks: Option<f64>,
    pub cpc: Option<f64>,
    pub purchases: Option<f64>,
    pub cost_per_purchase: Option<f64>,
}

/// Calendar-aligned grouping interval for resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
}

impl Period {
    /// Maps a date to the first day of its bucket: the day itself, the Monday
    /// of its week, or the first of its month.
    pub fn bucket_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Daily => date,
            Self::Weekly => {
                let back = date.weekday().num_days_from_monday() as u64;
                date.checked_sub_days(Days::new(back)).unwrap_or(date)
            }
            Self::Monthly => date.with_day(1).unwrap_or(date),
        }
    }
}

/// Named boolean milestone in a user's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunnelFlag {
    HasBusiness,
    HasPost,
    HasEmail,
    HasName,
    HasSubscription,
}

impl FunnelFlag {
    /// Funnel ordering as plotted, top of the funnel first.
    pub const ALL: [FunnelFlag; 5] = [
        FunnelFlag::HasBusiness,
        FunnelFlag::HasPost,
        FunnelFlag::HasEmail,
        FunnelFlag::HasName,
        FunnelFlag::HasSubscription,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::HasBusiness => "has_business",
            Self::HasPost => "has_post",
            Self::HasEmail => "has_email",
            Self::HasName => "has_name",
            Self::HasSubscription => "has_subscription",
        }
    }

    /// Whether the user has reached this funnel stage. A subscription only
    /// counts when it is explicitly marked as not appsumo-sourced; a
    /// promotional or unknown source is not a paid subscriber.
    pub fn applies(&self, user: &UserRecord) -> bool {
        match self {
            Self::HasBusiness => user.first_business.is_some(),
            Self::HasPost => user.has_post,
            Self::HasEmail => user.email.is_some(),
            Self::HasName => user.given_name.is_some(),
            Self::HasSubscription => {
                user.subscription_id.is_some() && user.is_appsumo == Some(false)
            }
        }
    }
}

/// Start of the analysis window. Users created on or before this date are
/// excluded from every funnel series.
pub fn funnel_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid cutoff date")
}

pub fn users_after_cutoff(users: Vec<UserRecord>) -> Vec<UserRecord> {
    let cutoff = funnel_cutoff();
    users
        .into_iter()
        .filter(|user| user.created_at > cutoff)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn subscriber() -> UserRecord {
        UserRecord {
            created_at: date(2024, 2, 1),
            subscription_id: Some("sub_123".to_string()),
            is_appsumo: Some(false),
            ..UserRecord::default()
        }
    }

    #[test]
    fn has_business_requires_business_link() {
        let mut user = UserRecord::default();
        assert!(!FunnelFlag::HasBusiness.applies(&user));
        user.first_business = Some("biz_1".to_string());
        assert!(FunnelFlag::HasBusiness.applies(&user));
    }

    #[test]
    fn has_email_and_name_track_their_fields() {
        let user = UserRecord {
            email: Some("a@b.co".to_string()),
            given_name: None,
            ..UserRecord::default()
        };
        assert!(FunnelFlag::HasEmail.applies(&user));
        assert!(!FunnelFlag::HasName.applies(&user));
    }

    #[test]
    fn has_subscription_requires_paid_subscription() {
        assert!(FunnelFlag::HasSubscription.applies(&subscriber()));
    }

    #[test]
    fn appsumo_subscription_does_not_count() {
        let mut user = subscriber();
        user.is_appsumo = Some(true);
        assert!(!FunnelFlag::HasSubscription.applies(&user));
    }

    #[test]
    fn unknown_subscription_source_does_not_count() {
        let mut user = subscriber();
        user.is_appsumo = None;
        assert!(!FunnelFlag::HasSubscription.applies(&user));
    }

    #[test]
    fn subscription_id_required_even_when_not_appsumo() {
        let mut user = subscriber();
        user.subscription_id = None;
        assert!(!FunnelFlag::HasSubscription.applies(&user));
    }

    #[test]
    fn weekly_bucket_starts_on_monday() {
        // 2024-03-01 is a Friday; its week starts 2024-02-26.
        assert_eq!(
            Period::Weekly.bucket_start(date(2024, 3, 1)),
            date(2024, 2, 26)
        );
        assert_eq!(
            Period::Weekly.bucket_start(date(2024, 2, 26)),
            date(2024, 2, 26)
        );
    }

    #[test]
    fn monthly_bucket_starts_on_first() {
        assert_eq!(
            Period::Monthly.bucket_start(date(2024, 3, 15)),
            date(2024, 3, 1)
        );
    }

    #[test]
    fn daily_bucket_is_identity() {
        assert_eq!(
            Period::Daily.bucket_start(date(2024, 3, 15)),
            date(2024, 3, 15)
        );
    }

    #[test]
    fn cutoff_excludes_boundary_day() {
        let users = vec![
            UserRecord {
                created_at: date(2024, 1, 1),
                ..UserRecord::default()
            },
            UserRecord {
                created_at: date(2024, 1, 2),
                ..UserRecord::default()
            },
            UserRecord {
                created_at: date(2023, 12, 31),
                ..UserRecord::default()
            },
        ];
        let kept = users_after_cutoff(users);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].created_at, date(2024, 1, 2));
    }
}
