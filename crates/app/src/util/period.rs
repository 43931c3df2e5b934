use crate::config::PeriodParams;
use crate::error::{AppError, Result};
use funnel_core::Period;

/// Resolves the user-facing grouping selector. The Sunday toggle defaults on
/// and only applies to the daily period.
pub fn resolve_period(params: &PeriodParams) -> Result<(Period, bool)> {
    let period = match params.period.as_deref().unwrap_or("daily") {
        "daily" => Period::Daily,
        "weekly" => Period::Weekly,
        "monthly" => Period::Monthly,
        value => {
            return Err(AppError::InvalidInput(format!(
                "unsupported period {}",
                value
            )));
        }
    };
    let show_sundays = period == Period::Daily && params.show_sundays.unwrap_or(true);
    Ok((period, show_sundays))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_daily_with_sundays() {
        let (period, show_sundays) = resolve_period(&PeriodParams::default()).expect("resolve");
        assert_eq!(period, Period::Daily);
        assert!(show_sundays);
    }

    #[test]
    fn sunday_toggle_is_ignored_outside_daily() {
        let params = PeriodParams {
            period: Some("weekly".to_string()),
            show_sundays: Some(true),
        };
        let (period, show_sundays) = resolve_period(&params).expect("resolve");
        assert_eq!(period, Period::Weekly);
        assert!(!show_sundays);
    }

    #[test]
    fn sunday_toggle_can_be_disabled() {
        let params = PeriodParams {
            period: Some("daily".to_string()),
            show_sundays: Some(false),
        };
        let (_, show_sundays) = resolve_period(&params).expect("resolve");
        assert!(!show_sundays);
    }

    #[test]
    fn unknown_period_is_invalid_input() {
        let params = PeriodParams {
            period: Some("hourly".to_string()),
            show_sundays: None,
        };
        assert!(matches!(
            resolve_period(&params),
            Err(AppError::InvalidInput(_))
        ));
    }
}
