use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// The Sunday overlay is pinned to this year, matching the analysis window.
pub const SUNDAY_OVERLAY_YEAR: i32 = 2024;

/// A vertical reference line as consumed by the chart renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartMarker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub date: NaiveDate,
    pub color: String,
    pub dash: String,
    pub opacity: f64,
}

/// A named business event pinned to a calendar date, drawn as a vertical
/// reference line on every chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventMarker {
    pub name: &'static str,
    pub date: NaiveDate,
}

/// Fixed deal and landing-page milestones overlaid on the dashboard.
pub fn business_events() -> Vec<EventMarker> {
    vec![
        EventMarker {
            name: "Trial-Deal End",
            date: day(2024, 1, 25),
        },
        EventMarker {
            name: "Appsumo Start",
            date: day(2024, 3, 18),
        },
        EventMarker {
            name: "Appsumo End",
            date: day(2024, 5, 20),
        },
        EventMarker {
            name: "New Landing?",
            date: day(2024, 6, 4),
        },
        EventMarker {
            name: "$1-Deal Start",
            date: day(2024, 3, 24),
        },
        EventMarker {
            name: "$1-Deal End",
            date: day(2024, 6, 4),
        },
    ]
}

/// "start" events render green, everything else red.
pub fn event_color(name: &str) -> &'static str {
    if name.to_lowercase().contains("start") {
        "green"
    } else {
        "red"
    }
}

/// Every Sunday of the given year, ascending.
pub fn sundays_in_year(year: i32) -> Vec<NaiveDate> {
    let Some(first) = NaiveDate::from_ymd_opt(year, 1, 1) else {
        return Vec::new();
    };
    let forward = 6 - first.weekday().num_days_from_monday() as u64;
    let mut current = first.checked_add_days(Days::new(forward));
    let mut sundays = Vec::new();
    while let Some(sunday) = current {
        if sunday.year() != year {
            break;
        }
        sundays.push(sunday);
        current = sunday.checked_add_days(Days::new(7));
    }
    sundays
}

fn day(year: i32, month: u32, date: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, date).expect("valid marker date")
}
