// Date utility functions
// Parsing of post timestamps, the injectable clock and calendar-relative formatting

use chrono::{
    DateTime, Datelike, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
    Timelike, Weekday,
};
use thiserror::Error;

use crate::models::settings::{DateFormat, DisplaySettings, TimeFormat};

/// Raised when a post timestamp matches none of the accepted layouts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized post date: {input:?}")]
pub struct DateParseError {
    pub input: String,
}

const NAIVE_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a post timestamp.
///
/// Offsets are honoured when present (RFC 3339); naive timestamps and
/// bare dates are read in local time, bare dates at midnight.
pub fn parse_post_date(input: &str) -> Result<DateTime<Local>, DateParseError> {
    let trimmed = input.trim();
    let err = || DateParseError {
        input: input.to_string(),
    };

    if trimmed.is_empty() {
        return Err(err());
    }

    if let Ok(date) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(date.with_timezone(&Local));
    }

    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, layout) {
            return local_from_naive(naive).ok_or_else(err);
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| local_from_naive(date.and_time(NaiveTime::MIN)))
        .ok_or_else(err)
}

/// Resolve a wall-clock time in the local zone. Ambiguous times (DST fall
/// back) take the earlier instant; nonexistent times (spring forward) fail.
pub fn local_from_naive(naive: NaiveDateTime) -> Option<DateTime<Local>> {
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => None,
    }
}

/// Serialize a chosen instant the way it is handed back to the editor form
pub fn format_post_date(date: DateTime<Local>) -> String {
    date.to_rfc3339_opts(chrono::SecondsFormat::Secs, false)
}

/// Source of "now" for every relative computation
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock frozen at a given instant (tests, previews)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Local> {
        (**self).now()
    }
}

/// Format `date` relative to `now` at calendar-day granularity:
/// "Today at 3:30 PM", "Tomorrow at ...", "Last Monday at ...", falling
/// back to a short date more than a week away.
pub fn calendar_format(
    date: DateTime<Local>,
    now: DateTime<Local>,
    settings: &DisplaySettings,
) -> String {
    let days = (date.date_naive() - now.date_naive()).num_days();
    let time = format_time(date.time(), settings.time_format);

    match days {
        -6..=-2 => format!("Last {} at {}", weekday_name(date.weekday()), time),
        -1 => format!("Yesterday at {}", time),
        0 => format!("Today at {}", time),
        1 => format!("Tomorrow at {}", time),
        2..=6 => format!("{} at {}", weekday_name(date.weekday()), time),
        _ => format_short_date(date.date_naive(), settings.date_format),
    }
}

pub fn format_time(time: NaiveTime, format: TimeFormat) -> String {
    match format {
        TimeFormat::TwelveHour => {
            let (is_pm, hour) = time.hour12();
            format!(
                "{}:{:02} {}",
                hour,
                time.minute(),
                if is_pm { "PM" } else { "AM" }
            )
        }
        TimeFormat::TwentyFourHour => format!("{:02}:{:02}", time.hour(), time.minute()),
    }
}

pub fn format_short_date(date: NaiveDate, format: DateFormat) -> String {
    match format {
        DateFormat::MonthDayYear => date.format("%m/%d/%Y").to_string(),
        DateFormat::DayMonthYear => date.format("%d/%m/%Y").to_string(),
        DateFormat::YearMonthDay => date.format("%Y/%m/%d").to_string(),
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Move a date by whole months, clamping the day to the target month's length
pub fn shift_month(date: NaiveDate, delta: i32) -> NaiveDate {
    let months = date.year() * 12 + date.month0() as i32 + delta;
    let year = months.div_euclid(12);
    let month = months.rem_euclid(12) as u32 + 1;

    (1..=date.day())
        .rev()
        .find_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .unwrap_or(date)
}
