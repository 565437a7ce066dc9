//! # Calendar Engine
//!
//! Maps a reference instant (and optional IANA time zone) to the year's
//! progress: how many days the year has and how many of them have started.
//!
//! ## Day Counting
//!
//! The day ordinal is taken from the calendar date components (year, month,
//! day) in the chosen zone, never from elapsed milliseconds, so DST shifts
//! cannot move a date across a day boundary.
//!
//! ```text
//! ordinal = days_before_month[month] + day + (leap && month > 2)
//! filled  = min(ordinal, total)
//! percent = round_half_up(filled * 1000 / total) / 10   // "16.4"
//! ```

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{Result, YearDotsError};

/// Days elapsed before the first of each month in a common year.
const DAYS_BEFORE_MONTH: [u32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Progress through one calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearProgress {
    pub year: i32,
    /// Days in the year (365 or 366)
    pub total: u32,
    /// Days started so far, in `0..=total`
    pub filled: u32,
    /// `filled / total` as a percentage with exactly one fractional digit
    pub percent: String,
}

impl YearProgress {
    /// Progress as of the given calendar date.
    pub fn for_date(date: NaiveDate) -> Self {
        let year = date.year();
        let total = days_in_year(year);
        let filled = day_of_year(date).min(total);
        Self {
            year,
            total,
            filled,
            percent: format_percent(filled, total),
        }
    }

    /// Header line, e.g. `60/365`.
    pub fn fraction_text(&self) -> String {
        format!("{}/{}", self.filled, self.total)
    }

    /// Sub-header line, e.g. `16.4%`.
    pub fn percent_text(&self) -> String {
        format!("{}%", self.percent)
    }
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `year`.
pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// 1-indexed ordinal of `date` within its year.
pub fn day_of_year(date: NaiveDate) -> u32 {
    let month_index = date.month0() as usize;
    let leap_day = u32::from(is_leap_year(date.year()) && date.month() > 2);
    DAYS_BEFORE_MONTH[month_index] + date.day() + leap_day
}

/// Format `filled / total * 100` with one fractional digit, rounding halves
/// away from zero.
///
/// Integer arithmetic keeps the result exact (no binary float ties).
pub fn format_percent(filled: u32, total: u32) -> String {
    if total == 0 {
        return "0.0".to_string();
    }
    let scaled = u64::from(filled) * 1000;
    let total = u64::from(total);
    let mut tenths = scaled / total;
    if (scaled % total) * 2 >= total {
        tenths += 1;
    }
    format!("{}.{}", tenths / 10, tenths % 10)
}

/// Resolve the calendar date of `now` in `time_zone`.
///
/// `None` or an empty name means the process-local zone. IANA names match
/// in any letter case (`utc`, `america/santiago`). Anything else, including
/// names with surrounding whitespace, fails with
/// [`YearDotsError::InvalidTimeZone`]; there is no silent fallback to local
/// time.
pub fn calendar_date(now: DateTime<Utc>, time_zone: Option<&str>) -> Result<NaiveDate> {
    match time_zone.filter(|name| !name.is_empty()) {
        Some(name) => {
            let tz = Tz::from_str_insensitive(name)
                .map_err(|_| YearDotsError::InvalidTimeZone(name.to_string()))?;
            Ok(now.with_timezone(&tz).date_naive())
        }
        None => Ok(now.with_timezone(&Local).date_naive()),
    }
}

/// Compute year progress for `now` as seen in `time_zone`.
pub fn compute_year_progress(now: DateTime<Utc>, time_zone: Option<&str>) -> Result<YearProgress> {
    let date = calendar_date(now, time_zone)?;
    let progress = YearProgress::for_date(date);
    tracing::debug!(
        %date,
        year = progress.year,
        filled = progress.filled,
        total = progress.total,
        "computed year progress"
    );
    Ok(progress)
}
