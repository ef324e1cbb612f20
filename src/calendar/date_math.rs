use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DateError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

pub const DATE_FORMAT: &str = "%Y-%m-%d";

const LAST_MILLISECOND: NaiveTime = match NaiveTime::from_hms_milli_opt(23, 59, 59, 999) {
    Some(time) => time,
    None => NaiveTime::MIN,
};

/// Parses an ISO calendar date. A trailing time component
/// (`2024-08-01T10:00:00`, `2024-08-01 10:00`) is accepted and dropped.
pub fn parse_date(value: &str) -> Result<NaiveDate, DateError> {
    let trimmed = value.trim();
    let date_part = trimmed
        .split(['T', ' '])
        .next()
        .unwrap_or(trimmed);

    NaiveDate::parse_from_str(date_part, DATE_FORMAT)
        .map_err(|_| DateError::InvalidDate(value.to_string()))
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(LAST_MILLISECOND)
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(date.day0() as u64)
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    start_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Adds `n` calendar months, clamping the day to the length of the target
/// month (Jan 31 + 1 month is the last day of February).
pub fn add_months(date: NaiveDate, n: i32) -> Result<NaiveDate, DateError> {
    let shifted = if n >= 0 {
        date.checked_add_months(Months::new(n.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(n.unsigned_abs()))
    };

    shifted.ok_or_else(|| DateError::InvalidDate(format!("{} {:+} months", date, n)))
}

pub fn add_days(date: NaiveDate, n: u64) -> Result<NaiveDate, DateError> {
    date.checked_add_days(Days::new(n))
        .ok_or_else(|| DateError::InvalidDate(format!("{} + {} days", date, n)))
}

/// Number of calendar days from `a` to `b`, counting both ends.
pub fn day_count(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days() + 1
}

pub fn is_before(a: NaiveDate, b: NaiveDate) -> bool {
    a < b
}

pub fn is_same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}
