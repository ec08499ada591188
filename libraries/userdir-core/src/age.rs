//! Age computation from ISO birth dates

use crate::error::{CoreError, Result};
use chrono::{Datelike, NaiveDate};

/// Parse an ISO `YYYY-MM-DD` birth date.
///
/// A trailing time component (`2000-06-15T00:00:00`) is ignored.
pub fn parse_birth_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| CoreError::InvalidDate(raw.to_string()))
}

/// Whole years between `birth` and `today`.
///
/// The calendar-year difference is reduced by one while today's month/day
/// precedes the birth month/day. Birth dates in the future yield negative ages.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}
