//! Date parsing for listing filters.

use chrono::{Days, NaiveDate, NaiveDateTime};

use crate::server::error::planet_system::PlanetSystemError;

/// Parses a `YYYY-MM-DD` date.
///
/// # Returns
/// - `Ok(NaiveDate)` - The parsed date
/// - `Err(PlanetSystemError::InvalidDate)` - Input is not a valid calendar date
pub fn parse_date(value: &str) -> Result<NaiveDate, PlanetSystemError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| PlanetSystemError::InvalidDate(value.to_string()))
}

/// Start of the given day.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(chrono::NaiveTime::MIN)
}

/// Start of the day after `date`, used as an exclusive upper bound so the whole day is included.
pub fn start_of_next_day(date: NaiveDate) -> Result<NaiveDateTime, PlanetSystemError> {
    date.checked_add_days(Days::new(1))
        .map(start_of_day)
        .ok_or_else(|| PlanetSystemError::InvalidDate(date.to_string()))
}
