//! Calendar date parsing and the query clock.
//!
//! Dataset dates are ISO 8601 full dates (`YYYY-MM-DD`) or year-month pairs
//! (`YYYY-MM`). A year-month pair stands for the last day of that month.
//!
//! ```
//! use chrono::NaiveDate;
//! use distro_info_core::parse_date;
//!
//! assert_eq!(parse_date("2024-02").unwrap(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
//! assert!(parse_date("2024").is_err());
//! ```

use chrono::{NaiveDate, Utc};

use crate::error::DataError;

/// Parses a `YYYY-MM-DD` or `YYYY-MM` date.
///
/// # Errors
///
/// Returns [`DataError::InvalidDate`] for any other shape, for non-numeric
/// parts, and for days that do not exist in the calendar.
pub fn parse_date(value: &str) -> Result<NaiveDate, DataError> {
    let invalid = || DataError::InvalidDate {
        value: value.to_string(),
    };

    let parts = value
        .trim()
        .split('-')
        .map(|part| part.parse::<u32>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>, _>>()?;

    let date = match parts.as_slice() {
        [year, month, day] => {
            let year = i32::try_from(*year).map_err(|_| invalid())?;
            NaiveDate::from_ymd_opt(year, *month, *day)
        }
        [year, month] => {
            let year = i32::try_from(*year).map_err(|_| invalid())?;
            last_day_of_month(year, *month)
        }
        _ => None,
    };

    date.ok_or_else(invalid)
}

/// Parses an optional date column; a blank value means "not set".
///
/// # Errors
///
/// Same as [`parse_date`] for non-blank input.
pub fn parse_optional_date(value: &str) -> Result<Option<NaiveDate>, DataError> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        parse_date(value).map(Some)
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    if !(1..=12).contains(&month) {
        return None;
    }
    if month == 12 {
        return NaiveDate::from_ymd_opt(year, 12, 31);
    }
    NaiveDate::from_ymd_opt(year, month.checked_add(1)?, 1)?.pred_opt()
}

/// Source of "today" for queries called without an explicit date.
///
/// Engines consult the clock on every such call, never at construction.
pub trait Clock {
    /// The current calendar date.
    fn today(&self) -> NaiveDate;
}

/// Reads the UTC calendar date from the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// A clock frozen on one date.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use distro_info_core::{Clock, FixedClock};
///
/// let day = NaiveDate::from_ymd_opt(2012, 5, 1).unwrap();
/// assert_eq!(FixedClock(day).today(), day);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
