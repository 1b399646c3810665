//! Day-of-year conversions for the Gregorian calendar.

use crate::error::CalendarError;

/// Number of days in each month of a common year (index 0 unused,
/// index 1 = January, ..., index 12 = December).
pub(crate) const DAYS_PER_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Day-of-year on which each month starts in a common year (index 0 unused,
/// index 1 = January starts at DOY 1, ...).
pub(crate) const MONTH_START_DOY: [u16; 13] =
    [0, 1, 32, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];

/// Three-letter month abbreviations (index 0 unused).
pub(crate) const MONTH_ABBREV: [&str; 13] = [
    "", "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Full month names (index 0 unused).
pub(crate) const MONTH_NAME: [&str; 13] = [
    "",
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Returns true if `year` is a Gregorian leap year.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `year` (365 or 366).
pub fn year_length(year: i32) -> u16 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Number of days in the given month of the given year.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1..=12.
pub fn days_in_month(year: i32, month: u8) -> Result<u8, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth { month });
    }
    let mut days = DAYS_PER_MONTH[month as usize];
    if month == 2 && is_leap_year(year) {
        days += 1;
    }
    Ok(days)
}

/// Maps a (month, day) pair to a 1-based day-of-year under `year`.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1..=12.
/// Returns [`CalendarError::InvalidDay`] if `day` is not valid for the
/// given month and year.
pub fn day_of_year(year: i32, month: u8, day: u8) -> Result<u16, CalendarError> {
    let max_day = days_in_month(year, month)?;
    if !(1..=max_day).contains(&day) {
        return Err(CalendarError::InvalidDay {
            day,
            month,
            max_day,
        });
    }
    let mut doy = MONTH_START_DOY[month as usize] + day as u16 - 1;
    if month > 2 && is_leap_year(year) {
        doy += 1;
    }
    Ok(doy)
}

/// Maps a 1-based day-of-year back to its (month, day) pair under `year`.
///
/// `doy` must be in `1..=year_length(year)`; this is an internal helper and
/// callers uphold the bound.
pub(crate) fn month_day(year: i32, doy: u16) -> (u8, u8) {
    debug_assert!((1..=year_length(year)).contains(&doy));
    let mut remaining = doy;
    for month in 1..=12u8 {
        let len = DAYS_PER_MONTH[month as usize] as u16
            + if month == 2 && is_leap_year(year) { 1 } else { 0 };
        if remaining <= len {
            return (month, remaining as u8);
        }
        remaining -= len;
    }
    (12, 31)
}
