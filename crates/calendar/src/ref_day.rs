//! The reference day against which all observation offsets are computed.

use crate::doy::{self, MONTH_ABBREV, MONTH_NAME};
use crate::error::CalendarError;

/// The calendar date establishing offset zero for a whole run.
///
/// Constructed once at the program boundary (from the wall clock or an
/// explicit override) and passed by value everywhere a date-to-offset
/// conversion is needed; there is no process-global "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefDay {
    year: i32,
    month: u8,
    day: u8,
    doy: u16,
}

impl RefDay {
    /// Creates a reference day from a calendar date.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] or [`CalendarError::InvalidDay`]
    /// if the date does not exist in `year`.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        let doy = doy::day_of_year(year, month, day)?;
        Ok(Self {
            year,
            month,
            day,
            doy,
        })
    }

    /// The reference year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// The reference month (1..=12).
    pub fn month(self) -> u8 {
        self.month
    }

    /// The reference day within the month.
    pub fn day(self) -> u8 {
        self.day
    }

    /// The 1-based day-of-year of the reference day.
    pub fn day_of_year(self) -> u16 {
        self.doy
    }

    /// Maps a (month, day) pair under the reference year to a 1-based
    /// day-of-year.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError`] if the pair is not a valid date.
    pub fn doy_of(self, month: u8, day: u8) -> Result<u16, CalendarError> {
        doy::day_of_year(self.year, month, day)
    }

    /// Signed day offset of a (month, day) pair relative to the reference
    /// day: negative for past dates, positive for future ones.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError`] if the pair is not a valid date.
    pub fn offset_of(self, month: u8, day: u8) -> Result<i32, CalendarError> {
        Ok(self.doy_of(month, day)? as i32 - self.doy as i32)
    }

    /// Renders `reference day + offset` as a short date label such as
    /// `"25Mar"`, rolling over year boundaries as needed.
    pub fn offset_label(self, offset: i32) -> String {
        let (_, month, day) = self.add_days(offset);
        format!("{day:02}{}", MONTH_ABBREV[month as usize])
    }

    /// Renders the reference day itself as a long label such as
    /// `"25 March"`, for chart axis annotation.
    pub fn long_label(self) -> String {
        format!("{} {}", self.day, MONTH_NAME[self.month as usize])
    }

    /// Walks `offset` days forward or backward from the reference day.
    fn add_days(self, offset: i32) -> (i32, u8, u8) {
        let mut year = self.year;
        let mut doy = self.doy as i32 + offset;
        while doy < 1 {
            year -= 1;
            doy += doy::year_length(year) as i32;
        }
        while doy > doy::year_length(year) as i32 {
            doy -= doy::year_length(year) as i32;
            year += 1;
        }
        let (month, day) = doy::month_day(year, doy as u16);
        (year, month, day)
    }
}
