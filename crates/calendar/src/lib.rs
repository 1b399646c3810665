//! # epicurves-calendar
//!
//! Pure date arithmetic for the epicurves reporting tool: day-of-year
//! conversion under an explicit reference day, signed day offsets, and
//! parsing of the `<month>--<day>` date-specifier token used by the
//! input table.
//!
//! ## Quick Start
//!
//! ```
//! use epicurves_calendar::{RefDay, parse_date_spec};
//!
//! let today = RefDay::new(2020, 3, 24).unwrap();
//! assert_eq!(today.offset_of(3, 15).unwrap(), -9);
//! assert_eq!(today.offset_label(-9), "15Mar");
//!
//! assert_eq!(parse_date_spec("3--15"), Some((3, 15)));
//! assert_eq!(parse_date_spec("lockdown^"), None);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `doy` | Day-of-year conversion, leap-year aware |
//! | `ref_day` | Reference day and offset arithmetic |
//! | `date_spec` | `<month>--<day>` token parsing |
//! | `error` | Error types |

mod date_spec;
mod doy;
mod error;
mod ref_day;

pub use date_spec::parse_date_spec;
pub use doy::{day_of_year, days_in_month, is_leap_year, year_length};
pub use error::CalendarError;
pub use ref_day::RefDay;
