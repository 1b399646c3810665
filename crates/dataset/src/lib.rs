//! # epicurves-dataset
//!
//! Typed ingestion of the per-region epidemic spreadsheet: suffix-driven
//! field parsing, per-region case timelines, and the whole-table loader.
//!
//! ## Quick Start
//!
//! ```
//! use epicurves_calendar::RefDay;
//! use epicurves_dataset::load_from_reader;
//!
//! let table = "\
//! region,Alpha
//! county_name,Alpha County
//! drawplot0#,1
//! 3--15,100
//! 3--20,400
//! ";
//! let ref_day = RefDay::new(2020, 3, 24).unwrap();
//! let regions = load_from_reader(table.as_bytes(), ref_day).unwrap();
//! assert_eq!(regions[0].timeline().len(), 2);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `field` | Suffix-driven typed cell parsing |
//! | `timeline` | Per-region observation collections |
//! | `region` | Region configuration records |
//! | `loader` | Whole-table CSV ingestion |
//! | `error` | Error types |

mod error;
mod field;
mod loader;
mod region;
mod timeline;

pub use error::DatasetError;
pub use field::{FieldType, FieldValue};
pub use loader::{load_from_reader, load_path};
pub use region::{RECOGNIZED_FIELDS, RegionRecord};
pub use timeline::{Observation, Timeline};
