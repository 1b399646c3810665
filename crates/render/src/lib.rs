//! # epicurves-render
//!
//! Chart rendering for the case-curve report: four chart types built
//! from small configuration records, drawn with `plotters` into
//! timestamped PNG files.
//!
//! Regions opt into each chart through their `drawplotN` flags. A
//! region that cannot be prepared for a chart (missing configuration,
//! empty timeline, failed fit) is logged and skipped for that chart
//! only; other regions and other charts are unaffected. A chart with no
//! drawable regions produces no file.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//!
//! use epicurves_calendar::RefDay;
//! use epicurves_dataset::load_path;
//! use epicurves_render::{RenderOptions, render_report};
//!
//! let ref_day = RefDay::new(2020, 3, 24)?;
//! let regions = load_path(Path::new("cases.csv"), ref_day)?;
//! let options = RenderOptions {
//!     open_images: false,
//!     ..RenderOptions::default()
//! };
//! let written = render_report(&regions, ref_day, &options)?;
//! println!("wrote {} charts", written.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `chart` | The chart catalogue |
//! | `data` | Per-chart, per-region data preparation |
//! | `draw` | Plotters drawing (private) |
//! | `error` | Error types |

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, info, warn};

use epicurves_calendar::RefDay;
use epicurves_dataset::RegionRecord;

mod chart;
mod data;
mod draw;
mod error;

pub use chart::{CHARTS, ChartSpec, YScale};
pub use data::{Capacity, Extrapolation, RegionPanel, capacity_crossing, prepare_chart,
    prepare_region};
pub use error::RenderError;

/// Output settings for a report run.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Directory the PNG files are written into.
    pub output_dir: PathBuf,
    /// Whether to hand each finished file to the desktop image viewer.
    pub open_images: bool,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            open_images: true,
            width: 1280,
            height: 960,
        }
    }
}

/// Renders every chart in the catalogue and returns the paths written.
///
/// # Errors
///
/// Returns [`RenderError::Backend`] when a chart cannot be written at
/// all. Per-region problems never surface here; they are logged and the
/// affected region is dropped from the affected chart.
pub fn render_report(
    regions: &[RegionRecord],
    ref_day: RefDay,
    options: &RenderOptions,
) -> Result<Vec<PathBuf>, RenderError> {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let mut written = Vec::new();
    for spec in &CHARTS {
        let panels = data::prepare_chart(spec, regions, ref_day);
        if panels.is_empty() {
            debug!(chart = spec.name, "no drawable regions; chart skipped");
            continue;
        }

        let path = options
            .output_dir
            .join(format!("{}_{stamp}.png", spec.name));
        draw::render_chart(spec, &panels, ref_day, &path, options.width, options.height)?;
        info!(chart = spec.name, path = %path.display(), regions = panels.len(), "chart written");

        if options.open_images
            && let Err(e) = open::that(&path)
        {
            warn!(path = %path.display(), error = %e, "could not open image viewer");
        }
        written.push(path);
    }
    Ok(written)
}
