//! Per-chart, per-region data preparation.
//!
//! Everything a chart needs from a region — the observed series, the
//! fitted extrapolation, the capacity overlay parameters — is assembled
//! here into plain value types before any drawing happens, so the
//! missing-field and fit-failure policies live in one testable place.

use tracing::warn;

use epicurves_calendar::RefDay;
use epicurves_dataset::RegionRecord;
use epicurves_fit::{ExpFit, project};

use crate::chart::ChartSpec;
use crate::error::RenderError;

/// A fitted extrapolation for one region on one chart.
#[derive(Debug, Clone)]
pub struct Extrapolation {
    /// Projected (offset, value) points, sorted ascending by offset.
    pub points: Vec<(f64, f64)>,
    /// The fitted parameters.
    pub fit: ExpFit,
    /// Days for the fitted trajectory to double; negative or infinite
    /// when the trend is non-growing.
    pub doubling_time: f64,
    /// Earliest offset included in the fit (the extrapolation epoch).
    pub start_offset: i32,
    /// Short date label of the epoch, e.g. `"14Mar"`.
    pub start_label: String,
}

/// Capacity overlay parameters for one region.
#[derive(Debug, Clone, Copy)]
pub struct Capacity {
    /// Fraction of cases expected to need ICU care.
    pub icu_fraction: f64,
    /// Fraction of cases expected to need hospitalisation.
    pub hosp_fraction: f64,
    /// Ventilator count.
    pub ventilators: f64,
    /// High estimate of the open-ICU share of ventilators.
    pub icu_open_hi: f64,
    /// Low estimate of the open-ICU share of ventilators.
    pub icu_open_lo: f64,
    /// Staffed hospital beds.
    pub staffed_beds: f64,
}

/// Everything the renderer needs for one region on one chart.
#[derive(Debug, Clone)]
pub struct RegionPanel {
    /// Full region name (chart titles).
    pub name: String,
    /// Short label drawn next to the series.
    pub shortname: String,
    /// Observed (offset, value) points, sorted ascending by offset.
    pub observed: Vec<(f64, f64)>,
    /// Lockdown marker position, when configured and observable.
    pub lockdown: Option<(f64, f64)>,
    /// Fitted extrapolation, for charts that draw one.
    pub extrapolation: Option<Extrapolation>,
    /// Capacity overlay parameters, for charts that draw them.
    pub capacity: Option<Capacity>,
}

/// Assembles the panels for one chart, applying the per-region error
/// policy: a region that cannot be prepared is dropped from this chart
/// with a warning, leaving other regions and other charts untouched.
pub fn prepare_chart(
    spec: &ChartSpec,
    regions: &[RegionRecord],
    ref_day: RefDay,
) -> Vec<RegionPanel> {
    let mut panels = Vec::new();
    for region in regions.iter().filter(|r| r.draws_chart(spec.index)) {
        match prepare_region(spec, region, ref_day) {
            Ok(panel) => panels.push(panel),
            Err(e) if e.is_per_region() => {
                warn!(
                    region = region.display_name(),
                    chart = spec.name,
                    error = %e,
                    "skipping region for this chart"
                );
            }
            Err(e) => {
                // Non-per-region errors cannot arise during preparation,
                // but do not silently swallow one if that changes.
                warn!(chart = spec.name, error = %e, "unexpected preparation error");
            }
        }
    }
    panels
}

/// Prepares one region for one chart.
///
/// # Errors
///
/// Returns the per-region [`RenderError`] variants described on the
/// error type; the caller decides whether they abort anything.
pub fn prepare_region(
    spec: &ChartSpec,
    region: &RegionRecord,
    ref_day: RefDay,
) -> Result<RegionPanel, RenderError> {
    let region_name = region.display_name().to_string();

    let (offsets, values) = region.timeline().series(None);
    if offsets.is_empty() {
        return Err(RenderError::NoObservations {
            region: region_name,
        });
    }
    let observed: Vec<(f64, f64)> = offsets
        .iter()
        .zip(&values)
        .map(|(&t, &v)| (t as f64, v))
        .collect();

    let name = require(region.county_name(), &region_name, "county_name", spec)?.to_string();
    let shortname = require(region.shortname(), &region_name, "shortname", spec)?.to_string();

    let lockdown = lockdown_marker(region, ref_day, &observed);

    let extrapolation = if spec.extrapolate {
        Some(prepare_extrapolation(spec, region, ref_day, &region_name)?)
    } else {
        None
    };

    let capacity = if spec.capacity_overlays {
        Some(Capacity {
            icu_fraction: require(region.icu_fraction(), &region_name, "icu_fraction", spec)?,
            hosp_fraction: require(region.hosp_fraction(), &region_name, "hosp_fraction", spec)?,
            ventilators: require(region.ventilators(), &region_name, "ventilators", spec)? as f64,
            icu_open_hi: require(region.icu_open_hi(), &region_name, "icu_open_hi", spec)?,
            icu_open_lo: require(region.icu_open_lo(), &region_name, "icu_open_lo", spec)?,
            staffed_beds: require(region.staffed_beds(), &region_name, "staffed_beds", spec)?
                as f64,
        })
    } else {
        None
    };

    Ok(RegionPanel {
        name,
        shortname,
        observed,
        lockdown,
        extrapolation,
        capacity,
    })
}

fn prepare_extrapolation(
    spec: &ChartSpec,
    region: &RegionRecord,
    ref_day: RefDay,
    region_name: &str,
) -> Result<Extrapolation, RenderError> {
    let (from_month, from_day) = require(region.project_from(), region_name, "project_from", spec)?;
    let horizon = require(region.project_ndays(), region_name, "project_ndays", spec)?;

    let cutoff =
        ref_day
            .doy_of(from_month, from_day)
            .map_err(|e| RenderError::InvalidConfiguration {
                region: region_name.to_string(),
                field: "project_from",
                reason: e.to_string(),
            })?;

    let (offsets, values) = region.timeline().series(Some(cutoff));
    let projection = project(&offsets, &values, horizon as i32).map_err(|source| {
        RenderError::Fit {
            region: region_name.to_string(),
            source,
        }
    })?;

    // series() is sorted, so the epoch is the first retained offset.
    let start_offset = offsets[0];
    let points = projection
        .offsets
        .iter()
        .zip(&projection.values)
        .map(|(&t, &v)| (t as f64, v))
        .collect();

    Ok(Extrapolation {
        points,
        fit: projection.fit,
        doubling_time: projection.fit.doubling_time(),
        start_offset,
        start_label: ref_day.offset_label(start_offset),
    })
}

/// Finds the observed point under the configured lockdown date, if any.
///
/// A lockdown date with no matching observation only costs the marker,
/// not the chart.
fn lockdown_marker(
    region: &RegionRecord,
    ref_day: RefDay,
    observed: &[(f64, f64)],
) -> Option<(f64, f64)> {
    let (month, day) = region.lockdown()?;
    let offset = match ref_day.offset_of(month, day) {
        Ok(offset) => offset as f64,
        Err(e) => {
            warn!(
                region = region.display_name(),
                error = %e,
                "lockdown date invalid under reference year; marker skipped"
            );
            return None;
        }
    };
    let found = observed.iter().find(|&&(t, _)| t == offset).copied();
    if found.is_none() {
        warn!(
            region = region.display_name(),
            offset, "no observation on lockdown day; marker skipped"
        );
    }
    found
}

/// Solves `fraction * a * exp(b * x) == y` for x: the day offset at
/// which the fitted patient-load curve crosses a capacity threshold.
/// Returns `None` when the crossing is undefined (flat fit, non-positive
/// ratio) or not finite.
pub fn capacity_crossing(fit: ExpFit, fraction: f64, y: f64) -> Option<f64> {
    let ratio = y / (fraction * fit.a);
    if ratio <= 0.0 || fit.b == 0.0 {
        return None;
    }
    let x = ratio.ln() / fit.b;
    x.is_finite().then_some(x)
}

fn require<T>(
    value: Option<T>,
    region: &str,
    field: &'static str,
    spec: &ChartSpec,
) -> Result<T, RenderError> {
    value.ok_or_else(|| RenderError::MissingConfiguration {
        region: region.to_string(),
        field,
        chart: spec.name,
    })
}
