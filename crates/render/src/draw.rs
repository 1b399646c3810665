//! Plotters-backed chart drawing.
//!
//! One generic routine draws every combined chart; the y-axis scale is
//! the only thing that changes between them, so the scale is picked at
//! the coordinate-build branch and everything downstream is generic over
//! the y coordinate. The capacity chart splits the drawing area into
//! per-region panels instead.

use std::path::Path;

use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::ranged1d::{Ranged, ValueFormatter};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;

use epicurves_calendar::RefDay;

use crate::chart::{ChartSpec, YScale};
use crate::data::{RegionPanel, capacity_crossing};
use crate::error::RenderError;

const CAPTION_FONT: (&str, u32) = ("sans-serif", 22);
const PANEL_CAPTION_FONT: (&str, u32) = ("sans-serif", 16);
const ANNOTATION_FONT: (&str, u32) = ("sans-serif", 14);

fn backend<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Backend {
        reason: e.to_string(),
    }
}

/// Renders one chart into a PNG at `path`.
pub(crate) fn render_chart(
    spec: &ChartSpec,
    panels: &[RegionPanel],
    ref_day: RefDay,
    path: &Path,
    width: u32,
    height: u32,
) -> Result<(), RenderError> {
    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(backend)?;

    if spec.capacity_overlays {
        draw_capacity_panels(panels, ref_day, &root)?;
    } else {
        draw_combined(spec, panels, ref_day, &root)?;
    }

    root.present().map_err(backend)
}

/// Draws all regions into a single coordinate system.
fn draw_combined<DB: DrawingBackend>(
    spec: &ChartSpec,
    panels: &[RegionPanel],
    ref_day: RefDay,
    area: &DrawingArea<DB, Shift>,
) -> Result<(), RenderError> {
    let (x_min, x_max) = x_span(panels);
    let y_max = panels
        .iter()
        .flat_map(|p| {
            p.observed
                .iter()
                .chain(p.extrapolation.iter().flat_map(|e| e.points.iter()))
        })
        .map(|&(_, y)| y)
        .fold(1.0f64, f64::max)
        * 1.15;

    let names: Vec<&str> = panels.iter().map(|p| p.name.as_str()).collect();
    let caption = if spec.extrapolate {
        format!("Cumulative cases, extrapolated: {}", names.join(" -- "))
    } else {
        format!("Cumulative cases: {}", names.join(" -- "))
    };

    let mut builder = ChartBuilder::on(area);
    builder
        .caption(&caption, CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60);

    match spec.y_scale {
        YScale::Linear => {
            let mut chart = builder
                .build_cartesian_2d(x_min..x_max, 0.0..y_max)
                .map_err(backend)?;
            plot_regions(&mut chart, spec, panels, ref_day)
        }
        YScale::Log => {
            let mut chart = builder
                .build_cartesian_2d(x_min..x_max, (1.0..y_max).log_scale())
                .map_err(backend)?;
            plot_regions(&mut chart, spec, panels, ref_day)
        }
    }
}

/// Draws the per-region series into an already-built coordinate system.
fn plot_regions<'a, DB, Y>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<RangedCoordf64, Y>>,
    spec: &ChartSpec,
    panels: &[RegionPanel],
    ref_day: RefDay,
) -> Result<(), RenderError>
where
    DB: DrawingBackend + 'a,
    Y: Ranged<ValueType = f64> + ValueFormatter<f64>,
{
    chart
        .configure_mesh()
        .x_desc(format!("Days relative to {}", ref_day.long_label()))
        .y_desc("Number of cases")
        .draw()
        .map_err(backend)?;

    for (i, panel) in panels.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();

        chart
            .draw_series(LineSeries::new(
                panel.observed.iter().copied(),
                color.stroke_width(2),
            ))
            .map_err(backend)?;
        chart
            .draw_series(
                panel
                    .observed
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
            )
            .map_err(backend)?;

        // Short label next to the newest observation.
        if let Some(&(x, y)) = panel.observed.last() {
            chart
                .draw_series(std::iter::once(Text::new(
                    panel.shortname.clone(),
                    (x, y),
                    ANNOTATION_FONT.into_font().color(&color),
                )))
                .map_err(backend)?;
        }

        if let Some((x, y)) = panel.lockdown {
            chart
                .draw_series(std::iter::once(Cross::new((x, y), 6, BLACK.stroke_width(2))))
                .map_err(backend)?;
        }

        if let Some(extrap) = &panel.extrapolation {
            // Mark where the fitted window begins.
            let start = (
                extrap.start_offset as f64,
                extrap.fit.value_at(extrap.start_offset as f64),
            );
            chart
                .draw_series(std::iter::once(TriangleMarker::new(start, 6, color.filled())))
                .map_err(backend)?;
            chart
                .draw_series(DashedLineSeries::new(
                    extrap.points.iter().copied(),
                    6,
                    4,
                    color.stroke_width(1),
                ))
                .map_err(backend)?
                .label(format!(
                    "{} from {}: {}",
                    panel.shortname,
                    extrap.start_label,
                    doubling_label(extrap.doubling_time)
                ))
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], color));
        }
    }

    if spec.extrapolate {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK)
            .draw()
            .map_err(backend)?;
    }

    Ok(())
}

/// Draws one panel per region: projected ICU and hospitalisation demand
/// against the region's own capacity thresholds.
fn draw_capacity_panels<DB: DrawingBackend>(
    panels: &[RegionPanel],
    ref_day: RefDay,
    area: &DrawingArea<DB, Shift>,
) -> Result<(), RenderError> {
    let cols = (panels.len() as f64).sqrt().ceil() as usize;
    let rows = panels.len().div_ceil(cols);
    let cells = area.split_evenly((rows, cols));

    for (panel, cell) in panels.iter().zip(&cells) {
        draw_capacity_panel(panel, ref_day, cell)?;
    }
    Ok(())
}

fn draw_capacity_panel<DB: DrawingBackend>(
    panel: &RegionPanel,
    ref_day: RefDay,
    area: &DrawingArea<DB, Shift>,
) -> Result<(), RenderError> {
    // prepare_region guarantees both for the capacity chart.
    let Some(extrap) = &panel.extrapolation else {
        return Ok(());
    };
    let Some(cap) = &panel.capacity else {
        return Ok(());
    };

    let (x_min, x_max) = x_span(std::slice::from_ref(panel));

    let icu: Vec<(f64, f64)> = extrap
        .points
        .iter()
        .map(|&(x, y)| (x, cap.icu_fraction * y))
        .collect();
    let hosp: Vec<(f64, f64)> = extrap
        .points
        .iter()
        .map(|&(x, y)| (x, cap.hosp_fraction * y))
        .collect();

    let open_lo = cap.icu_open_lo * cap.ventilators;
    let open_hi = cap.icu_open_hi * cap.ventilators;
    let y_max = icu
        .iter()
        .chain(&hosp)
        .map(|&(_, y)| y)
        .fold(cap.staffed_beds.max(cap.ventilators), f64::max)
        * 1.15;

    let caption = format!(
        "{}: {} extrapolation, {}",
        panel.name,
        extrap.start_label,
        doubling_label(extrap.doubling_time)
    );

    let mut chart = ChartBuilder::on(area)
        .caption(&caption, PANEL_CAPTION_FONT)
        .margin(8)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, (1.0..y_max).log_scale())
        .map_err(backend)?;

    chart
        .configure_mesh()
        .x_desc(format!("Days relative to {}", ref_day.long_label()))
        .y_desc("Number of patients")
        .draw()
        .map_err(backend)?;

    // Uncertainty band for the ventilators actually free for new cases.
    chart
        .draw_series(std::iter::once(Polygon::new(
            vec![
                (x_min, open_lo),
                (x_max, open_lo),
                (x_max, open_hi),
                (x_min, open_hi),
            ],
            GREEN.mix(0.25),
        )))
        .map_err(backend)?;

    chart
        .draw_series(LineSeries::new(
            [(x_min, cap.ventilators), (x_max, cap.ventilators)],
            RED.stroke_width(2),
        ))
        .map_err(backend)?
        .label(format!("ventilators ({})", cap.ventilators))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], RED));

    chart
        .draw_series(LineSeries::new(
            [(x_min, cap.staffed_beds), (x_max, cap.staffed_beds)],
            BLACK.stroke_width(2),
        ))
        .map_err(backend)?
        .label(format!("staffed beds ({})", cap.staffed_beds))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], BLACK));

    chart
        .draw_series(LineSeries::new(icu, BLUE.stroke_width(2)))
        .map_err(backend)?
        .label(format!("projected ICU demand ({})", cap.icu_fraction))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], BLUE));

    chart
        .draw_series(DashedLineSeries::new(hosp, 6, 4, MAGENTA.stroke_width(1)))
        .map_err(backend)?
        .label(format!("projected hospitalised ({})", cap.hosp_fraction))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], MAGENTA));

    // Mark the days the projected ICU demand crosses the open-ICU band.
    for threshold in [open_lo, open_hi] {
        if let Some(x) = capacity_crossing(extrap.fit, cap.icu_fraction, threshold)
            && x >= x_min
            && x <= x_max
        {
            chart
                .draw_series(std::iter::once(Cross::new(
                    (x, threshold),
                    6,
                    RED.stroke_width(2),
                )))
                .map_err(backend)?;
            chart
                .draw_series(std::iter::once(Text::new(
                    ref_day.offset_label(x.round() as i32),
                    (x, threshold),
                    ANNOTATION_FONT.into_font().color(&RED),
                )))
                .map_err(backend)?;
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .draw()
        .map_err(backend)?;

    Ok(())
}

/// Padded x-axis span covering all observed and projected points.
fn x_span(panels: &[RegionPanel]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for panel in panels {
        for &(x, _) in panel
            .observed
            .iter()
            .chain(panel.extrapolation.iter().flat_map(|e| e.points.iter()))
        {
            min = min.min(x);
            max = max.max(x);
        }
    }
    if !min.is_finite() || !max.is_finite() {
        return (-1.0, 1.0);
    }
    (min - 1.0, max + 1.0)
}

fn doubling_label(dt: f64) -> String {
    if dt.is_finite() && dt > 0.0 {
        format!("{dt:.1} days to double")
    } else {
        "not growing".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn x_span_pads_both_ends() {
        let panel = RegionPanel {
            name: "Alpha".to_string(),
            shortname: "AL".to_string(),
            observed: vec![(-10.0, 100.0), (0.0, 400.0)],
            lockdown: None,
            extrapolation: None,
            capacity: None,
        };
        assert_eq!(x_span(std::slice::from_ref(&panel)), (-11.0, 1.0));
    }

    #[test]
    fn x_span_covers_projection_points() {
        let panel = RegionPanel {
            name: "Alpha".to_string(),
            shortname: "AL".to_string(),
            observed: vec![(0.0, 400.0)],
            lockdown: None,
            extrapolation: Some(crate::data::Extrapolation {
                points: vec![(0.0, 400.0), (10.0, 1600.0)],
                fit: epicurves_fit::ExpFit { a: 400.0, b: 0.14 },
                doubling_time: 5.0,
                start_offset: 0,
                start_label: "24Mar".to_string(),
            }),
            capacity: None,
        };
        assert_eq!(x_span(std::slice::from_ref(&panel)), (-1.0, 11.0));
    }

    #[test]
    fn doubling_label_formats() {
        assert_eq!(doubling_label(5.04), "5.0 days to double");
        assert_eq!(doubling_label(f64::INFINITY), "not growing");
        assert_eq!(doubling_label(-13.9), "not growing");
    }
}
