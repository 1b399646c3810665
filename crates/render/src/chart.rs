//! Chart catalogue.
//!
//! Each chart is a small configuration record consumed by one generic
//! renderer: which regions it includes (via the drawplotN flag), its
//! y-axis scale, and which overlays it draws. No chart-specific
//! rendering code exists outside these flags.

/// Y-axis scale of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YScale {
    /// Linear case counts.
    Linear,
    /// Logarithmic case counts.
    Log,
}

/// Configuration record describing one chart type.
#[derive(Debug, Clone, Copy)]
pub struct ChartSpec {
    /// Index into the drawplot flags (0..=3) selecting included regions.
    pub index: usize,
    /// Stable name used for the output filename and in diagnostics.
    pub name: &'static str,
    /// Y-axis scale.
    pub y_scale: YScale,
    /// Whether the chart draws the fitted extrapolation.
    pub extrapolate: bool,
    /// Whether the chart draws capacity overlays (fraction curves,
    /// threshold lines, the open-ICU band) in per-region panels.
    pub capacity_overlays: bool,
}

/// The four chart types, in drawing order.
pub const CHARTS: [ChartSpec; 4] = [
    ChartSpec {
        index: 0,
        name: "cases_linear",
        y_scale: YScale::Linear,
        extrapolate: false,
        capacity_overlays: false,
    },
    ChartSpec {
        index: 1,
        name: "cases_log",
        y_scale: YScale::Log,
        extrapolate: false,
        capacity_overlays: false,
    },
    ChartSpec {
        index: 2,
        name: "projection",
        y_scale: YScale::Log,
        extrapolate: true,
        capacity_overlays: false,
    },
    ChartSpec {
        index: 3,
        name: "capacity",
        y_scale: YScale::Log,
        extrapolate: true,
        capacity_overlays: true,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_match_positions() {
        for (i, spec) in CHARTS.iter().enumerate() {
            assert_eq!(spec.index, i);
        }
    }

    #[test]
    fn capacity_chart_also_extrapolates() {
        // The capacity overlays hang off the fitted curve.
        for spec in CHARTS.iter().filter(|s| s.capacity_overlays) {
            assert!(spec.extrapolate, "{} must extrapolate", spec.name);
        }
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = CHARTS.iter().map(|s| s.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CHARTS.len());
    }
}
