//! Error types for epicurves-render.

use epicurves_fit::FitError;

/// Error type for all fallible operations in the epicurves-render crate.
///
/// Per-region variants (`MissingConfiguration`, `InvalidConfiguration`,
/// `NoObservations`, `Fit`) are caught per chart per region by the report
/// driver, logged, and do not abort other regions or charts. Backend and
/// I/O variants indicate environment problems and are fatal.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Returned when a chart needs a configuration field a region never
    /// supplied.
    #[error("region {region} is missing field {field} required by chart {chart}")]
    MissingConfiguration {
        /// Name of the region lacking the field.
        region: String,
        /// Canonical name of the missing field.
        field: &'static str,
        /// Name of the chart that needs it.
        chart: &'static str,
    },

    /// Returned when a supplied configuration value cannot be used (for
    /// example a project-from date that does not exist in the reference
    /// year).
    #[error("region {region} has unusable field {field}: {reason}")]
    InvalidConfiguration {
        /// Name of the region with the bad value.
        region: String,
        /// Canonical name of the field.
        field: &'static str,
        /// Description of why the value is unusable.
        reason: String,
    },

    /// Returned when a region included in a chart has no observations.
    #[error("region {region} has no case observations to draw")]
    NoObservations {
        /// Name of the region with an empty timeline.
        region: String,
    },

    /// Wraps a fit failure for one region's extrapolation.
    #[error("exponential fit failed for region {region}: {source}")]
    Fit {
        /// Name of the region whose fit failed.
        region: String,
        /// The underlying fit error.
        source: FitError,
    },

    /// Wraps an error originating from the plotting backend.
    #[error("plotting backend error: {reason}")]
    Backend {
        /// Description of the underlying backend failure.
        reason: String,
    },
}

impl RenderError {
    /// True for the per-region variants the report driver downgrades to
    /// a warning instead of aborting the run.
    pub fn is_per_region(&self) -> bool {
        matches!(
            self,
            RenderError::MissingConfiguration { .. }
                | RenderError::InvalidConfiguration { .. }
                | RenderError::NoObservations { .. }
                | RenderError::Fit { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_missing_configuration() {
        let err = RenderError::MissingConfiguration {
            region: "Alpha".to_string(),
            field: "icu_fraction",
            chart: "capacity",
        };
        assert_eq!(
            err.to_string(),
            "region Alpha is missing field icu_fraction required by chart capacity"
        );
    }

    #[test]
    fn display_fit() {
        let err = RenderError::Fit {
            region: "Alpha".to_string(),
            source: FitError::Convergence,
        };
        assert_eq!(
            err.to_string(),
            "exponential fit failed for region Alpha: exponential fit did not converge"
        );
    }

    #[test]
    fn per_region_classification() {
        assert!(
            RenderError::NoObservations {
                region: "Alpha".to_string()
            }
            .is_per_region()
        );
        assert!(
            !RenderError::Backend {
                reason: "out of ink".to_string()
            }
            .is_per_region()
        );
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<RenderError>();
    }
}
