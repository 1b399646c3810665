//! # epicurves-fit
//!
//! Exponential growth fitting for epidemic case timelines: nonlinear
//! least squares of `value = a * exp(b * offset)` on the raw counts,
//! plus evaluation of the fitted curve over a future horizon.
//!
//! The fit deliberately runs in linear space (not log-space
//! regression): large recent counts dominate the residuals, which is
//! the right emphasis when the question is near-term hospital capacity.
//!
//! ## Quick Start
//!
//! ```
//! use epicurves_fit::project;
//!
//! // Counts doubling every ~7 days.
//! let offsets = [0, 5, 10, 15];
//! let values: Vec<f64> = offsets.iter().map(|&t| 10.0 * (0.1 * t as f64).exp()).collect();
//!
//! let p = project(&offsets, &values, 20).unwrap();
//! assert!((p.fit.b - 0.1).abs() < 1e-3);
//! assert!((p.fit.doubling_time() - 6.93).abs() < 0.01);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `fit` | Fitted parameters and doubling time |
//! | `optimizer` | Nelder-Mead least-squares wrapper (private) |
//! | `project` | Horizon projection |
//! | `error` | Error types |

mod error;
mod fit;
mod optimizer;
mod project;

pub use error::FitError;
pub use fit::ExpFit;
pub use project::{Projection, project};

/// Fits the exponential model to (offset, value) pairs without
/// projecting; see [`project`] for the combined operation.
///
/// # Errors
///
/// Returns [`FitError`] on invalid input or optimizer failure.
pub fn fit_exponential(offsets: &[i32], values: &[f64]) -> Result<ExpFit, FitError> {
    optimizer::fit_exponential(offsets, values)
}
