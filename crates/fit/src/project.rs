//! Projection of a fitted curve over a future horizon.

use std::collections::BTreeSet;

use crate::error::FitError;
use crate::fit::ExpFit;
use crate::optimizer;

/// A fitted curve evaluated over the projection axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// Sorted, deduplicated union of the observation offsets and the
    /// integer range `0..=horizon`.
    pub offsets: Vec<i32>,
    /// Fitted curve values at each projected offset.
    pub values: Vec<f64>,
    /// The fitted parameters.
    pub fit: ExpFit,
}

/// Fits the exponential model to the observations and evaluates it over
/// the projection axis.
///
/// The axis is the union of all observation offsets and `0..=horizon`
/// (empty range when `horizon` is negative), sorted ascending with
/// duplicates removed — so the projection always covers the observed
/// span and the requested future days from the reference day onward.
///
/// # Errors
///
/// Returns [`FitError`] when the data cannot support a fit or the
/// optimizer fails to converge.
pub fn project(offsets: &[i32], values: &[f64], horizon: i32) -> Result<Projection, FitError> {
    let fit = optimizer::fit_exponential(offsets, values)?;

    let mut axis: BTreeSet<i32> = offsets.iter().copied().collect();
    axis.extend(0..=horizon);

    let offsets: Vec<i32> = axis.into_iter().collect();
    let values = offsets.iter().map(|&t| fit.value_at(t as f64)).collect();
    Ok(Projection {
        offsets,
        values,
        fit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exact(offsets: &[i32], a: f64, b: f64) -> Vec<f64> {
        offsets.iter().map(|&t| a * (b * t as f64).exp()).collect()
    }

    #[test]
    fn axis_is_sorted_union_without_duplicates() {
        let offsets = [0, 5, 10];
        let values = exact(&offsets, 10.0, 0.1);
        let p = project(&offsets, &values, 20).unwrap();

        let expected: Vec<i32> = (0..=20).collect();
        assert_eq!(p.offsets, expected);
        assert!(p.offsets.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn axis_keeps_past_observations() {
        let offsets = [-10, -5, 0];
        let values = exact(&offsets, 400.0, 0.1);
        let p = project(&offsets, &values, 10).unwrap();
        assert_eq!(p.offsets[0], -10);
        assert_eq!(p.offsets[1], -5);
        assert_eq!(*p.offsets.last().unwrap(), 10);
        assert_eq!(p.offsets.len(), 13); // {-10, -5} ∪ {0..=10}
    }

    #[test]
    fn negative_horizon_projects_observations_only() {
        let offsets = [2, 5, 9];
        let values = exact(&offsets, 3.0, 0.2);
        let p = project(&offsets, &values, -1).unwrap();
        assert_eq!(p.offsets, vec![2, 5, 9]);
    }

    #[test]
    fn values_follow_fitted_curve() {
        let offsets = [0, 5, 10, 15];
        let values = exact(&offsets, 10.0, 0.1);
        let p = project(&offsets, &values, 20).unwrap();
        for (&t, &v) in p.offsets.iter().zip(&p.values) {
            let expected = 10.0 * (0.1 * t as f64).exp();
            assert!(
                (v - expected).abs() / expected < 1e-3,
                "at t={t}: {v} vs {expected}"
            );
        }
    }

    #[test]
    fn insufficient_data_propagates() {
        assert!(matches!(
            project(&[3], &[7.0], 10),
            Err(FitError::InsufficientData { .. })
        ));
    }
}
