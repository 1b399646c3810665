//! Nelder-Mead least-squares fit of `value = a * exp(b * offset)`.
//!
//! Wraps the `argmin` crate to minimize the sum of squared residuals on
//! the raw (non-log) values. Fitting in linear space weights large
//! recent counts more heavily than early small ones, which is the
//! intended emphasis for near-term capacity projection.
//!
//! **Not part of the public API.**

use argmin::core::{CostFunction, Executor};
use argmin::solver::neldermead::NelderMead;

use crate::error::FitError;
use crate::fit::ExpFit;

/// Fits the exponential model to (offset, value) pairs.
///
/// This is the full pipeline:
/// 1. Validate data
/// 2. Seed (a, b) from the data itself
/// 3. Minimize the sum of squared residuals via Nelder-Mead
/// 4. Check the winning parameters are finite
pub(crate) fn fit_exponential(offsets: &[i32], values: &[f64]) -> Result<ExpFit, FitError> {
    // 1. Validate
    if offsets.len() != values.len() {
        return Err(FitError::LengthMismatch {
            n_offsets: offsets.len(),
            n_values: values.len(),
        });
    }
    let mut distinct: Vec<i32> = offsets.to_vec();
    distinct.sort_unstable();
    distinct.dedup();
    if distinct.len() < 2 {
        return Err(FitError::InsufficientData {
            n_distinct: distinct.len(),
            min: 2,
        });
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(FitError::NonFiniteData);
    }

    let ts: Vec<f64> = offsets.iter().map(|&t| t as f64).collect();

    // 2. Seed from the data rather than relying on the optimizer's
    // default starting point: b0 from the log-slope between the first
    // and last positive observations, a0 back-projected so the seed
    // curve passes through the first point.
    let (a0, b0) = seed(&ts, values);

    // 3. Build simplex for Nelder-Mead
    let a_step = (a0.abs() * 0.5).max(1.0);
    let simplex = vec![vec![a0, b0], vec![a0 + a_step, b0], vec![a0, b0 + 0.05]];

    let cost = SquaredError {
        ts: &ts,
        values,
    };

    let solver = NelderMead::new(simplex)
        .with_sd_tolerance(1e-10)
        .map_err(|_| FitError::Convergence)?;
    let result = Executor::new(cost, solver)
        .configure(|state| state.max_iters(2000))
        .run()
        .map_err(|_| FitError::Convergence)?;

    let best = result
        .state()
        .best_param
        .as_ref()
        .ok_or(FitError::Convergence)?;

    // 4. Reject non-finite winners
    let (a, b) = (best[0], best[1]);
    if !a.is_finite() || !b.is_finite() {
        return Err(FitError::Convergence);
    }
    Ok(ExpFit { a, b })
}

/// Initial-guess policy for the optimizer.
///
/// Uses the first and last strictly positive observations (in offset
/// order) for a crude log-slope; degrades to a flat seed when fewer
/// than two positive values exist.
fn seed(ts: &[f64], values: &[f64]) -> (f64, f64) {
    let mut positive: Vec<(f64, f64)> = ts
        .iter()
        .zip(values)
        .filter(|&(_, &v)| v > 0.0)
        .map(|(&t, &v)| (t, v))
        .collect();
    positive.sort_by(|x, y| x.0.total_cmp(&y.0));

    let (first, last) = match (positive.first(), positive.last()) {
        (Some(&f), Some(&l)) if l.0 > f.0 => (f, l),
        _ => {
            let fallback = values.iter().cloned().fold(f64::NAN, f64::max);
            let a0 = if fallback.is_finite() && fallback > 0.0 {
                fallback
            } else {
                1.0
            };
            return (a0, 0.0);
        }
    };

    let b0 = (last.1.ln() - first.1.ln()) / (last.0 - first.0);
    let a0 = first.1 * (-b0 * first.0).exp();
    if a0.is_finite() && a0 > 0.0 {
        (a0, b0)
    } else {
        (first.1.max(1.0), 0.0)
    }
}

/// Cost function for argmin: sum of squared residuals in linear space.
struct SquaredError<'a> {
    ts: &'a [f64],
    values: &'a [f64],
}

impl CostFunction for SquaredError<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, params: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        let (a, b) = (params[0], params[1]);
        let sse: f64 = self
            .ts
            .iter()
            .zip(self.values)
            .map(|(&t, &v)| {
                let r = a * (b * t).exp() - v;
                r * r
            })
            .sum();
        if sse.is_finite() { Ok(sse) } else { Ok(f64::MAX) }
    }
}
