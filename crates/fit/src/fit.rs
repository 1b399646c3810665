//! Fitted exponential parameters.

/// Parameters of a fitted `value = a * exp(b * offset)` curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpFit {
    /// Scale coefficient: the fitted value at offset zero.
    pub a: f64,
    /// Growth-rate coefficient per day.
    pub b: f64,
}

impl ExpFit {
    /// Evaluates the fitted curve at day offset `t`.
    pub fn value_at(self, t: f64) -> f64 {
        self.a * (self.b * t).exp()
    }

    /// Days for the fitted trajectory to double: `ln 2 / b`.
    ///
    /// A non-growing trajectory (`b <= 0`) yields a negative or infinite
    /// result. That is diagnostically meaningful (flat or declining
    /// trend) and is reported as-is rather than hidden.
    pub fn doubling_time(self) -> f64 {
        std::f64::consts::LN_2 / self.b
    }
}
