/// Smallest probability any strategy reports, keeping logarithms finite.
pub const MIN_PROBABILITY: f64 = f64::MIN_POSITIVE;

pub trait Strategy<Ctx> {
    /// A calculable cost which can be any required
    /// type, so long as it is castable into a 64-bit float.
    type Cost: Into<f64>;

    /// The calculation cost you must implement.
    ///
    /// Costs are non-negative, `0` describing a perfect fit. Returning
    /// `None` declares the context impossible.
    fn calculate(&self, context: Ctx) -> Option<Self::Cost>;

    /// The probability of the context, given by decaying its cost.
    ///
    /// ```math
    /// probability(ctx) = max(e^(-cost(ctx)), MIN_PROBABILITY)
    /// ```
    #[inline(always)]
    fn probability(&self, context: Ctx) -> f64 {
        decay(self.calculate(context).map_or(f64::INFINITY, Into::into))
    }

    /// The natural logarithm of [`Strategy::probability`], computed without
    /// leaving log-space.
    #[inline(always)]
    fn log_probability(&self, context: Ctx) -> f64 {
        let cost: f64 = self.calculate(context).map_or(f64::INFINITY, Into::into);
        (-cost).max(MIN_PROBABILITY.ln())
    }
}

/// Exponential decay of a non-negative cost into a probability in `(0, 1]`.
#[inline]
pub fn decay(cost: f64) -> f64 {
    match cost.is_nan() {
        true => MIN_PROBABILITY,
        false => (-cost.max(0.0)).exp().max(MIN_PROBABILITY),
    }
}
