//! Convex shared-hazard aggregator

use aigrowth_common::{Result, SharedHazard};
use serde::{Deserialize, Serialize};

/// `δ H(Q)` with `H(Q) = Q + κQ²/2`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadraticHazard {
    delta: f64,
    kappa: f64,
}

impl QuadraticHazard {
    pub fn new(shared: SharedHazard) -> Result<Self> {
        shared.validate()?;
        Ok(Self {
            delta: shared.delta,
            kappa: shared.kappa,
        })
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn kappa(&self) -> f64 {
        self.kappa
    }

    /// Q = ω1 T1 + ω2 T2
    #[inline]
    pub fn aggregate(weights: [f64; 2], runtimes: [f64; 2]) -> f64 {
        weights[0] * runtimes[0] + weights[1] * runtimes[1]
    }

    /// H(Q)
    #[inline]
    pub fn level(&self, aggregate: f64) -> f64 {
        aggregate + 0.5 * self.kappa * aggregate * aggregate
    }

    /// H'(Q)
    #[inline]
    pub fn slope(&self, aggregate: f64) -> f64 {
        1.0 + self.kappa * aggregate
    }

    /// exp(−δ H(Q))
    #[inline]
    pub fn survival(&self, aggregate: f64) -> f64 {
        (-self.delta * self.level(aggregate)).exp()
    }

    /// Hazard flow a player with weight ω perceives at the margin: δ ω H'(Q)
    #[inline]
    pub fn effective_hazard(&self, omega: f64, aggregate: f64) -> f64 {
        self.delta * omega * self.slope(aggregate)
    }
}
