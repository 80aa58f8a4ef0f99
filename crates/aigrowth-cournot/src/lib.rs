//! # AI Growth Cournot
//!
//! Two-player shared-hazard equilibrium: each player chooses how long to run AI,
//! and both face a single extinction hazard driven by their combined runtime.
//!
//! ## Hazard
//!
//! ```text
//! Q     = ω1 T1 + ω2 T2
//! H(Q)  = Q + κQ²/2        H'(Q) = 1 + κQ
//! S     = exp(−δ H(Q))
//! ```
//!
//! ## Best Response
//!
//! Player `i` runs AI until `v_i(c_i) = g_i / (δ ω_i H'(Q))`, the single-agent
//! condition with an effective hazard that rises with the rival's runtime.
//! With `κ = 0` the players decouple and each plays its single-agent `T*`.

pub mod best_response;
pub mod hazard;
pub mod solver;
pub mod symmetric;

pub use best_response::BestResponse;
pub use hazard::QuadraticHazard;
pub use solver::SharedHazardGame;

use aigrowth_common::{
    ModelError, Result, DEFAULT_DAMPING, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE, MIN_DAMPING,
};

/// Equilibrium solver configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Largest runtime change (years) accepted as converged
    pub tolerance: f64,
    /// Iteration budget for the fixed point and for bisection
    pub max_iterations: usize,
    /// Initial relaxation factor on best-response updates
    pub damping: f64,
    /// Floor for the relaxation factor
    pub min_damping: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            damping: DEFAULT_DAMPING,
            min_damping: MIN_DAMPING,
        }
    }
}

impl SolverConfig {
    pub fn with_tolerance(self, tolerance: f64) -> Self {
        Self { tolerance, ..self }
    }

    pub fn with_max_iterations(self, max_iterations: usize) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }

    pub fn with_damping(self, damping: f64) -> Self {
        Self { damping, ..self }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance > 0.0) {
            return Err(ModelError::Config(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(ModelError::Config("max_iterations must be at least 1".into()));
        }
        if !(self.min_damping > 0.0 && self.min_damping <= self.damping && self.damping <= 1.0) {
            return Err(ModelError::Config(format!(
                "damping must satisfy 0 < min_damping <= damping <= 1, got {} / {}",
                self.min_damping, self.damping
            )));
        }
        Ok(())
    }
}
