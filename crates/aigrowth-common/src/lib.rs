//! # AI Growth Common
//!
//! Shared parameter records, result types, and errors for the AI growth/risk model.
//!
//! ## Core Types
//!
//! - [`StaticParameters`]: single planner, deterministic growth, constant hazard flow
//! - [`DynamicParameters`]: population growth/mortality and discounted welfare
//! - [`PlayerParameters`]/[`SharedHazard`]: two-player shared-hazard game
//! - [`EquilibriumState`]: Nash runtimes with convergence diagnostics
//! - [`SweepResult`]: ordered comparative-statics output
//!
//! Every record is a plain value. Models take a snapshot on construction and never
//! mutate it; sweeps build a fresh snapshot per grid point with the `with_*` helpers.

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{DomainError, ModelError, Result, UndefinedModelError};
pub use types::{
    equilibrium::{EquilibriumState, PlayerOutcome, SolveMethod},
    parameters::{AiScenario, DynamicParameters, PlayerParameters, SharedHazard, StaticParameters},
    summary::{
        AdoptionSummary, MenuEvaluation, RuntimeDecision, RuntimeOutcome, SingularitySummary,
        StaticSummary, UtilityResult,
    },
    sweep::{SweepMode, SweepPoint, SweepResult},
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `|γ − 1|` at or below this value selects the log-utility branch.
pub const UNIT_CURVATURE_TOLERANCE: f64 = 1e-9;

/// Welfare denominators closer to zero than this are treated as the singular boundary.
pub const SINGULARITY_TOLERANCE: f64 = 1e-12;

/// Target `v(c0)` matching value-of-statistical-life estimates
pub const DEFAULT_TARGET_V: f64 = 6.0;

/// Default convergence tolerance for equilibrium runtimes (years)
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default iteration budget for the equilibrium fixed point
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Default relaxation factor applied to best-response updates
pub const DEFAULT_DAMPING: f64 = 0.5;

/// Relaxation factor floor when step sizes keep growing
pub const MIN_DAMPING: f64 = 1e-3;

/// Returns true when `gamma` falls on the log-utility branch.
#[inline]
pub fn is_unit_curvature(gamma: f64) -> bool {
    (gamma - 1.0).abs() <= UNIT_CURVATURE_TOLERANCE
}
