//! Scalar shortcut for identical players
//!
//! With equal parameters both players run for the same T, so Q = 2ωT and the
//! equilibrium is the root of
//!
//! ```text
//! φ(T) = v(c0 e^{gT}) − g / (δ ω (1 + 2κωT))
//! ```
//!
//! Bisection on this scalar condition avoids the asymmetric fixed points a
//! two-dimensional iteration can wander into.

use aigrowth_common::{PlayerParameters, Result};
use tracing::debug;

use crate::{
    best_response::{MarginalCondition, ScalarSolution},
    hazard::QuadraticHazard,
    SolverConfig,
};

/// Common runtime of the symmetric equilibrium
pub(crate) fn symmetric_runtime(
    player: &PlayerParameters,
    hazard: &QuadraticHazard,
    config: &SolverConfig,
) -> Result<ScalarSolution> {
    let condition = MarginalCondition::new(*player, *hazard, 2.0 * player.omega, 0.0)?;
    let solution = condition.solve(config.tolerance, config.max_iterations)?;
    debug!(
        runtime = solution.runtime,
        iterations = solution.iterations,
        residual = solution.residual,
        "Symmetric equilibrium bisection finished"
    );
    Ok(solution)
}
