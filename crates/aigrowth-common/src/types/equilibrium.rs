//! Shared-hazard equilibrium records

use serde::{Deserialize, Serialize};

/// Which path produced an equilibrium
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveMethod {
    /// Two-dimensional best-response iteration
    Iterative,
    /// Scalar root of the symmetric condition
    Symmetric,
}

/// Nash runtimes of the two-player shared-hazard game
///
/// Created by the solver and never modified afterwards. A state with
/// `converged == false` is the last iterate when the budget ran out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumState {
    /// (T1, T2)
    pub runtimes: [f64; 2],
    /// Q = ω1 T1 + ω2 T2
    pub aggregate_risk: f64,
    /// H'(Q) = 1 + κQ
    pub hazard_slope: f64,
    /// exp(−δ H(Q))
    pub survival: f64,
    pub converged: bool,
    pub iterations: usize,
    /// Runtime uncertainty in years: the last best-response step on the
    /// iterative path, the final bisection bracket on the symmetric path
    pub step: f64,
    /// |φ(T)| of the marginal condition at the symmetric root; `None` when iterating
    pub condition_residual: Option<f64>,
    pub method: SolveMethod,
}

impl EquilibriumState {
    /// Runtime of player 0 or 1
    pub fn runtime(&self, player: usize) -> Option<f64> {
        self.runtimes.get(player).copied()
    }

    /// 1 − survival
    pub fn extinction_prob(&self) -> f64 {
        1.0 - self.survival
    }

    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        (self.runtimes[0] - self.runtimes[1]).abs() <= tolerance
    }
}

/// Realized payoff of one player at a runtime pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerOutcome {
    pub runtime: f64,
    /// Shared survival probability exp(−δ H(Q))
    pub survival: f64,
    /// c0_i e^{g_i T_i}
    pub consumption: f64,
    /// survival × u_i(consumption)
    pub expected_utility: f64,
}
