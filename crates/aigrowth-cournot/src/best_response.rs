//! Best responses under the shared hazard

use aigrowth_common::{PlayerParameters, Result};
use aigrowth_model::{CrraUtility, StaticModel};
use serde::{Deserialize, Serialize};

use crate::hazard::QuadraticHazard;

/// A player's chosen runtime and the hazard it faced at the margin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BestResponse {
    /// Runtime projected onto T ≥ 0
    pub runtime: f64,
    /// c0 e^{gT} at `runtime`
    pub consumption: f64,
    /// δ ω H'(Q) at the response
    pub effective_hazard: f64,
    /// False when the player prefers not to run AI at all
    pub interior: bool,
}

impl BestResponse {
    /// Closed-form response with aggregate risk held at `aggregate`
    ///
    /// This is one update of the best-response iteration: the single-agent
    /// optimum under the effective hazard δ ω H'(Q).
    pub fn at_aggregate(
        player: &PlayerParameters,
        hazard: &QuadraticHazard,
        aggregate: f64,
    ) -> Result<Self> {
        let effective_hazard = hazard.effective_hazard(player.omega, aggregate);
        let model = StaticModel::new(player.to_static(effective_hazard))?;
        let decision = model.optimal_runtime()?;
        let runtime = decision.runtime();

        Ok(Self {
            runtime,
            consumption: model.consumption_at(runtime),
            effective_hazard,
            interior: decision.is_deploy(),
        })
    }
}

/// Root of the marginal condition `v(c0 e^{gT}) = g / (δ ω H'(slope·T + offset))`
///
/// `slope` is the weight the player's own runtime carries in Q and `offset`
/// the rest of Q. The left side rises in T and the right side falls, so the
/// root is unique and lies below the runtime chosen at Q = offset.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MarginalCondition {
    player: PlayerParameters,
    utility: CrraUtility,
    hazard: QuadraticHazard,
    slope: f64,
    offset: f64,
}

/// Outcome of a scalar bisection
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScalarSolution {
    pub runtime: f64,
    /// |φ(T)|, zero at the T = 0 corner
    pub residual: f64,
    /// Width of the final bracket, zero for closed-form answers
    pub bracket: f64,
    pub iterations: usize,
    pub converged: bool,
    pub interior: bool,
}

impl ScalarSolution {
    fn exact(runtime: f64, interior: bool) -> Self {
        Self {
            runtime,
            residual: 0.0,
            bracket: 0.0,
            iterations: 0,
            converged: true,
            interior,
        }
    }
}

impl MarginalCondition {
    pub(crate) fn new(
        player: PlayerParameters,
        hazard: QuadraticHazard,
        slope: f64,
        offset: f64,
    ) -> Result<Self> {
        player.validate()?;
        let utility = CrraUtility::new(player.gamma, player.ubar)?;
        Ok(Self {
            player,
            utility,
            hazard,
            slope,
            offset,
        })
    }

    /// Aggregate risk when the player runs for `runtime`
    pub(crate) fn aggregate(&self, runtime: f64) -> f64 {
        self.slope * runtime + self.offset
    }

    /// φ(T): negative while running longer still pays
    fn residual(&self, runtime: f64) -> Result<f64> {
        let consumption = self.player.c0 * (self.player.g * runtime).exp();
        let hazard = self
            .hazard
            .effective_hazard(self.player.omega, self.aggregate(runtime));
        Ok(self.utility.v(consumption)? - self.player.g / hazard)
    }

    pub(crate) fn solve(&self, tolerance: f64, max_iterations: usize) -> Result<ScalarSolution> {
        let myopic_hazard = self
            .hazard
            .effective_hazard(self.player.omega, self.offset);
        let upper = StaticModel::new(self.player.to_static(myopic_hazard))?.t_star()?;

        if upper <= 0.0 {
            return Ok(ScalarSolution::exact(0.0, false));
        }
        // Without convexity the own runtime does not move the marginal hazard
        if self.hazard.kappa() == 0.0 || self.residual(upper)? <= 0.0 {
            return Ok(ScalarSolution::exact(upper, true));
        }

        let (mut lo, mut hi) = (0.0_f64, upper);
        let mut iterations = 0;
        while hi - lo > tolerance && iterations < max_iterations {
            let mid = 0.5 * (lo + hi);
            if mid <= lo || mid >= hi {
                break;
            }
            if self.residual(mid)? < 0.0 {
                lo = mid;
            } else {
                hi = mid;
            }
            iterations += 1;
        }

        let runtime = 0.5 * (lo + hi);
        Ok(ScalarSolution {
            runtime,
            residual: self.residual(runtime)?.abs(),
            bracket: hi - lo,
            iterations,
            converged: hi - lo <= tolerance || iterations < max_iterations,
            interior: true,
        })
    }

    pub(crate) fn response(&self, solution: &ScalarSolution) -> BestResponse {
        BestResponse {
            runtime: solution.runtime,
            consumption: self.player.c0 * (self.player.g * solution.runtime).exp(),
            effective_hazard: self
                .hazard
                .effective_hazard(self.player.omega, self.aggregate(solution.runtime)),
            interior: solution.interior,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aigrowth_common::SharedHazard;
    use aigrowth_model::calibrate_ubar;

    fn player() -> PlayerParameters {
        PlayerParameters::new(2.0, calibrate_ubar(6.0, 1.0, 2.0).unwrap(), 1.0, 0.10)
    }

    fn hazard(kappa: f64) -> QuadraticHazard {
        QuadraticHazard::new(SharedHazard::new(0.01, kappa)).unwrap()
    }

    #[test]
    fn test_at_aggregate_without_convexity() {
        let response = BestResponse::at_aggregate(&player(), &hazard(0.0), 25.0).unwrap();
        let single = StaticModel::calibrated(1.0, 0.10, 0.01, 2.0, 6.0).unwrap();
        assert_eq!(response.runtime, single.t_star().unwrap());
        assert_eq!(response.effective_hazard, 0.01);
        assert!(response.interior);
    }

    #[test]
    fn test_at_aggregate_projects_to_zero() {
        // H'(Q) = 1 + 0.5 × 10 = 6 pushes g/(δH') below v(c0)
        let response = BestResponse::at_aggregate(&player(), &hazard(0.5), 10.0).unwrap();
        assert_eq!(response.runtime, 0.0);
        assert_eq!(response.consumption, 1.0);
        assert!(!response.interior);
    }

    #[test]
    fn test_rival_runtime_shortens_response() {
        let tol = 1e-12;
        let alone = MarginalCondition::new(player(), hazard(0.2), 1.0, 0.0).unwrap();
        let crowded = MarginalCondition::new(player(), hazard(0.2), 1.0, 3.0).unwrap();
        let t_alone = alone.solve(tol, 500).unwrap();
        let t_crowded = crowded.solve(tol, 500).unwrap();
        assert!(t_alone.converged && t_crowded.converged);
        assert!(t_crowded.runtime < t_alone.runtime);
        assert!(t_alone.residual < 1e-9);
        assert!(t_alone.bracket <= tol);
    }

    #[test]
    fn test_root_satisfies_condition() {
        let condition = MarginalCondition::new(player(), hazard(0.3), 2.0, 0.0).unwrap();
        let solution = condition.solve(1e-12, 500).unwrap();
        let response = condition.response(&solution);
        // v(c) = 7c − 1 must equal g / effective hazard
        let v = 7.0 * response.consumption - 1.0;
        assert!((v - 0.10 / response.effective_hazard).abs() < 1e-8);
    }

    #[test]
    fn test_corner_when_rival_saturates_hazard() {
        let condition = MarginalCondition::new(player(), hazard(0.5), 1.0, 10.0).unwrap();
        let solution = condition.solve(1e-10, 500).unwrap();
        assert_eq!(solution.runtime, 0.0);
        assert!(!solution.interior);
    }
}
