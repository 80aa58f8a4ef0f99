//! Nash equilibrium of the two-player shared-hazard game

use aigrowth_common::{
    error::ensure_non_negative, DomainError, EquilibriumState, ModelError, PlayerOutcome,
    PlayerParameters, Result, SharedHazard, SolveMethod, SweepResult,
};
use aigrowth_model::{CrraUtility, Sweep};
use tracing::{debug, instrument, trace, warn};

use crate::{
    best_response::{BestResponse, MarginalCondition},
    hazard::QuadraticHazard,
    symmetric::symmetric_runtime,
    SolverConfig,
};

/// Two players sharing one convex extinction hazard
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharedHazardGame {
    players: [PlayerParameters; 2],
    hazard: QuadraticHazard,
    config: SolverConfig,
}

impl SharedHazardGame {
    pub fn new(players: [PlayerParameters; 2], shared: SharedHazard) -> Result<Self> {
        for player in &players {
            player.validate()?;
        }
        Ok(Self {
            players,
            hazard: QuadraticHazard::new(shared)?,
            config: SolverConfig::default(),
        })
    }

    /// Identical players
    pub fn symmetric(player: PlayerParameters, shared: SharedHazard) -> Result<Self> {
        Self::new([player, player], shared)
    }

    pub fn with_config(self, config: SolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, ..self })
    }

    pub fn players(&self) -> &[PlayerParameters; 2] {
        &self.players
    }

    pub fn hazard(&self) -> &QuadraticHazard {
        &self.hazard
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn is_symmetric(&self) -> bool {
        self.players[0] == self.players[1]
    }

    fn weights(&self) -> [f64; 2] {
        [self.players[0].omega, self.players[1].omega]
    }

    /// Solve, taking the scalar path when the players are identical
    pub fn solve(&self) -> Result<EquilibriumState> {
        if self.is_symmetric() {
            self.solve_symmetric()
        } else {
            self.solve_iterative()
        }
    }

    /// Damped best-response iteration over (T1, T2)
    ///
    /// Starts from the responses at Q = 0, which are already the equilibrium
    /// when κ = 0. The relaxation factor halves whenever a step grows.
    /// Running out of iterations is reported through `converged`, not an error.
    #[instrument(skip(self), fields(kappa = self.hazard.kappa(), delta = self.hazard.delta()))]
    pub fn solve_iterative(&self) -> Result<EquilibriumState> {
        let SolverConfig {
            tolerance,
            max_iterations,
            mut damping,
            min_damping,
        } = self.config;

        let mut runtimes = self.responses_at(0.0)?;
        let mut previous_step = f64::INFINITY;
        let mut step = f64::INFINITY;

        for iteration in 1..=max_iterations {
            let aggregate = QuadraticHazard::aggregate(self.weights(), runtimes);
            let targets = self.responses_at(aggregate)?;
            step = (targets[0] - runtimes[0])
                .abs()
                .max((targets[1] - runtimes[1]).abs());

            if step < tolerance {
                debug!(iteration, step, "Best-response iteration converged");
                return Ok(self.state(targets, true, iteration, step, None, SolveMethod::Iterative));
            }

            if step > previous_step && damping > min_damping {
                damping = (0.5 * damping).max(min_damping);
                debug!(iteration, step, damping, "Step grew, tightening relaxation");
            }
            previous_step = step;

            for (runtime, target) in runtimes.iter_mut().zip(targets) {
                *runtime += damping * (target - *runtime);
            }
            trace!(iteration, step, t1 = runtimes[0], t2 = runtimes[1]);
        }

        warn!(
            max_iterations,
            step,
            t1 = runtimes[0],
            t2 = runtimes[1],
            "Best-response iteration did not converge"
        );
        Ok(self.state(
            runtimes,
            false,
            max_iterations,
            step,
            None,
            SolveMethod::Iterative,
        ))
    }

    /// Scalar root of the symmetric condition; players must be identical
    #[instrument(skip(self), fields(kappa = self.hazard.kappa(), delta = self.hazard.delta()))]
    pub fn solve_symmetric(&self) -> Result<EquilibriumState> {
        if !self.is_symmetric() {
            return Err(ModelError::Config(
                "symmetric solve requires identical players".into(),
            ));
        }

        let solution = symmetric_runtime(&self.players[0], &self.hazard, &self.config)?;
        if !solution.converged {
            warn!(
                iterations = solution.iterations,
                residual = solution.residual,
                "Symmetric bisection hit the iteration cap"
            );
        }
        Ok(self.state(
            [solution.runtime; 2],
            solution.converged,
            solution.iterations,
            solution.bracket,
            Some(solution.residual),
            SolveMethod::Symmetric,
        ))
    }

    /// Exact best response of `player` to the other player's runtime
    pub fn best_response(&self, player: usize, other_runtime: f64) -> Result<BestResponse> {
        if player > 1 {
            return Err(DomainError::PlayerIndex(player).into());
        }
        ensure_non_negative("other_runtime", other_runtime)?;

        let own = self.players[player];
        let other = self.players[1 - player];
        let condition =
            MarginalCondition::new(own, self.hazard, own.omega, other.omega * other_runtime)?;
        let solution = condition.solve(self.config.tolerance, self.config.max_iterations)?;
        Ok(condition.response(&solution))
    }

    /// Survival, consumption, and expected utility for any runtime pair
    pub fn outcome(&self, t1: f64, t2: f64) -> Result<[PlayerOutcome; 2]> {
        ensure_non_negative("t1", t1)?;
        ensure_non_negative("t2", t2)?;
        let runtimes = [t1, t2];
        let survival = self
            .hazard
            .survival(QuadraticHazard::aggregate(self.weights(), runtimes));

        let evaluate = |i: usize| -> Result<PlayerOutcome> {
            let player = &self.players[i];
            let utility = CrraUtility::new(player.gamma, player.ubar)?;
            let consumption = player.c0 * (player.g * runtimes[i]).exp();
            Ok(PlayerOutcome {
                runtime: runtimes[i],
                survival,
                consumption,
                expected_utility: survival * utility.u(consumption)?,
            })
        };
        Ok([evaluate(0)?, evaluate(1)?])
    }

    /// Equilibria across hazard convexities, players and δ fixed
    pub fn sweep_kappa(
        &self,
        sweep: &Sweep,
        kappas: &[f64],
    ) -> Result<SweepResult<EquilibriumState>> {
        let game = *self;
        sweep.run(kappas, |kappa| {
            let shared = SharedHazard::new(game.hazard.delta(), kappa);
            Self::new(game.players, shared)?
                .with_config(game.config)?
                .solve()
        })
    }

    fn responses_at(&self, aggregate: f64) -> Result<[f64; 2]> {
        Ok([
            BestResponse::at_aggregate(&self.players[0], &self.hazard, aggregate)?.runtime,
            BestResponse::at_aggregate(&self.players[1], &self.hazard, aggregate)?.runtime,
        ])
    }

    fn state(
        &self,
        runtimes: [f64; 2],
        converged: bool,
        iterations: usize,
        step: f64,
        condition_residual: Option<f64>,
        method: SolveMethod,
    ) -> EquilibriumState {
        let aggregate_risk = QuadraticHazard::aggregate(self.weights(), runtimes);
        EquilibriumState {
            runtimes,
            aggregate_risk,
            hazard_slope: self.hazard.slope(aggregate_risk),
            survival: self.hazard.survival(aggregate_risk),
            converged,
            iterations,
            step,
            condition_residual,
            method,
        }
    }
}
