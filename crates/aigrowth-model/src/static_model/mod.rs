//! Single-planner static model: run AI for T years, then switch it off
//!
//! Consumption grows as `c0 e^{gT}` while AI runs and survival decays as `e^{−δT}`.
//! Welfare `W(T) = e^{−δT} u(c0 e^{gT})` peaks where `v(c*) = g/δ`.

mod menu;

use aigrowth_common::{
    error::ensure_non_negative, Result, RuntimeDecision, RuntimeOutcome, StaticParameters,
    StaticSummary, SweepResult, UndefinedModelError,
};
use tracing::instrument;

use crate::{calibration::calibrate_ubar, sweep::Sweep, utility::CrraUtility};

/// Static "run AI for T years" model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticModel {
    params: StaticParameters,
    utility: CrraUtility,
}

impl StaticModel {
    /// Fails with a domain error on invalid parameters
    pub fn new(params: StaticParameters) -> Result<Self> {
        params.validate()?;
        let utility = CrraUtility::new(params.gamma, params.ubar)?;
        Ok(Self { params, utility })
    }

    /// Build with ū calibrated so that v(c0) = target_v
    pub fn calibrated(c0: f64, g: f64, delta: f64, gamma: f64, target_v: f64) -> Result<Self> {
        let ubar = calibrate_ubar(target_v, c0, gamma)?;
        Self::new(StaticParameters::new(gamma, ubar, c0, g, delta))
    }

    pub fn params(&self) -> &StaticParameters {
        &self.params
    }

    pub fn utility(&self) -> &CrraUtility {
        &self.utility
    }

    /// Optimal consumption threshold c*, solving v(c*) = g/δ
    ///
    /// The stationary point must be a maximum of W(T), which requires v to be
    /// increasing (ū(γ−1) > 0 off the log branch).
    pub fn c_star(&self) -> Result<f64> {
        let c_star = self
            .utility
            .invert_value_ratio(self.params.g / self.params.delta)?;
        if self.utility.v_slope_sign() < 0.0 {
            return Err(UndefinedModelError::WelfareMinimum {
                ubar: self.params.ubar,
                gamma: self.params.gamma,
            }
            .into());
        }
        Ok(c_star)
    }

    /// Unconstrained optimal runtime T* = ln(c*/c0)/g; negative when c0 > c*
    pub fn t_star(&self) -> Result<f64> {
        Ok((self.c_star()? / self.params.c0).ln() / self.params.g)
    }

    /// Deploy for T* years, or abstain when T* ≤ 0
    pub fn optimal_runtime(&self) -> Result<RuntimeDecision> {
        Ok(RuntimeDecision::from_t_star(self.t_star()?))
    }

    /// 1 − e^{−δT} at the deployed runtime
    pub fn total_extinction_prob(&self) -> Result<f64> {
        let runtime = self.optimal_runtime()?.runtime();
        Ok(self.extinction_prob_at(runtime))
    }

    /// Full set of derived quantities
    #[instrument(skip(self), fields(gamma = self.params.gamma, g = self.params.g, delta = self.params.delta))]
    pub fn summary(&self) -> Result<StaticSummary> {
        let c_star = self.c_star()?;
        let t_star = (c_star / self.params.c0).ln() / self.params.g;
        let decision = RuntimeDecision::from_t_star(t_star);
        let runtime = decision.runtime();

        Ok(StaticSummary {
            c_star,
            t_star,
            runtime,
            extinction_prob: self.extinction_prob_at(runtime),
            deployment_worthwhile: decision.is_deploy(),
            ubar: self.params.ubar,
            gamma: self.params.gamma,
            g: self.params.g,
            delta: self.params.delta,
            c0: self.params.c0,
        })
    }

    /// c0 e^{gT}
    #[inline]
    pub fn consumption_at(&self, runtime: f64) -> f64 {
        self.params.c0 * (self.params.g * runtime).exp()
    }

    #[inline]
    fn survival_at(&self, runtime: f64) -> f64 {
        (-self.params.delta * runtime).exp()
    }

    #[inline]
    fn extinction_prob_at(&self, runtime: f64) -> f64 {
        -(-self.params.delta * runtime).exp_m1()
    }

    /// W(T) = e^{−δT} u(c0 e^{gT})
    pub fn welfare_at(&self, runtime: f64) -> Result<f64> {
        ensure_non_negative("runtime", runtime)?;
        Ok(self.survival_at(runtime) * self.utility.u(self.consumption_at(runtime))?)
    }

    /// Survival, consumption, and expected utility of running AI for `runtime` years
    pub fn evaluate_runtime(&self, runtime: f64) -> Result<RuntimeOutcome> {
        ensure_non_negative("runtime", runtime)?;
        let consumption = self.consumption_at(runtime);
        let survival_prob = self.survival_at(runtime);
        Ok(RuntimeOutcome {
            runtime,
            consumption,
            survival_prob,
            extinction_prob: self.extinction_prob_at(runtime),
            expected_utility: survival_prob * self.utility.u(consumption)?,
        })
    }

    /// Re-evaluate the summary for each δ, all else fixed
    pub fn comparative_statics_over_delta(&self, deltas: &[f64]) -> SweepResult<StaticSummary> {
        let params = self.params;
        Sweep::new().evaluate(deltas, |delta| {
            Self::new(params.with_delta(delta))?.summary()
        })
    }

    /// Re-evaluate the summary for each growth rate, all else fixed
    pub fn comparative_statics_over_growth(&self, growth: &[f64]) -> SweepResult<StaticSummary> {
        let params = self.params;
        Sweep::new().evaluate(growth, |g| Self::new(params.with_growth(g))?.summary())
    }

    /// δ sweep with explicit execution settings
    pub fn sweep_delta(&self, sweep: &Sweep, deltas: &[f64]) -> Result<SweepResult<StaticSummary>> {
        let params = self.params;
        sweep.run(deltas, |delta| Self::new(params.with_delta(delta))?.summary())
    }

    /// Growth sweep with explicit execution settings
    pub fn sweep_growth(&self, sweep: &Sweep, growth: &[f64]) -> Result<SweepResult<StaticSummary>> {
        let params = self.params;
        sweep.run(growth, |g| Self::new(params.with_growth(g))?.summary())
    }
}
