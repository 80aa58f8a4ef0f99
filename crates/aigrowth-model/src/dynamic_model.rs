//! Dynamic adoption model with population growth, mortality, and discounting
//!
//! Welfare of a dynasty growing consumption at `g` and dying at rate `m`:
//!
//! ```text
//! U(g, m) = N0 [ ū/(ρ−b+m) + (c0^(1−γ)/(1−γ)) / (ρ−b+m+(γ−1)g) ]     γ ≠ 1
//! U(g, m) = N0 [ (ū + ln c0)/(ρ−b+m) + g/(ρ−b+m)² ]                   γ = 1
//! ```
//!
//! Adopting AI is worth a one-time extinction risk up to `δ* = 1 − U0/U_AI`.

use aigrowth_common::{
    error::{ensure_finite, ensure_non_negative},
    AdoptionSummary, AiScenario, DomainError, DynamicParameters, Result, SingularitySummary,
    SweepResult, UndefinedModelError, SINGULARITY_TOLERANCE,
};
use tracing::{debug, instrument};

use crate::{calibration::calibrate_ubar, sweep::Sweep, utility::CrraUtility};

/// Section-3 style dynamic adoption model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicModel {
    params: DynamicParameters,
    utility: CrraUtility,
}

impl DynamicModel {
    /// Fails with a domain error on invalid parameters or ρ − b + m0 ≤ 0
    pub fn new(params: DynamicParameters) -> Result<Self> {
        params.validate()?;
        let utility = CrraUtility::new(params.gamma, params.ubar)?;
        Ok(Self { params, utility })
    }

    /// Default demographics with ū calibrated to v(c0) = target_v
    pub fn calibrated(c0: f64, gamma: f64, target_v: f64) -> Result<Self> {
        let ubar = calibrate_ubar(target_v, c0, gamma)?;
        Self::new(DynamicParameters::new(gamma, ubar, c0))
    }

    pub fn params(&self) -> &DynamicParameters {
        &self.params
    }

    fn discount(&self, m: f64) -> Result<f64> {
        ensure_finite("mortality", m)?;
        let discount = self.params.effective_discount(m);
        if discount <= 0.0 {
            return Err(DomainError::NonPositiveDiscount { value: discount }.into());
        }
        Ok(discount)
    }

    /// Expected discounted welfare U(g, m)
    pub fn welfare(&self, g: f64, m: f64) -> Result<f64> {
        ensure_non_negative("growth", g)?;
        let discount = self.discount(m)?;
        let DynamicParameters {
            gamma, ubar, c0, n0, ..
        } = self.params;

        if self.utility.is_log() {
            let level = self.utility.u(c0)?;
            return Ok(n0 * (level / discount + g / (discount * discount)));
        }

        let denominator = discount + (gamma - 1.0) * g;
        if denominator.abs() < SINGULARITY_TOLERANCE {
            return Err(DomainError::SingularDiscount { denominator }.into());
        }
        if denominator < 0.0 {
            return Err(DomainError::DivergentWelfare { denominator }.into());
        }

        let level = ubar / discount;
        let consumption = self.utility.consumption_term(c0)? / denominator;
        Ok(n0 * (level + consumption))
    }

    /// U(g0, m0)
    pub fn baseline_welfare(&self) -> Result<f64> {
        self.welfare(self.params.g0, self.params.m0)
    }

    /// Critical one-time risk δ* = 1 − U(g0, m0)/U(g_AI, m_AI)
    pub fn delta_star(&self, g_ai: f64, m_ai: f64) -> Result<f64> {
        let baseline = self.baseline_welfare()?;
        let ai = self.welfare(g_ai, m_ai)?;
        threshold(baseline, ai)
    }

    /// Welfare when AI growth is unbounded: the consumption term vanishes
    ///
    /// Only defined for γ > 1; otherwise the consumption term does not vanish.
    pub fn singularity_welfare(&self, m_ai: f64) -> Result<f64> {
        if self.utility.is_log() || self.params.gamma < 1.0 {
            return Err(UndefinedModelError::SingularityCurvature {
                gamma: self.params.gamma,
            }
            .into());
        }
        let discount = self.discount(m_ai)?;
        Ok(self.params.n0 * self.params.ubar / discount)
    }

    /// δ* in the singularity limit
    pub fn delta_star_singularity(&self, m_ai: f64) -> Result<f64> {
        let baseline = self.baseline_welfare()?;
        let singular = self.singularity_welfare(m_ai)?;
        threshold(baseline, singular)
    }

    /// Baseline and AI welfare with both adoption thresholds
    #[instrument(skip(self), fields(gamma = self.params.gamma))]
    pub fn summary(&self, scenario: AiScenario) -> Result<AdoptionSummary> {
        scenario.validate()?;
        let baseline_welfare = self.baseline_welfare()?;
        let ai_welfare = self.welfare(scenario.g_ai, scenario.m_ai)?;
        let delta_star = threshold(baseline_welfare, ai_welfare)?;

        let singularity_delta_star = match self.delta_star_singularity(scenario.m_ai) {
            Ok(value) => Some(value),
            Err(err) if err.is_undefined() => {
                debug!(error = %err, "Singularity limit not defined");
                None
            }
            Err(err) => return Err(err),
        };

        Ok(AdoptionSummary {
            g0: self.params.g0,
            m0: self.params.m0,
            g_ai: scenario.g_ai,
            m_ai: scenario.m_ai,
            baseline_welfare,
            ai_welfare,
            delta_star,
            singularity_delta_star,
        })
    }

    /// δ* across AI growth rates at fixed AI mortality
    pub fn sweep_growth(&self, g_values: &[f64], m_ai: f64) -> SweepResult<AdoptionSummary> {
        let model = *self;
        Sweep::new().evaluate(g_values, |g_ai| model.summary(AiScenario::new(g_ai, m_ai)))
    }

    /// δ* across AI mortality levels at fixed AI growth
    pub fn sweep_mortality(&self, g_ai: f64, m_values: &[f64]) -> SweepResult<AdoptionSummary> {
        let model = *self;
        Sweep::new().evaluate(m_values, |m_ai| model.summary(AiScenario::new(g_ai, m_ai)))
    }

    /// Singularity-limit δ* across AI mortality levels
    pub fn sweep_singularity(&self, m_values: &[f64]) -> SweepResult<SingularitySummary> {
        let model = *self;
        Sweep::new().evaluate(m_values, |m_ai| model.singularity_summary(m_ai))
    }

    /// Growth sweep with explicit execution settings
    pub fn sweep_growth_with(
        &self,
        sweep: &Sweep,
        g_values: &[f64],
        m_ai: f64,
    ) -> Result<SweepResult<AdoptionSummary>> {
        let model = *self;
        sweep.run(g_values, |g_ai| model.summary(AiScenario::new(g_ai, m_ai)))
    }

    /// Mortality sweep with explicit execution settings
    pub fn sweep_mortality_with(
        &self,
        sweep: &Sweep,
        g_ai: f64,
        m_values: &[f64],
    ) -> Result<SweepResult<AdoptionSummary>> {
        let model = *self;
        sweep.run(m_values, |m_ai| model.summary(AiScenario::new(g_ai, m_ai)))
    }

    /// Singularity sweep with explicit execution settings
    pub fn sweep_singularity_with(
        &self,
        sweep: &Sweep,
        m_values: &[f64],
    ) -> Result<SweepResult<SingularitySummary>> {
        let model = *self;
        sweep.run(m_values, |m_ai| model.singularity_summary(m_ai))
    }

    fn singularity_summary(&self, m_ai: f64) -> Result<SingularitySummary> {
        let singularity_welfare = self.singularity_welfare(m_ai)?;
        let delta_star = threshold(self.baseline_welfare()?, singularity_welfare)?;
        Ok(SingularitySummary {
            m_ai,
            singularity_welfare,
            delta_star,
        })
    }
}

fn threshold(baseline: f64, adopted: f64) -> Result<f64> {
    if adopted == 0.0 || !adopted.is_finite() {
        return Err(UndefinedModelError::ZeroWelfare.into());
    }
    Ok(1.0 - baseline / adopted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn benchmark() -> DynamicModel {
        DynamicModel::calibrated(1.0, 2.0, 6.0).unwrap()
    }

    #[test]
    fn test_welfare_closed_form() {
        let model = benchmark();
        // ū = 7, ρ − b + m = 0.02: U = 7/0.02 − 1/(0.02 + g)
        let u = model.welfare(0.10, 0.01).unwrap();
        assert!((u - (350.0 - 1.0 / 0.12)).abs() < 1e-9);
        assert!((model.baseline_welfare().unwrap() - 325.0).abs() < 1e-9);
    }

    #[test]
    fn test_population_multiplier() {
        let params = DynamicParameters::new(2.0, 7.0, 1.0).with_population(3.0);
        let scaled = DynamicModel::new(params).unwrap();
        let u = scaled.welfare(0.10, 0.01).unwrap();
        assert!((u - 3.0 * benchmark().welfare(0.10, 0.01).unwrap()).abs() < 1e-9);
        // δ* is scale free
        let d1 = scaled.delta_star(0.10, 0.01).unwrap();
        let d2 = benchmark().delta_star(0.10, 0.01).unwrap();
        assert!((d1 - d2).abs() < 1e-12);
    }

    #[test]
    fn test_delta_star_benchmark() {
        let d = benchmark().delta_star(0.10, 0.01).unwrap();
        assert!((d - (1.0 - 325.0 / (350.0 - 1.0 / 0.12))).abs() < 1e-12);
        assert!(d > 0.0 && d < 1.0);
    }

    #[test]
    fn test_concrete_zero_baseline() {
        let params = DynamicParameters::new(2.0, 7.0, 1.0).with_baseline(0.0, 0.0);
        let model = DynamicModel::new(params).unwrap();
        // U0 = 7/0.01 − 1/0.01 = 600, U_AI = 7/0.02 − 1/0.10 = 340
        let d = model.delta_star(0.08, 0.01).unwrap();
        assert!((d - (1.0 - 600.0 / 340.0)).abs() < 1e-9);
        assert!(d < -0.76 && d > -0.77);
    }

    #[test]
    fn test_singular_boundary() {
        // γ = 0.5: denominator 0.02 − 0.5 g vanishes at g = 0.04
        let params = DynamicParameters::new(0.5, 1.0, 1.0);
        let model = DynamicModel::new(params).unwrap();
        let err = model.welfare(0.04, 0.01).unwrap_err();
        assert!(matches!(
            err,
            aigrowth_common::ModelError::Domain(DomainError::SingularDiscount { .. })
        ));
        let err = model.welfare(0.08, 0.01).unwrap_err();
        assert!(matches!(
            err,
            aigrowth_common::ModelError::Domain(DomainError::DivergentWelfare { .. })
        ));
    }

    #[test]
    fn test_non_positive_discount() {
        let model = benchmark();
        assert!(model.welfare(0.10, -0.02).unwrap_err().is_domain());
        let params = DynamicParameters::new(2.0, 7.0, 1.0).with_discount(0.0, 0.05);
        assert!(DynamicModel::new(params).unwrap_err().is_domain());
    }

    #[test]
    fn test_singularity_limit() {
        let model = benchmark();
        let u_sing = model.singularity_welfare(0.01).unwrap();
        assert!((u_sing - 350.0).abs() < 1e-9);
        let d_sing = model.delta_star_singularity(0.01).unwrap();
        // Unbounded growth bounds every finite-growth threshold from above
        assert!(d_sing > model.delta_star(0.30, 0.01).unwrap());
        assert!((d_sing - (1.0 - 325.0 / 350.0)).abs() < 1e-12);
    }

    #[test]
    fn test_singularity_requires_curvature_above_one() {
        let log = DynamicModel::calibrated(1.0, 1.0, 6.0).unwrap();
        assert!(log.delta_star_singularity(0.01).unwrap_err().is_undefined());
        let summary = log.summary(AiScenario::new(0.10, 0.01)).unwrap();
        assert!(summary.singularity_delta_star.is_none());
    }

    #[test]
    fn test_log_welfare() {
        let log = DynamicModel::calibrated(1.0, 1.0, 6.0).unwrap();
        // (ū + ln c0)/D + g/D² with ū = 6, D = 0.02
        let u = log.welfare(0.10, 0.01).unwrap();
        assert!((u - (6.0 / 0.02 + 0.10 / 0.0004)).abs() < 1e-9);
    }

    #[test]
    fn test_sweep_growth_order() {
        let model = benchmark();
        let grid = [0.02, 0.04, 0.08, 0.04];
        let result = model.sweep_growth(&grid, 0.0075);
        assert_eq!(result.values(), grid.to_vec());
        let outputs = result.into_outputs().unwrap();
        assert!(outputs[0].delta_star < outputs[1].delta_star);
        assert!(outputs[1].delta_star < outputs[2].delta_star);
        assert_eq!(outputs[1], outputs[3]);
        assert!(outputs.iter().all(|s| s.m_ai == 0.0075));
    }

    #[test]
    fn test_sweep_mortality_isolates() {
        let model = benchmark();
        let result = model.sweep_mortality(0.30, &[0.0, -0.05, 0.02]);
        assert_eq!(result.failure_count(), 1);
        assert!(result.points()[1].error().unwrap().is_domain());
        let outputs: Vec<f64> = result.successes().map(|(_, s)| s.delta_star).collect();
        // Higher AI mortality lowers the tolerable risk
        assert!(outputs[0] > outputs[1]);
    }

    #[test]
    fn test_sweep_singularity() {
        let model = benchmark();
        let result = model.sweep_singularity(&[0.0, 0.01, 0.05]);
        let outputs = result.into_outputs().unwrap();
        assert!(outputs.windows(2).all(|w| w[0].delta_star > w[1].delta_star));
    }
}
