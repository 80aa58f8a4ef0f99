//! Parameter records - immutable snapshots of model primitives
//!
//! Each model copies its parameter record on construction. Comparative statics
//! never mutate a shared record: `with_*` returns a new value for every grid point.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ensure_non_negative, ensure_positive, DomainError, Result};

/// Primitives of the single-planner "run AI for T years" model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaticParameters {
    /// Relative risk aversion γ
    pub gamma: f64,
    /// Utility shift ū
    pub ubar: f64,
    /// Baseline consumption c0
    pub c0: f64,
    /// AI-driven consumption growth rate g
    pub g: f64,
    /// Hazard flow δ while AI runs
    pub delta: f64,
}

impl StaticParameters {
    pub fn new(gamma: f64, ubar: f64, c0: f64, g: f64, delta: f64) -> Self {
        Self {
            gamma,
            ubar,
            c0,
            g,
            delta,
        }
    }

    /// Copy with a different hazard flow
    pub fn with_delta(self, delta: f64) -> Self {
        Self { delta, ..self }
    }

    /// Copy with a different growth rate
    pub fn with_growth(self, g: f64) -> Self {
        Self { g, ..self }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("gamma", self.gamma)?;
        ensure_finite("ubar", self.ubar)?;
        ensure_positive("c0", self.c0)?;
        ensure_positive("g", self.g)?;
        ensure_positive("delta", self.delta)?;
        Ok(())
    }
}

/// Primitives of the dynamic mortality-growth adoption model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DynamicParameters {
    /// Relative risk aversion γ
    pub gamma: f64,
    /// Utility shift ū
    pub ubar: f64,
    /// Baseline consumption c0
    pub c0: f64,
    /// Initial population N0 (welfare multiplier)
    pub n0: f64,
    /// Pure time preference ρ
    pub rho: f64,
    /// Fertility b
    pub b: f64,
    /// Baseline consumption growth without AI
    pub g0: f64,
    /// Baseline mortality without AI
    pub m0: f64,
}

impl DynamicParameters {
    /// Defaults: N0 = 1, ρ − b = 0.01, baseline (g0, m0) = (0.02, 0.01)
    pub fn new(gamma: f64, ubar: f64, c0: f64) -> Self {
        Self {
            gamma,
            ubar,
            c0,
            n0: 1.0,
            rho: 0.01,
            b: 0.0,
            g0: 0.02,
            m0: 0.01,
        }
    }

    pub fn with_population(self, n0: f64) -> Self {
        Self { n0, ..self }
    }

    pub fn with_discount(self, rho: f64, b: f64) -> Self {
        Self { rho, b, ..self }
    }

    pub fn with_baseline(self, g0: f64, m0: f64) -> Self {
        Self { g0, m0, ..self }
    }

    /// ρ − b + m
    #[inline]
    pub fn effective_discount(&self, m: f64) -> f64 {
        self.rho - self.b + m
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("gamma", self.gamma)?;
        ensure_finite("ubar", self.ubar)?;
        ensure_positive("c0", self.c0)?;
        ensure_positive("n0", self.n0)?;
        ensure_finite("rho", self.rho)?;
        ensure_finite("b", self.b)?;
        ensure_non_negative("g0", self.g0)?;
        ensure_finite("m0", self.m0)?;

        let discount = self.effective_discount(self.m0);
        if discount <= 0.0 {
            return Err(DomainError::NonPositiveDiscount { value: discount }.into());
        }
        Ok(())
    }
}

/// Growth and mortality once AI is adopted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiScenario {
    pub g_ai: f64,
    pub m_ai: f64,
}

impl AiScenario {
    pub fn new(g_ai: f64, m_ai: f64) -> Self {
        Self { g_ai, m_ai }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("g_ai", self.g_ai)?;
        ensure_finite("m_ai", self.m_ai)?;
        Ok(())
    }
}

/// One player of the shared-hazard game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerParameters {
    /// Relative risk aversion γ_i
    pub gamma: f64,
    /// Utility shift ū_i
    pub ubar: f64,
    /// Baseline consumption c0_i
    pub c0: f64,
    /// Growth rate g_i
    pub g: f64,
    /// Weight ω_i of this player's runtime in aggregate risk
    pub omega: f64,
}

impl PlayerParameters {
    pub fn new(gamma: f64, ubar: f64, c0: f64, g: f64) -> Self {
        Self {
            gamma,
            ubar,
            c0,
            g,
            omega: 1.0,
        }
    }

    pub fn with_weight(self, omega: f64) -> Self {
        Self { omega, ..self }
    }

    pub fn with_growth(self, g: f64) -> Self {
        Self { g, ..self }
    }

    /// Single-agent snapshot facing the given (effective) hazard flow
    pub fn to_static(&self, hazard: f64) -> StaticParameters {
        StaticParameters::new(self.gamma, self.ubar, self.c0, self.g, hazard)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("gamma", self.gamma)?;
        ensure_finite("ubar", self.ubar)?;
        ensure_positive("c0", self.c0)?;
        ensure_positive("g", self.g)?;
        ensure_positive("omega", self.omega)?;
        Ok(())
    }
}

/// Hazard primitives shared by both players: H(Q) = Q + κQ²/2 scaled by δ
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SharedHazard {
    /// Hazard intensity δ
    pub delta: f64,
    /// Convexity κ of the aggregator
    pub kappa: f64,
}

impl SharedHazard {
    pub fn new(delta: f64, kappa: f64) -> Self {
        Self { delta, kappa }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("delta", self.delta)?;
        ensure_non_negative("kappa", self.kappa)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_returns_new_snapshot() {
        let base = StaticParameters::new(2.0, 7.0, 1.0, 0.10, 0.01);
        let swept = base.with_delta(0.02);
        assert_eq!(base.delta, 0.01);
        assert_eq!(swept.delta, 0.02);
        assert_eq!(swept.g, base.g);
    }

    #[test]
    fn test_static_validation() {
        assert!(StaticParameters::new(2.0, 7.0, 1.0, 0.10, 0.01).validate().is_ok());
        assert!(StaticParameters::new(0.0, 7.0, 1.0, 0.10, 0.01).validate().is_err());
        assert!(StaticParameters::new(2.0, 7.0, -1.0, 0.10, 0.01).validate().is_err());
        assert!(StaticParameters::new(2.0, 7.0, 1.0, 0.10, 0.0).validate().is_err());
    }

    #[test]
    fn test_dynamic_discount_invariant() {
        let params = DynamicParameters::new(2.0, 7.0, 1.0);
        assert!(params.validate().is_ok());
        assert!((params.effective_discount(0.01) - 0.02).abs() < 1e-12);

        let degenerate = params.with_discount(0.01, 0.03).with_baseline(0.0, 0.01);
        assert!(matches!(
            degenerate.validate(),
            Err(crate::ModelError::Domain(DomainError::NonPositiveDiscount { .. }))
        ));
    }

    #[test]
    fn test_player_to_static() {
        let player = PlayerParameters::new(2.0, 7.0, 1.0, 0.10).with_weight(1.5);
        let snapshot = player.to_static(0.02);
        assert_eq!(snapshot.delta, 0.02);
        assert_eq!(snapshot.gamma, 2.0);
        assert!(player.validate().is_ok());
        assert!(player.with_weight(0.0).validate().is_err());
    }

    #[test]
    fn test_shared_hazard_validation() {
        assert!(SharedHazard::new(0.01, 0.0).validate().is_ok());
        assert!(SharedHazard::new(0.01, -0.1).validate().is_err());
        assert!(SharedHazard::new(0.0, 0.1).validate().is_err());
    }
}
