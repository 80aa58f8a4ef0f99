//! CRRA utility with a level shift: u(c) = ū + c^(1−γ)/(1−γ), log at γ = 1

use aigrowth_common::{
    error::{ensure_finite, ensure_positive},
    is_unit_curvature, Result, UndefinedModelError, UtilityResult,
};
use serde::{Deserialize, Serialize};

/// Functional form selected by the curvature
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Branch {
    /// γ within `UNIT_CURVATURE_TOLERANCE` of 1
    Log,
    /// Any other γ > 0
    Power,
}

/// Constant relative risk aversion utility
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrraUtility {
    gamma: f64,
    ubar: f64,
    branch: Branch,
}

impl CrraUtility {
    /// Fails with a domain error when γ ≤ 0 or ū is not finite
    pub fn new(gamma: f64, ubar: f64) -> Result<Self> {
        ensure_positive("gamma", gamma)?;
        ensure_finite("ubar", ubar)?;
        let branch = if is_unit_curvature(gamma) {
            Branch::Log
        } else {
            Branch::Power
        };
        Ok(Self {
            gamma,
            ubar,
            branch,
        })
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn ubar(&self) -> f64 {
        self.ubar
    }

    pub fn branch(&self) -> Branch {
        self.branch
    }

    pub fn is_log(&self) -> bool {
        self.branch == Branch::Log
    }

    /// Consumption part of utility: c^(1−γ)/(1−γ) or ln c
    pub fn consumption_term(&self, c: f64) -> Result<f64> {
        ensure_positive("consumption", c)?;
        Ok(match self.branch {
            Branch::Log => c.ln(),
            Branch::Power => c.powf(1.0 - self.gamma) / (1.0 - self.gamma),
        })
    }

    /// u(c)
    pub fn u(&self, c: f64) -> Result<f64> {
        Ok(self.ubar + self.consumption_term(c)?)
    }

    /// u'(c) = c^(−γ)
    pub fn u_prime(&self, c: f64) -> Result<f64> {
        ensure_positive("consumption", c)?;
        Ok(match self.branch {
            Branch::Log => 1.0 / c,
            Branch::Power => c.powf(-self.gamma),
        })
    }

    /// v(c) = u(c) / (u'(c) c), in reduced form
    pub fn v(&self, c: f64) -> Result<f64> {
        ensure_positive("consumption", c)?;
        Ok(match self.branch {
            Branch::Log => self.ubar + c.ln(),
            Branch::Power => {
                self.ubar * c.powf(self.gamma - 1.0) + 1.0 / (1.0 - self.gamma)
            }
        })
    }

    /// Slope sign of v: positive when v is increasing in c
    pub fn v_slope_sign(&self) -> f64 {
        match self.branch {
            Branch::Log => 1.0,
            Branch::Power => (self.ubar * (self.gamma - 1.0)).signum(),
        }
    }

    /// u, u' at one consumption level
    pub fn evaluate(&self, c: f64) -> Result<UtilityResult> {
        Ok(UtilityResult {
            consumption: c,
            utility: self.u(c)?,
            marginal: self.u_prime(c)?,
        })
    }

    /// Consumption level c with v(c) = target
    ///
    /// ```text
    /// γ ≠ 1: c = [ (target + 1/(γ−1)) / ū ]^{1/(γ−1)}
    /// γ = 1: c = exp(target − ū)
    /// ```
    ///
    /// A non-positive bracket has no real root and is an undefined-model error.
    pub fn invert_value_ratio(&self, target: f64) -> Result<f64> {
        ensure_finite("value ratio target", target)?;
        match self.branch {
            Branch::Log => Ok((target - self.ubar).exp()),
            Branch::Power => {
                if self.ubar == 0.0 {
                    return Err(UndefinedModelError::ZeroShift.into());
                }
                let exponent = 1.0 / (self.gamma - 1.0);
                let base = (target + exponent) / self.ubar;
                if !(base > 0.0) {
                    return Err(UndefinedModelError::NonPositiveBase { base, exponent }.into());
                }
                Ok(base.powf(exponent))
            }
        }
    }
}
