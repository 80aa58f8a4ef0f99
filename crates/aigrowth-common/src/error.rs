//! Error types for the AI growth/risk model
//!
//! Provides a unified error type and domain-specific error variants.
//! Non-convergence of the equilibrium solver is not an error: it is reported
//! through [`crate::EquilibriumState::converged`].

use thiserror::Error;

/// Result type alias using ModelError
pub type Result<T> = std::result::Result<T, ModelError>;

/// Unified error type for model operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    // Invalid inputs
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    // No real solution at the given parameters
    #[error("Undefined model: {0}")]
    Undefined(#[from] UndefinedModelError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ModelError {
    /// True for invalid-parameter failures
    pub fn is_domain(&self) -> bool {
        matches!(self, ModelError::Domain(_))
    }

    /// True when the closed forms have no real solution
    pub fn is_undefined(&self) -> bool {
        matches!(self, ModelError::Undefined(_))
    }
}

/// Invalid parameter values, detected before any computation proceeds
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("{name} must be non-negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("effective discount rate rho - b + m must be positive, got {value}")]
    NonPositiveDiscount { value: f64 },

    #[error("welfare integral is singular: rho - b + m + (gamma - 1) g = {denominator}")]
    SingularDiscount { denominator: f64 },

    #[error("welfare integral diverges: rho - b + m + (gamma - 1) g = {denominator} < 0")]
    DivergentWelfare { denominator: f64 },

    #[error("runtime menu must contain at least one option")]
    EmptyMenu,

    #[error("player index {0} out of range (expected 0 or 1)")]
    PlayerIndex(usize),
}

/// Closed forms that have no real solution at the given parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UndefinedModelError {
    #[error("optimal consumption base {base} is non-positive (exponent {exponent})")]
    NonPositiveBase { base: f64, exponent: f64 },

    #[error("utility shift ubar is zero; the first-order condition has no solution")]
    ZeroShift,

    #[error("stationary point is a welfare minimum (ubar = {ubar}, gamma = {gamma})")]
    WelfareMinimum { ubar: f64, gamma: f64 },

    #[error("AI-scenario welfare is zero; adoption threshold undefined")]
    ZeroWelfare,

    #[error("singularity limit requires gamma > 1, got {gamma}")]
    SingularityCurvature { gamma: f64 },
}

/// Check that `value` is finite and strictly positive.
pub fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    ensure_finite(name, value)?;
    if value <= 0.0 {
        return Err(DomainError::NonPositive { name, value }.into());
    }
    Ok(value)
}

/// Check that `value` is finite and not negative.
pub fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64> {
    ensure_finite(name, value)?;
    if value < 0.0 {
        return Err(DomainError::Negative { name, value }.into());
    }
    Ok(value)
}

/// Check that `value` is finite.
pub fn ensure_finite(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(DomainError::NonFinite { name, value }.into());
    }
    Ok(value)
}
