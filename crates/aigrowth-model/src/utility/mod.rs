//! Utility primitives

pub mod crra;

pub use self::crra::CrraUtility;

use aigrowth_common::Result;

/// u(c) for the given curvature and shift
pub fn utility(c: f64, gamma: f64, ubar: f64) -> Result<f64> {
    CrraUtility::new(gamma, ubar)?.u(c)
}

/// u'(c) = c^(−γ)
pub fn marginal_utility(c: f64, gamma: f64) -> Result<f64> {
    CrraUtility::new(gamma, 0.0)?.u_prime(c)
}

/// v(c) = u(c) / (u'(c) c)
pub fn value_ratio(c: f64, gamma: f64, ubar: f64) -> Result<f64> {
    CrraUtility::new(gamma, ubar)?.v(c)
}
