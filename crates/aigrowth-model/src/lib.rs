//! # AI Growth Model
//!
//! Closed-form models of the trade-off between AI-driven consumption growth and
//! AI-induced existential hazard.
//!
//! ## Utility
//!
//! ```text
//! u(c) = ū + c^(1−γ)/(1−γ)      (γ ≠ 1)
//! u(c) = ū + ln c               (γ = 1)
//! v(c) = u(c) / (u'(c) c)
//! ```
//!
//! ## Static Model
//!
//! Run AI for `T` years: consumption grows as `c0 e^{gT}` while the hazard flow `δ`
//! erodes survival. The optimum satisfies `v(c*) = g/δ`, so
//!
//! ```text
//! T* = ln(c*/c0) / g        P_ext = 1 − e^{−δT*}
//! ```
//!
//! ## Dynamic Model
//!
//! ```text
//! U(g, m) = N0 [ ū/(ρ−b+m) + (c0^(1−γ)/(1−γ)) / (ρ−b+m+(γ−1)g) ]
//! δ*      = 1 − U(g0, m0) / U(g_AI, m_AI)
//! ```

pub mod calibration;
pub mod dynamic_model;
pub mod static_model;
pub mod sweep;
pub mod utility;

pub use calibration::calibrate_ubar;
pub use dynamic_model::DynamicModel;
pub use static_model::StaticModel;
pub use sweep::Sweep;
pub use utility::CrraUtility;
