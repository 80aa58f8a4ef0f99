//! Flat numeric result records
//!
//! These are what the models hand back to callers. They serialize to flat
//! key/value rows so sweep output can go straight into a dataset.

use serde::{Deserialize, Serialize};

/// Utility and marginal utility at one consumption level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtilityResult {
    pub consumption: f64,
    /// u(c)
    pub utility: f64,
    /// u'(c)
    pub marginal: f64,
}

impl UtilityResult {
    /// v(c) = u(c) / (u'(c) c)
    pub fn value_ratio(&self) -> f64 {
        self.utility / (self.marginal * self.consumption)
    }
}

/// Whether AI should run at all, given the unconstrained optimum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum RuntimeDecision {
    /// Run AI for `runtime` years
    Deploy { runtime: f64 },
    /// c0 already exceeds c*: the first-order condition lies `shortfall` years in the past
    Abstain { shortfall: f64 },
}

impl RuntimeDecision {
    pub fn from_t_star(t_star: f64) -> Self {
        if t_star > 0.0 {
            RuntimeDecision::Deploy { runtime: t_star }
        } else {
            RuntimeDecision::Abstain { shortfall: -t_star }
        }
    }

    /// Runtime actually deployed (zero when abstaining)
    pub fn runtime(&self) -> f64 {
        match self {
            RuntimeDecision::Deploy { runtime } => *runtime,
            RuntimeDecision::Abstain { .. } => 0.0,
        }
    }

    pub fn is_deploy(&self) -> bool {
        matches!(self, RuntimeDecision::Deploy { .. })
    }
}

/// Derived quantities of the single-planner model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaticSummary {
    /// Optimal consumption threshold c*
    pub c_star: f64,
    /// Unconstrained optimal runtime; negative means AI is not worthwhile
    pub t_star: f64,
    /// Deployed runtime, max(T*, 0)
    pub runtime: f64,
    /// 1 − exp(−δ · runtime)
    pub extinction_prob: f64,
    pub deployment_worthwhile: bool,
    pub ubar: f64,
    pub gamma: f64,
    pub g: f64,
    pub delta: f64,
    pub c0: f64,
}

impl StaticSummary {
    pub fn decision(&self) -> RuntimeDecision {
        RuntimeDecision::from_t_star(self.t_star)
    }
}

/// Consequences of running AI for a fixed number of years
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuntimeOutcome {
    pub runtime: f64,
    pub consumption: f64,
    pub survival_prob: f64,
    pub extinction_prob: f64,
    /// exp(−δT) · u(c0 e^{gT})
    pub expected_utility: f64,
}

/// Evaluation of a discrete runtime menu against the model optimum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuEvaluation {
    /// One outcome per menu entry, in menu order
    pub options: Vec<RuntimeOutcome>,
    /// Outcome at the deployed optimum
    pub optimal: RuntimeOutcome,
    /// T* clamped into [min(menu), max(menu)]
    pub bounded_optimal_runtime: f64,
    /// Lowest expected utility across the menu
    pub min_expected_utility: f64,
}

impl MenuEvaluation {
    /// Index of the menu option with the highest expected utility
    pub fn best_option(&self) -> Option<usize> {
        self.options
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.expected_utility.total_cmp(&b.expected_utility))
            .map(|(i, _)| i)
    }
}

/// Adoption threshold for one AI scenario of the dynamic model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdoptionSummary {
    pub g0: f64,
    pub m0: f64,
    pub g_ai: f64,
    pub m_ai: f64,
    /// U(g0, m0)
    pub baseline_welfare: f64,
    /// U(g_ai, m_ai)
    pub ai_welfare: f64,
    /// Maximum tolerable one-time risk δ*
    pub delta_star: f64,
    /// δ* with unbounded growth; None when γ ≤ 1
    pub singularity_delta_star: Option<f64>,
}

/// Singularity-limit threshold at one AI mortality level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SingularitySummary {
    pub m_ai: f64,
    pub singularity_welfare: f64,
    pub delta_star: f64,
}
