//! Runner configuration

use std::path::PathBuf;

use aigrowth_common::{
    DynamicParameters, PlayerParameters, DEFAULT_DAMPING, DEFAULT_MAX_ITERATIONS,
    DEFAULT_TARGET_V, DEFAULT_TOLERANCE, MIN_DAMPING,
};
use aigrowth_cournot::SolverConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Experiment runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Root directory; each run writes into `<output_dir>/<run_id>/`
    pub output_dir: PathBuf,
    /// Evaluate sweep points on the rayon pool
    pub parallel: bool,
    /// Abort an experiment on its first failing point
    pub fail_fast: bool,
    pub static_model: StaticExperimentSettings,
    pub dynamic_model: DynamicExperimentSettings,
    pub shared_hazard: SharedHazardSettings,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("out/simulations"),
            parallel: false,
            fail_fast: false,
            static_model: StaticExperimentSettings::default(),
            dynamic_model: DynamicExperimentSettings::default(),
            shared_hazard: SharedHazardSettings::default(),
        }
    }
}

impl RunnerConfig {
    /// Load configuration from `.env` and `AIGROWTH_*` environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        let mut cfg = Self::default();
        cfg.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(cfg)
    }

    /// Apply overrides from any key/value source
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(dir) = lookup("AIGROWTH_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(val) = lookup("AIGROWTH_PARALLEL") {
            self.parallel = parse_flag("AIGROWTH_PARALLEL", &val)?;
        }
        if let Some(val) = lookup("AIGROWTH_FAIL_FAST") {
            self.fail_fast = parse_flag("AIGROWTH_FAIL_FAST", &val)?;
        }

        // Solver settings
        if let Some(val) = lookup("AIGROWTH_MAX_ITERATIONS") {
            self.shared_hazard.max_iterations = val
                .parse()
                .with_context(|| format!("AIGROWTH_MAX_ITERATIONS: invalid value {val:?}"))?;
        }
        if let Some(val) = lookup("AIGROWTH_TOLERANCE") {
            self.shared_hazard.tolerance = val
                .parse()
                .with_context(|| format!("AIGROWTH_TOLERANCE: invalid value {val:?}"))?;
        }
        Ok(())
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("{key}: expected a boolean, got {other:?}"),
    }
}

/// Static single-planner experiments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticExperimentSettings {
    pub c0: f64,
    pub g: f64,
    pub delta: f64,
    pub gamma: f64,
    /// Calibration target v(c0)
    pub target_v: f64,
    pub delta_grid: Vec<f64>,
    pub growth_grid: Vec<f64>,
}

impl Default for StaticExperimentSettings {
    fn default() -> Self {
        Self {
            c0: 1.0,
            g: 0.10,
            delta: 0.01,
            gamma: 2.0,
            target_v: DEFAULT_TARGET_V,
            delta_grid: vec![
                0.001, 0.0025, 0.005, 0.0075, 0.01, 0.015, 0.02, 0.03, 0.04, 0.05,
            ],
            growth_grid: vec![0.02, 0.04, 0.06, 0.08, 0.10, 0.12, 0.14, 0.16, 0.18, 0.20],
        }
    }
}

/// Dynamic adoption experiments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamicExperimentSettings {
    pub c0: f64,
    pub n0: f64,
    pub gamma: f64,
    pub target_v: f64,
    /// ρ − b; stored as ρ with b = 0
    pub rho_minus_b: f64,
    pub g0: f64,
    pub m0: f64,
    pub ai_growth_grid: Vec<f64>,
    pub ai_mortality_grid: Vec<f64>,
}

impl Default for DynamicExperimentSettings {
    fn default() -> Self {
        Self {
            c0: 1.0,
            n0: 1.0,
            gamma: 2.0,
            target_v: DEFAULT_TARGET_V,
            rho_minus_b: 0.01,
            g0: 0.02,
            m0: 0.01,
            ai_growth_grid: vec![
                0.02, 0.04, 0.06, 0.08, 0.10, 0.12, 0.14, 0.16, 0.18, 0.20, 0.25, 0.30,
            ],
            ai_mortality_grid: vec![
                0.0, 0.0025, 0.005, 0.0075, 0.01, 0.015, 0.02, 0.03, 0.04, 0.05,
            ],
        }
    }
}

impl DynamicExperimentSettings {
    /// Model parameters with ū already calibrated
    pub fn parameters(&self, ubar: f64) -> DynamicParameters {
        DynamicParameters::new(self.gamma, ubar, self.c0)
            .with_population(self.n0)
            .with_discount(self.rho_minus_b, 0.0)
            .with_baseline(self.g0, self.m0)
    }

    /// AI growth held fixed in the mortality sweep (largest grid value)
    pub fn mortality_sweep_growth(&self) -> Option<f64> {
        self.ai_growth_grid.last().copied()
    }

    /// AI mortality held fixed in the growth sweep (fourth grid value)
    pub fn growth_sweep_mortality(&self) -> Option<f64> {
        self.ai_mortality_grid
            .get(3)
            .or_else(|| self.ai_mortality_grid.last())
            .copied()
    }
}

/// Two-player shared-hazard experiments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedHazardSettings {
    pub c0: f64,
    pub gamma: f64,
    pub target_v: f64,
    pub delta: f64,
    /// Growth rates (g1, g2)
    pub growth: [f64; 2],
    /// Risk weights (ω1, ω2)
    pub weights: [f64; 2],
    pub kappa_grid: Vec<f64>,
    pub tolerance: f64,
    pub max_iterations: usize,
    pub damping: f64,
    pub min_damping: f64,
}

impl Default for SharedHazardSettings {
    fn default() -> Self {
        Self {
            c0: 1.0,
            gamma: 2.0,
            target_v: DEFAULT_TARGET_V,
            delta: 0.01,
            growth: [0.10, 0.11],
            weights: [1.0, 1.5],
            kappa_grid: vec![0.0, 0.05, 0.1, 0.2, 0.3, 0.45, 0.6],
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            damping: DEFAULT_DAMPING,
            min_damping: MIN_DAMPING,
        }
    }
}

impl SharedHazardSettings {
    pub fn solver(&self) -> SolverConfig {
        SolverConfig {
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
            damping: self.damping,
            min_damping: self.min_damping,
        }
    }

    /// Both players with ū already calibrated
    pub fn players(&self, ubar: f64) -> [PlayerParameters; 2] {
        [0, 1].map(|i| {
            PlayerParameters::new(self.gamma, ubar, self.c0, self.growth[i])
                .with_weight(self.weights[i])
        })
    }
}
