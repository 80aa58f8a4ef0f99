//! # AI Growth Runner
//!
//! Runs the comparative-statics experiments over the static, dynamic, and
//! shared-hazard models and writes one CSV dataset per experiment.
//!
//! ```text
//! <output_dir>/<run_id>/simple_model_delta_sweep.csv
//!                      /simple_model_growth_sweep.csv
//!                      /dynamic_model_mortality_sweep.csv
//!                      /dynamic_model_growth_sweep.csv
//!                      /dynamic_model_singularity_limit.csv
//!                      /shared_hazard_kappa_sweep.csv
//! ```

pub mod config;
pub mod experiments;
pub mod output;

pub use config::RunnerConfig;
pub use experiments::{run_id, ExperimentArtifact, ExperimentRunner};

/// Runner version
pub const RUNNER_VERSION: &str = env!("CARGO_PKG_VERSION");
