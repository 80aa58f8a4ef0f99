//! Comparative-statics experiments and their CSV datasets

use std::path::{Path, PathBuf};

use aigrowth_common::{EquilibriumState, SharedHazard, SweepMode};
use aigrowth_cournot::SharedHazardGame;
use aigrowth_model::{calibrate_ubar, DynamicModel, StaticModel, Sweep};
use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use crate::{
    config::RunnerConfig,
    output::{augment_rows, sweep_rows, sweep_rows_with, write_csv, Row},
};

pub const STATIC_DELTA_SWEEP: &str = "simple_model_delta_sweep";
pub const STATIC_GROWTH_SWEEP: &str = "simple_model_growth_sweep";
pub const DYNAMIC_MORTALITY_SWEEP: &str = "dynamic_model_mortality_sweep";
pub const DYNAMIC_GROWTH_SWEEP: &str = "dynamic_model_growth_sweep";
pub const SINGULARITY_LIMIT: &str = "dynamic_model_singularity_limit";
pub const SHARED_HAZARD_KAPPA_SWEEP: &str = "shared_hazard_kappa_sweep";

/// Dataset written by one experiment
#[derive(Debug, Clone, Serialize)]
pub struct ExperimentArtifact {
    pub experiment: &'static str,
    pub csv_path: PathBuf,
    pub rows: usize,
    /// Points recorded with an `error` column
    pub failures: usize,
}

/// Local timestamp `%Y%m%d_%H%M%S`, with `_<tag>` appended when given
pub fn run_id(tag: Option<&str>) -> String {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    match tag {
        Some(tag) if !tag.is_empty() => format!("{timestamp}_{tag}"),
        _ => timestamp,
    }
}

/// Runs every experiment of one run into `<output_dir>/<run_id>/`
pub struct ExperimentRunner {
    config: RunnerConfig,
    run_id: String,
    run_dir: PathBuf,
}

impl ExperimentRunner {
    pub fn new(config: RunnerConfig, run_id: impl Into<String>) -> Self {
        let run_id = run_id.into();
        let run_dir = config.output_dir.join(&run_id);
        Self {
            config,
            run_id,
            run_dir,
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    fn sweep(&self) -> Sweep {
        let mode = if self.config.fail_fast {
            SweepMode::FailFast
        } else {
            SweepMode::Isolate
        };
        Sweep::new()
            .with_mode(mode)
            .with_parallel(self.config.parallel)
    }

    /// Run all experiments in order
    pub fn run_all(&self) -> Result<Vec<ExperimentArtifact>> {
        std::fs::create_dir_all(&self.run_dir)
            .with_context(|| format!("creating {}", self.run_dir.display()))?;
        info!(run_id = %self.run_id, dir = %self.run_dir.display(), "Starting experiment run");

        let artifacts = vec![
            self.static_delta_sweep()?,
            self.static_growth_sweep()?,
            self.dynamic_mortality_sweep()?,
            self.dynamic_growth_sweep()?,
            self.singularity_limit()?,
            self.shared_hazard_kappa_sweep()?,
        ];

        let failures: usize = artifacts.iter().map(|a| a.failures).sum();
        if failures > 0 {
            warn!(failures, "Some sweep points failed; see the error column");
        }
        Ok(artifacts)
    }

    fn metadata(&self, experiment: &str, model: &str) -> Row {
        let mut row = Row::new();
        row.insert("run_id".into(), Value::from(self.run_id.as_str()));
        row.insert("experiment".into(), Value::from(experiment));
        row.insert("model".into(), Value::from(model));
        row
    }

    fn static_metadata(&self, experiment: &str) -> Row {
        let s = &self.config.static_model;
        let mut row = self.metadata(experiment, "StaticModel");
        row.extend(into_row(json!({
            "baseline_c0": s.c0,
            "baseline_g": s.g,
            "baseline_delta": s.delta,
            "baseline_gamma": s.gamma,
            "target_v": s.target_v,
        })));
        row
    }

    fn dynamic_metadata(&self, experiment: &str) -> Row {
        let d = &self.config.dynamic_model;
        let mut row = self.metadata(experiment, "DynamicModel");
        row.extend(into_row(json!({
            "baseline_c0": d.c0,
            "baseline_N0": d.n0,
            "baseline_gamma": d.gamma,
            "baseline_rho_minus_b": d.rho_minus_b,
            "baseline_g0": d.g0,
            "baseline_m0": d.m0,
            "target_v": d.target_v,
        })));
        row
    }

    fn static_model(&self) -> Result<StaticModel> {
        let s = &self.config.static_model;
        StaticModel::calibrated(s.c0, s.g, s.delta, s.gamma, s.target_v)
            .context("building the static baseline model")
    }

    fn dynamic_model(&self) -> Result<DynamicModel> {
        let d = &self.config.dynamic_model;
        let ubar = calibrate_ubar(d.target_v, d.c0, d.gamma)?;
        DynamicModel::new(d.parameters(ubar)).context("building the dynamic baseline model")
    }

    fn write(
        &self,
        experiment: &'static str,
        rows: Vec<Row>,
        metadata: &Row,
    ) -> Result<ExperimentArtifact> {
        let failures = rows.iter().filter(|row| row.contains_key("error")).count();
        let rows = augment_rows(rows, metadata);
        let csv_path = self.run_dir.join(format!("{experiment}.csv"));
        write_csv(&csv_path, &rows)?;

        info!(experiment, rows = rows.len(), failures, path = %csv_path.display(), "Dataset written");
        Ok(ExperimentArtifact {
            experiment,
            csv_path,
            rows: rows.len(),
            failures,
        })
    }

    /// Static summary across the δ grid
    #[instrument(skip(self))]
    pub fn static_delta_sweep(&self) -> Result<ExperimentArtifact> {
        let result = self
            .static_model()?
            .sweep_delta(&self.sweep(), &self.config.static_model.delta_grid)
            .with_context(|| format!("{STATIC_DELTA_SWEEP} aborted"))?;
        let rows = sweep_rows(&result, "delta")?;
        self.write(STATIC_DELTA_SWEEP, rows, &self.static_metadata(STATIC_DELTA_SWEEP))
    }

    /// Static summary across the growth grid
    #[instrument(skip(self))]
    pub fn static_growth_sweep(&self) -> Result<ExperimentArtifact> {
        let result = self
            .static_model()?
            .sweep_growth(&self.sweep(), &self.config.static_model.growth_grid)
            .with_context(|| format!("{STATIC_GROWTH_SWEEP} aborted"))?;
        let rows = sweep_rows(&result, "g")?;
        self.write(STATIC_GROWTH_SWEEP, rows, &self.static_metadata(STATIC_GROWTH_SWEEP))
    }

    /// δ* across AI mortality at the largest AI growth rate
    #[instrument(skip(self))]
    pub fn dynamic_mortality_sweep(&self) -> Result<ExperimentArtifact> {
        let settings = &self.config.dynamic_model;
        let g_ai = settings
            .mortality_sweep_growth()
            .context("AI growth grid is empty")?;
        let result = self
            .dynamic_model()?
            .sweep_mortality_with(&self.sweep(), g_ai, &settings.ai_mortality_grid)
            .with_context(|| format!("{DYNAMIC_MORTALITY_SWEEP} aborted"))?;

        let rows = sweep_rows(&result, "m_ai")?;
        let mut metadata = self.dynamic_metadata(DYNAMIC_MORTALITY_SWEEP);
        metadata.insert("g_ai_for_sweep".into(), Value::from(g_ai));
        self.write(DYNAMIC_MORTALITY_SWEEP, rows, &metadata)
    }

    /// δ* across AI growth at the fourth AI mortality level
    #[instrument(skip(self))]
    pub fn dynamic_growth_sweep(&self) -> Result<ExperimentArtifact> {
        let settings = &self.config.dynamic_model;
        let m_ai = settings
            .growth_sweep_mortality()
            .context("AI mortality grid is empty")?;
        let result = self
            .dynamic_model()?
            .sweep_growth_with(&self.sweep(), &settings.ai_growth_grid, m_ai)
            .with_context(|| format!("{DYNAMIC_GROWTH_SWEEP} aborted"))?;

        let rows = sweep_rows(&result, "g_ai")?;
        let mut metadata = self.dynamic_metadata(DYNAMIC_GROWTH_SWEEP);
        metadata.insert("m_ai_for_sweep".into(), Value::from(m_ai));
        self.write(DYNAMIC_GROWTH_SWEEP, rows, &metadata)
    }

    /// δ* with unbounded AI growth across AI mortality
    #[instrument(skip(self))]
    pub fn singularity_limit(&self) -> Result<ExperimentArtifact> {
        let result = self
            .dynamic_model()?
            .sweep_singularity_with(&self.sweep(), &self.config.dynamic_model.ai_mortality_grid)
            .with_context(|| format!("{SINGULARITY_LIMIT} aborted"))?;
        let rows = sweep_rows(&result, "m_ai")?;
        self.write(SINGULARITY_LIMIT, rows, &self.dynamic_metadata(SINGULARITY_LIMIT))
    }

    /// Shared-hazard equilibrium runtimes across κ
    #[instrument(skip(self))]
    pub fn shared_hazard_kappa_sweep(&self) -> Result<ExperimentArtifact> {
        let h = &self.config.shared_hazard;
        let ubar = calibrate_ubar(h.target_v, h.c0, h.gamma)?;
        let game = SharedHazardGame::new(h.players(ubar), SharedHazard::new(h.delta, 0.0))?
            .with_config(h.solver())?;
        let result = game
            .sweep_kappa(&self.sweep(), &h.kappa_grid)
            .with_context(|| format!("{SHARED_HAZARD_KAPPA_SWEEP} aborted"))?;

        let non_converged = result.successes().filter(|(_, s)| !s.converged).count();
        if non_converged > 0 {
            warn!(non_converged, "Equilibrium iteration hit the cap at some κ");
        }

        let rows = sweep_rows_with(&result, "kappa", |kappa, state| {
            let mut row = Row::new();
            row.insert("kappa".into(), Value::from(kappa));
            row.extend(equilibrium_row(state));
            Ok(row)
        })?;

        let mut metadata = self.metadata(SHARED_HAZARD_KAPPA_SWEEP, "SharedHazardGame");
        metadata.extend(into_row(json!({
            "c0": h.c0,
            "gamma": h.gamma,
            "target_v": h.target_v,
            "delta": h.delta,
            "g1": h.growth[0],
            "g2": h.growth[1],
            "omega1": h.weights[0],
            "omega2": h.weights[1],
        })));
        self.write(SHARED_HAZARD_KAPPA_SWEEP, rows, &metadata)
    }
}

fn equilibrium_row(state: &EquilibriumState) -> Row {
    into_row(json!({
        "t1": state.runtimes[0],
        "t2": state.runtimes[1],
        "aggregate_risk": state.aggregate_risk,
        "hazard_slope": state.hazard_slope,
        "survival": state.survival,
        "extinction_prob": state.extinction_prob(),
        "converged": state.converged,
        "iterations": state.iterations,
        "step_years": state.step,
        "condition_residual": state.condition_residual,
        "method": state.method,
    }))
}

fn into_row(value: Value) -> Row {
    match value {
        Value::Object(row) => row,
        _ => Row::new(),
    }
}
