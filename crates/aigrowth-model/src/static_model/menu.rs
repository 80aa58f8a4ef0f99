//! Discrete runtime menus evaluated against the continuous optimum

use aigrowth_common::{DomainError, MenuEvaluation, Result};
use tracing::debug;

use super::StaticModel;

impl StaticModel {
    /// Evaluate each runtime of a menu, plus the deployed optimum
    ///
    /// `bounded_optimal_runtime` is T* clamped into the menu's range, so a menu
    /// that cannot express the optimum still points at its nearest edge.
    pub fn evaluate_menu(&self, runtimes: &[f64]) -> Result<MenuEvaluation> {
        if runtimes.is_empty() {
            return Err(DomainError::EmptyMenu.into());
        }

        let options = runtimes
            .iter()
            .map(|&runtime| self.evaluate_runtime(runtime))
            .collect::<Result<Vec<_>>>()?;

        let t_star = self.t_star()?;
        let optimal = self.evaluate_runtime(t_star.max(0.0))?;

        let lowest = runtimes.iter().copied().fold(f64::INFINITY, f64::min);
        let highest = runtimes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let bounded_optimal_runtime = t_star.max(lowest).min(highest);

        let min_expected_utility = options
            .iter()
            .map(|o| o.expected_utility)
            .fold(f64::INFINITY, f64::min);

        debug!(
            options = options.len(),
            t_star, bounded_optimal_runtime, "Runtime menu evaluated"
        );

        Ok(MenuEvaluation {
            options,
            optimal,
            bounded_optimal_runtime,
            min_expected_utility,
        })
    }
}
