//! Comparative-statics sweep executor
//!
//! Evaluates a closure once per grid value. The closure receives only the value
//! and must build its own parameter snapshot, so no state is shared between
//! points. Parallel sweeps collect through an indexed iterator, which restores
//! input order after completion.

use aigrowth_common::{Result, SweepMode, SweepPoint, SweepResult};
use rayon::prelude::*;
use tracing::debug;

/// Sweep execution settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sweep {
    mode: SweepMode,
    parallel: bool,
}

impl Sweep {
    /// Sequential sweep that isolates failing points
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate points on the rayon pool
    pub fn parallel(self) -> Self {
        Self {
            parallel: true,
            ..self
        }
    }

    pub fn with_parallel(self, parallel: bool) -> Self {
        Self { parallel, ..self }
    }

    pub fn with_mode(self, mode: SweepMode) -> Self {
        Self { mode, ..self }
    }

    /// Abort on the first failing point
    pub fn fail_fast(self) -> Self {
        self.with_mode(SweepMode::FailFast)
    }

    pub fn mode(&self) -> SweepMode {
        self.mode
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Evaluate every point, attaching failures to their point
    pub fn evaluate<T, F>(&self, values: &[f64], eval: F) -> SweepResult<T>
    where
        T: Send,
        F: Fn(f64) -> Result<T> + Sync,
    {
        let points: Vec<SweepPoint<T>> = if self.parallel {
            values
                .par_iter()
                .map(|&value| SweepPoint::new(value, eval(value)))
                .collect()
        } else {
            values
                .iter()
                .map(|&value| SweepPoint::new(value, eval(value)))
                .collect()
        };

        let result = SweepResult::new(points);
        debug!(
            points = result.len(),
            failures = result.failure_count(),
            parallel = self.parallel,
            "Sweep evaluated"
        );
        result
    }

    /// Evaluate honoring the sweep mode
    ///
    /// In fail-fast mode the first error in input order is returned. Sequential
    /// sweeps stop at that point; parallel sweeps finish the batch first.
    pub fn run<T, F>(&self, values: &[f64], eval: F) -> Result<SweepResult<T>>
    where
        T: Send,
        F: Fn(f64) -> Result<T> + Sync,
    {
        match (self.mode, self.parallel) {
            (SweepMode::Isolate, _) => Ok(self.evaluate(values, eval)),
            (SweepMode::FailFast, false) => {
                let mut points = Vec::with_capacity(values.len());
                for &value in values {
                    let output = eval(value)?;
                    points.push(SweepPoint::new(value, Ok(output)));
                }
                Ok(SweepResult::new(points))
            }
            (SweepMode::FailFast, true) => {
                let result = self.evaluate(values, eval);
                if let Some((value, err)) = result.failures().next() {
                    debug!(value, error = %err, "Fail-fast sweep aborted");
                    return Err(err.clone());
                }
                Ok(result)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aigrowth_common::{error::ensure_positive, ModelError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn reciprocal(value: f64) -> Result<f64> {
        Ok(1.0 / ensure_positive("value", value)?)
    }

    #[test]
    fn test_builder_settings() {
        let default = Sweep::new();
        assert_eq!(default.mode(), SweepMode::Isolate);
        assert!(!default.is_parallel());

        let strict = Sweep::new().parallel().fail_fast();
        assert_eq!(strict.mode(), SweepMode::FailFast);
        assert!(strict.is_parallel());
        assert!(!strict.with_parallel(false).is_parallel());
    }

    #[test]
    fn test_isolates_failures() {
        let values = [1.0, 0.0, 2.0, -1.0, 4.0];
        let result = Sweep::new().evaluate(&values, reciprocal);
        assert_eq!(result.values(), values.to_vec());
        assert_eq!(result.failure_count(), 2);
        assert_eq!(result.points()[2].output(), Some(&0.5));
    }

    #[test]
    fn test_parallel_preserves_order() {
        let values: Vec<f64> = (1..=200).map(|i| i as f64).collect();
        let sequential = Sweep::new().evaluate(&values, reciprocal);
        let parallel = Sweep::new().parallel().evaluate(&values, reciprocal);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_fail_fast_stops_sequential() {
        let calls = AtomicUsize::new(0);
        let values = [1.0, 0.0, 2.0];
        let err: ModelError = Sweep::new()
            .fail_fast()
            .run(&values, |v| {
                calls.fetch_add(1, Ordering::SeqCst);
                reciprocal(v)
            })
            .unwrap_err();
        assert!(err.is_domain());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_fail_fast_parallel_reports_first_in_order() {
        let values = [1.0, -1.0, 0.0];
        let err = Sweep::new()
            .parallel()
            .fail_fast()
            .run(&values, reciprocal)
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::Domain(aigrowth_common::DomainError::NonPositive {
                name: "value",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_run_isolate_never_errors() {
        let result = Sweep::new().run(&[0.0, 0.0], reciprocal).unwrap();
        assert_eq!(result.failure_count(), 2);
    }
}
