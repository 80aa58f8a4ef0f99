//! Comparative-statics output
//!
//! A sweep keeps one point per input value, in input order, duplicates included.
//! Each point carries either its output or the error raised at that point.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// How a sweep reacts to a failing point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepMode {
    /// Record the error on the failing point and keep going
    #[default]
    Isolate,
    /// Abort the sweep with the first error in input order
    FailFast,
}

/// One grid point of a sweep
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint<T> {
    /// Value of the swept parameter
    pub value: f64,
    pub outcome: Result<T>,
}

impl<T> SweepPoint<T> {
    pub fn new(value: f64, outcome: Result<T>) -> Self {
        Self { value, outcome }
    }

    pub fn output(&self) -> Option<&T> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&ModelError> {
        self.outcome.as_ref().err()
    }
}

/// Ordered sequence of sweep points
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult<T> {
    points: Vec<SweepPoint<T>>,
}

impl<T> SweepResult<T> {
    pub fn new(points: Vec<SweepPoint<T>>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[SweepPoint<T>] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SweepPoint<T>> {
        self.points.iter()
    }

    /// Swept values in sweep order
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Successful (value, output) pairs in sweep order
    pub fn successes(&self) -> impl Iterator<Item = (f64, &T)> {
        self.points
            .iter()
            .filter_map(|p| p.output().map(|out| (p.value, out)))
    }

    /// Failed (value, error) pairs in sweep order
    pub fn failures(&self) -> impl Iterator<Item = (f64, &ModelError)> {
        self.points
            .iter()
            .filter_map(|p| p.error().map(|err| (p.value, err)))
    }

    pub fn failure_count(&self) -> usize {
        self.points.iter().filter(|p| p.outcome.is_err()).count()
    }

    /// All outputs, or the first error in sweep order
    pub fn into_outputs(self) -> Result<Vec<T>> {
        self.points.into_iter().map(|p| p.outcome).collect()
    }

    /// Apply `f` to every successful output, keeping errors in place
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> SweepResult<U> {
        SweepResult::new(
            self.points
                .into_iter()
                .map(|p| SweepPoint::new(p.value, p.outcome.map(&mut f)))
                .collect(),
        )
    }
}

impl<T> IntoIterator for SweepResult<T> {
    type Item = SweepPoint<T>;
    type IntoIter = std::vec::IntoIter<SweepPoint<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a SweepResult<T> {
    type Item = &'a SweepPoint<T>;
    type IntoIter = std::slice::Iter<'a, SweepPoint<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;

    fn sample() -> SweepResult<f64> {
        SweepResult::new(vec![
            SweepPoint::new(0.01, Ok(4.5)),
            SweepPoint::new(
                0.0,
                Err(DomainError::NonPositive {
                    name: "delta",
                    value: 0.0,
                }
                .into()),
            ),
            SweepPoint::new(0.01, Ok(4.5)),
        ])
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let result = sample();
        assert_eq!(result.len(), 3);
        assert_eq!(result.values(), vec![0.01, 0.0, 0.01]);
        assert_eq!(result.successes().count(), 2);
        assert_eq!(result.failure_count(), 1);
    }

    #[test]
    fn test_into_outputs_reports_first_error() {
        let err = sample().into_outputs().unwrap_err();
        assert!(err.is_domain());
    }

    #[test]
    fn test_map_keeps_errors() {
        let mapped = sample().map(|t| t * 2.0);
        assert_eq!(mapped.points()[0].output(), Some(&9.0));
        assert!(mapped.points()[1].error().is_some());
    }

    #[test]
    fn test_default_mode_isolates() {
        assert_eq!(SweepMode::default(), SweepMode::Isolate);
    }
}
