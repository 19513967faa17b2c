//! Failures surfaced to callers of the estimator.

use thiserror::Error;

/// The error type for quantile queries.
///
/// Inserting and flushing cannot fail. The one user-visible failure is
/// querying an estimator that has never observed a value, which is an
/// expected, recoverable condition rather than a defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EstimatorError {
    /// The sample list is empty even after a flush: nothing was ever
    /// inserted.
    #[error("no samples present")]
    NoSamples,
}
