//! Streaming estimation of targeted quantiles.
//!
//! This is the targeted variant of the algorithm presented in Cormode,
//! Korn, Muthukrishnan, Srivastava's paper "Effective Computation of
//! Biased Quantiles over Data Streams", a generalization of the earlier
//! Greenwald-Khanna summary that lets each targeted quantile carry its
//! own error bound. High percentiles get tight tolerances cheaply
//! because precision is only spent near the targets.
//!
//! Observations are buffered and folded into the sample list in sorted
//! batches; queries force the fold. Worst-case latency is therefore
//! paid at flush time, which keeps the common insert path to a push
//! onto the buffer.

use log::trace;

use crate::error::EstimatorError;
use crate::quantile::Quantile;

mod sample;
mod samples;

use self::samples::Samples;

const DEFAULT_BUFFER_CAPACITY: usize = 4096;

/// A streaming estimator answering quantile queries within per-target
/// error bounds, in memory far below the stream length.
///
/// The value type `T` must be totally ordered over every value actually
/// inserted; for floats that means no NaN. Targets with quantile or
/// error outside `(0, 1)` are a caller error and are not validated.
///
/// The estimator is not safe for concurrent use. Serialize access
/// externally, or keep one estimator per shard -- merging
/// independently built estimators is not supported, as it is not
/// equivalent to summarizing the single combined stream.
///
/// # Examples
/// ```
/// use targeted_quantiles::estimator::Estimator;
/// use targeted_quantiles::quantile::Quantile;
///
/// let mut latencies = Estimator::with_targets(vec![
///     Quantile::new(0.5, 0.05),
///     Quantile::new(0.99, 0.001),
/// ]);
/// latencies.extend((0..10_000u32).map(|i| i % 400));
///
/// assert_eq!(latencies.query(0.99), Ok(396));
/// assert_eq!(latencies.query(1.0), Ok(399));
/// ```
#[derive(Clone, Debug)]
pub struct Estimator<T>
where
    T: Copy + PartialOrd,
{
    samples: Samples<T>,
    buffer: Vec<T>,
    buffer_cap: usize,
}

impl<T> Estimator<T>
where
    T: Copy + PartialOrd,
{
    /// Create an estimator with the default invariants: the median at 5
    /// percent inaccuracy and the 99th percentile at 0.1 percent
    /// inaccuracy.
    ///
    /// # Examples
    /// ```
    /// use targeted_quantiles::estimator::Estimator;
    ///
    /// let mut estimator = Estimator::new();
    /// for v in [12u64, 5, 9, 300, 7] {
    ///     estimator.insert(v);
    /// }
    /// assert_eq!(estimator.query(1.0), Ok(300));
    /// ```
    pub fn new() -> Estimator<T> {
        Estimator::with_targets_and_capacity(default_targets(), DEFAULT_BUFFER_CAPACITY)
    }

    /// Create an estimator with the provided invariants.
    ///
    /// # Examples
    /// ```
    /// use targeted_quantiles::estimator::Estimator;
    /// use targeted_quantiles::quantile::Quantile;
    ///
    /// let mut estimator = Estimator::with_targets(vec![Quantile::new(0.5, 0.5)]);
    /// for v in [5, 3, 1, 4, 2] {
    ///     estimator.insert(v);
    /// }
    /// assert_eq!(estimator.query(0.5), Ok(3));
    /// ```
    pub fn with_targets(targets: Vec<Quantile>) -> Estimator<T> {
        Estimator::with_targets_and_capacity(targets, DEFAULT_BUFFER_CAPACITY)
    }

    /// Create an estimator with the default invariants and the given
    /// buffer capacity.
    ///
    /// A smaller buffer bounds flush latency more tightly; a larger one
    /// amortizes the merge cost over more insertions.
    pub fn with_capacity(buffer_cap: usize) -> Estimator<T> {
        Estimator::with_targets_and_capacity(default_targets(), buffer_cap)
    }

    /// Create an estimator with the provided invariants and buffer
    /// capacity.
    pub fn with_targets_and_capacity(targets: Vec<Quantile>, buffer_cap: usize) -> Estimator<T> {
        Estimator {
            samples: Samples::new(targets),
            buffer: Vec::with_capacity(buffer_cap),
            buffer_cap,
        }
    }

    /// Add a new observation from the stream.
    ///
    /// Amortized O(1): the value is buffered, and when the buffer
    /// reaches capacity the batch is merged into the sample list and
    /// the list compressed.
    pub fn insert(&mut self, v: T) {
        self.buffer.push(v);
        if self.buffer.len() == self.buffer_cap {
            self.flush();
        }
    }

    /// Get the estimated value at quantile `q`, valid over `[0.0, 1.0]`.
    ///
    /// Forces a flush first so the answer reflects every inserted
    /// observation. The returned value is always one that was inserted,
    /// with rank within the registered tolerance of `q * count`;
    /// `query(1.0)` is exactly the maximum.
    ///
    /// # Errors
    /// [`EstimatorError::NoSamples`] when nothing was ever inserted.
    ///
    /// # Examples
    /// ```
    /// use targeted_quantiles::error::EstimatorError;
    /// use targeted_quantiles::estimator::Estimator;
    ///
    /// let mut estimator = Estimator::new();
    /// assert_eq!(estimator.query(0.5), Err(EstimatorError::NoSamples));
    ///
    /// estimator.insert(7.0);
    /// assert_eq!(estimator.query(0.5), Ok(7.0));
    /// ```
    pub fn query(&mut self, q: f64) -> Result<T, EstimatorError> {
        self.flush();
        self.samples.query(q).ok_or(EstimatorError::NoSamples)
    }

    /// Total observations inserted over the estimator's lifetime,
    /// including any still sitting in the buffer.
    ///
    /// # Examples
    /// ```
    /// use targeted_quantiles::estimator::Estimator;
    ///
    /// let mut estimator = Estimator::new();
    /// for v in [3, 1, 2] {
    ///     estimator.insert(v);
    /// }
    /// assert_eq!(estimator.count(), 3);
    /// ```
    pub fn count(&self) -> usize {
        self.samples.count() + self.buffer.len()
    }

    /// Samples currently retained in the summary -- the memory the
    /// estimator is actually spending, for telemetry introspection.
    ///
    /// # Examples
    /// ```
    /// use targeted_quantiles::estimator::Estimator;
    ///
    /// let mut estimator = Estimator::new();
    /// for v in 0..10_000u32 {
    ///     estimator.insert(v);
    /// }
    /// let _ = estimator.query(0.5);
    /// assert!(estimator.sample_count() < 100);
    /// ```
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Merge buffered observations into the sample list, then compress.
    ///
    /// A flush with an empty buffer is a complete no-op, so flushing is
    /// stable: repeated flushes with no intervening insert leave the
    /// summary untouched.
    pub(crate) fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        self.buffer
            .sort_unstable_by(|a, b| a.partial_cmp(b).unwrap());
        self.samples.merge(&self.buffer);
        trace!(
            "flushed {} observations, {} samples retained",
            self.buffer.len(),
            self.samples.len()
        );
        self.buffer.clear();
        // Bulk insertion may have overshot the configured capacity;
        // hand the excess allocation back.
        self.buffer.shrink_to(self.buffer_cap);
        self.samples.compress();
    }
}

impl<T> Default for Estimator<T>
where
    T: Copy + PartialOrd,
{
    fn default() -> Estimator<T> {
        Estimator::new()
    }
}

/// Bulk insertion. All values are buffered first; a single flush runs
/// if the buffer ends at or beyond capacity.
impl<T> Extend<T> for Estimator<T>
where
    T: Copy + PartialOrd,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.buffer.extend(iter);
        if self.buffer.len() >= self.buffer_cap {
            self.flush();
        }
    }
}

fn default_targets() -> Vec<Quantile> {
    vec![Quantile::new(0.5, 0.05), Quantile::new(0.99, 0.001)]
}
