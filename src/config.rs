use crate::{build::build_unchecked, error::*, sort::Sorter, t_digest::TDigest};

/// Compression used by [DigestConfig::default].
pub const DEFAULT_DELTA: f64 = 100.0;

/// Settings for building a [TDigest] from raw samples.
///
/// ```rust
/// use tdigest_rs::{DigestConfig, UnstableSorter};
///
/// let mut values: Vec<f64> = (1..=10_000).rev().map(f64::from).collect();
/// let digest = DigestConfig::default()
///     .with_delta(50.0)
///     .build_unsorted(&mut values, &UnstableSorter)
///     .unwrap();
/// assert_eq!(digest.total_weight(), 10_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigestConfig {
    delta: f64,
    validate_input: bool,
}

impl Default for DigestConfig {
    #[inline]
    fn default() -> Self {
        Self {
            delta: DEFAULT_DELTA,
            validate_input: false,
        }
    }
}

impl DigestConfig {
    #[inline]
    pub fn new(delta: f64) -> Self {
        Self::default().with_delta(delta)
    }

    /// Compression parameter. Larger values keep more, smaller centroids.
    ///
    /// Checked when a digest is built, not here.
    #[inline]
    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    /// When enabled, [DigestConfig::build] first checks that samples are
    /// finite and ascending, failing with [Error::NonFiniteSample] or
    /// [Error::UnsortedInput]. Disabled by default: unsorted input is then
    /// the caller's bug and yields a meaningless digest.
    #[inline]
    pub fn with_validation(mut self, validate_input: bool) -> Self {
        self.validate_input = validate_input;
        self
    }

    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    #[inline]
    pub fn validates_input(&self) -> bool {
        self.validate_input
    }

    /// Builds a digest over `sorted_values`.
    pub fn build(&self, sorted_values: &[f64]) -> Result<TDigest> {
        let delta = check_delta(self.delta)?;
        if self.validate_input {
            check_sorted_finite(sorted_values)?;
        }

        let store = build_unchecked(sorted_values, delta);
        log::debug!(
            "built t-digest: {} samples -> {} centroids (delta={})",
            sorted_values.len(),
            store.len(),
            delta
        );
        Ok(TDigest::from_parts_unchecked(
            store,
            delta,
            sorted_values.first().copied(),
            sorted_values.last().copied(),
        ))
    }

    /// Sorts `values` in place with `sorter`, then builds.
    ///
    /// `delta` is checked before sorting so a bad config costs nothing.
    pub fn build_unsorted<S>(&self, values: &mut [f64], sorter: &S) -> Result<TDigest>
    where
        S: Sorter + ?Sized,
    {
        check_delta(self.delta)?;
        sorter.sort(values);
        self.build(values)
    }
}
