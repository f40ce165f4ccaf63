use crate::{
    centroid::Centroid,
    config::DigestConfig,
    error::*,
    merge::{merge_stores, merged_delta},
    quantile,
    sort::Sorter,
    store::CentroidStore,
};
use std::fmt;

/// Approximation of a sample distribution's [quantile
/// function](https://en.wikipedia.org/wiki/Quantile_function).
///
/// A digest is built once from a sorted batch (or by merging two digests) and
/// never changes afterwards. Combining digests always produces a new one, so
/// a digest can be shared freely across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct TDigest {
    store: CentroidStore,
    delta: f64,
    min: f64,
    max: f64,
}

impl TDigest {
    /// An empty digest with compression `delta`.
    pub fn empty(delta: f64) -> Result<Self> {
        let delta = check_delta(delta)?;
        Ok(Self::from_parts_unchecked(
            CentroidStore::default(),
            delta,
            None,
            None,
        ))
    }

    /// Builds a digest over `sorted_values`, which must be in ascending
    /// order.
    ///
    /// Shorthand for `DigestConfig::new(delta).build(sorted_values)`.
    #[inline]
    pub fn from_sorted(sorted_values: &[f64], delta: f64) -> Result<Self> {
        DigestConfig::new(delta).build(sorted_values)
    }

    /// Sorts `values` in place with `sorter` before building.
    #[inline]
    pub fn from_unsorted<S>(values: &mut [f64], delta: f64, sorter: &S) -> Result<Self>
    where
        S: Sorter + ?Sized,
    {
        DigestConfig::new(delta).build_unsorted(values, sorter)
    }

    /// Re-assembles a digest from centroids produced elsewhere, e.g. a
    /// wrapper that stored [TDigest::means] and [TDigest::weights].
    ///
    /// Without the original samples the extremes are taken from the outer
    /// centroid means.
    pub fn from_store(store: CentroidStore, delta: f64) -> Result<Self> {
        let delta = check_delta(delta)?;
        let min = store.centroids().first().map(Centroid::mean);
        let max = store.centroids().last().map(Centroid::mean);
        Ok(Self::from_parts_unchecked(store, delta, min, max))
    }

    pub(crate) fn from_parts_unchecked(
        store: CentroidStore,
        delta: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Self {
        Self {
            store,
            delta,
            min: min.unwrap_or(f64::INFINITY),
            max: max.unwrap_or(f64::NEG_INFINITY),
        }
    }

    /// Compression parameter the digest was built with.
    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Total number of samples.
    #[inline]
    pub fn total_weight(&self) -> u64 {
        self.store.total_weight()
    }

    /// Number of centroids.
    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    #[inline]
    pub fn store(&self) -> &CentroidStore {
        &self.store
    }

    #[inline]
    pub fn centroids(&self) -> &[Centroid] {
        self.store.centroids()
    }

    /// Centroid means, ascending.
    #[inline]
    pub fn means(&self) -> Vec<f64> {
        self.store.means()
    }

    /// Centroid weights, parallel to [TDigest::means].
    #[inline]
    pub fn weights(&self) -> Vec<u64> {
        self.store.weights()
    }

    /// Minimum of all samples.
    #[inline]
    pub fn min(&self) -> Option<f64> {
        (!self.is_empty()).then_some(self.min)
    }

    /// Maximum of all samples.
    #[inline]
    pub fn max(&self) -> Option<f64> {
        (!self.is_empty()).then_some(self.max)
    }

    /// Mean of all samples.
    pub fn mean(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let sum: f64 = self
            .store
            .iter()
            .map(|c| c.mean() * c.weight() as f64)
            .sum();
        Some(sum / self.total_weight() as f64)
    }

    /// Returns an estimate for
    /// [quantile](https://en.wikipedia.org/wiki/Quantile) `x` where
    /// `0.0 <= x <= 1.0`.
    ///
    /// For example:
    ///   - `x=0.0` returns the _minimum_
    ///   - `x=0.5` returns the _median_
    ///   - `x=1.0` returns the _maximum_
    ///
    /// Values of `x` outside the range saturate to its ends. Estimates never
    /// decrease as `x` grows. Digests with fewer than three centroids have no
    /// spread to interpolate with and return `0.0`.
    #[inline]
    pub fn quantile(&self, x: f64) -> f64 {
        quantile::interpolate_bounded(
            self.store.centroids(),
            self.total_weight(),
            self.min,
            self.max,
            x,
        )
    }

    #[inline]
    pub fn median(&self) -> f64 {
        self.quantile(0.5)
    }

    pub fn quantiles(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.quantile(x)).collect()
    }

    /// Combines `self` and `other` into a new digest approximating one built
    /// over both underlying samples.
    ///
    /// The result uses the larger of the two compression parameters, except
    /// when one side is empty: the other side is then returned unchanged,
    /// compression parameter included. The total weight is exactly the sum
    /// of both inputs.
    ///
    /// # Panics
    ///
    /// Panics if the combined weight overflows `u64`. Only stores assembled
    /// with [CentroidStore::from_parts] can carry weights that large; use
    /// [TDigest::try_merge] to handle that case.
    pub fn merge(&self, other: &Self) -> Self {
        match self.try_merge(other) {
            Ok(merged) => merged,
            Err(err) => panic!("{err}"),
        }
    }

    /// Like [TDigest::merge], but fails with [Error::MergeOverflow] instead
    /// of panicking when the combined weight overflows `u64`.
    pub fn try_merge(&self, other: &Self) -> Result<Self> {
        let delta = merged_delta(&self.store, self.delta, &other.store, other.delta);
        if self.delta != other.delta {
            log::trace!(
                "merging t-digests with delta {} and {}: using {}",
                self.delta,
                other.delta,
                delta
            );
        }

        let store = merge_stores(&self.store, &other.store, delta)?;
        log::debug!(
            "merged t-digests: {} + {} centroids -> {} centroids (delta={})",
            self.len(),
            other.len(),
            store.len(),
            delta
        );
        Ok(Self {
            store,
            delta,
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        })
    }

    /// Folds all of `digests` together with [TDigest::merge]. Returns `None`
    /// for an empty iterator.
    ///
    /// # Panics
    ///
    /// Panics if the combined weight overflows `u64`.
    pub fn merge_all<I>(digests: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        digests.into_iter().reduce(|acc, digest| acc.merge(&digest))
    }
}

impl fmt::Display for TDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.store, f)
    }
}
