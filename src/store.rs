use crate::{centroid::Centroid, error::*, quantile};
use std::{cmp::Ordering, fmt, ops::Index, slice};

/// Centroids ordered by ascending mean, together with their summed weight.
///
/// A store is only produced by the builder, by a merge, or by
/// [CentroidStore::from_parts], all of which uphold the ordering and keep
/// `total_weight` equal to the sum of the centroid weights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CentroidStore {
    centroids: Vec<Centroid>,
    total_weight: u64,
}

impl CentroidStore {
    /// Trusts the caller on ordering; only used by the builder and merge.
    #[inline]
    pub(crate) fn from_sorted_centroids(centroids: Vec<Centroid>) -> Self {
        let total_weight = centroids.iter().map(Centroid::weight).sum();
        Self {
            centroids,
            total_weight,
        }
    }

    /// Re-assembles a store from its parallel `means` / `weights` form.
    ///
    /// Fails if the two sequences differ in length, a weight is zero, a mean
    /// is not finite, the means are not in ascending order, or the weights
    /// sum past `u64::MAX`.
    pub fn from_parts(means: &[f64], weights: &[u64]) -> Result<Self> {
        if means.len() != weights.len() {
            return Err(Error::LengthMismatch {
                means: means.len(),
                weights: weights.len(),
            });
        }

        let mut centroids: Vec<Centroid> = Vec::with_capacity(means.len());
        let mut total_weight = 0u64;
        for (index, (&mean, &weight)) in means.iter().zip(weights).enumerate() {
            if !mean.is_finite() {
                return Err(Error::NonFiniteMean { index, value: mean });
            }
            if weight == 0 {
                return Err(Error::ZeroWeight { index });
            }
            total_weight = total_weight
                .checked_add(weight)
                .ok_or(Error::WeightOverflow { index })?;
            let centroid = Centroid::new(mean, weight);
            if let Some(last) = centroids.last() {
                if centroid.cmp_mean(last) == Ordering::Less {
                    return Err(Error::UnorderedMeans { index });
                }
            }
            centroids.push(centroid);
        }
        Ok(Self {
            centroids,
            total_weight,
        })
    }

    /// Number of centroids.
    #[inline]
    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }

    /// Number of samples summarized by the store.
    #[inline]
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    #[inline]
    pub fn centroids(&self) -> &[Centroid] {
        &self.centroids
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Centroid> {
        self.centroids.iter()
    }

    /// Centroid means, in ascending order.
    pub fn means(&self) -> Vec<f64> {
        self.centroids.iter().map(Centroid::mean).collect()
    }

    /// Centroid weights, parallel to [CentroidStore::means].
    pub fn weights(&self) -> Vec<u64> {
        self.centroids.iter().map(Centroid::weight).collect()
    }

    /// Interpolated estimate for quantile `x` in `[0, 1]`.
    ///
    /// Stores with fewer than three centroids return `0.0`. When `x * total`
    /// lies at or past the last centroid, the last centroid's mean is
    /// returned. The estimate is not clamped to the sample range; use
    /// [TDigest::quantile](crate::TDigest::quantile) for that.
    #[inline]
    pub fn quantile(&self, x: f64) -> f64 {
        quantile::interpolate(&self.centroids, self.total_weight, x)
    }
}

impl Index<usize> for CentroidStore {
    type Output = Centroid;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.centroids[index]
    }
}

impl<'a> IntoIterator for &'a CentroidStore {
    type Item = &'a Centroid;
    type IntoIter = slice::Iter<'a, Centroid>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for CentroidStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, centroid) in self.centroids.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{centroid}")?;
        }
        Ok(())
    }
}
