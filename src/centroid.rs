use float_ord::FloatOrd;
use std::{cmp::Ordering, fmt, ops::AddAssign};

/// A cluster of samples represented by their mean and how many samples were
/// folded into it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    pub(crate) mean: f64,
    pub(crate) weight: u64,
}

impl AddAssign for Centroid {
    /// Folds `rhs` in as a point mass at `rhs.mean`.
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.fold(rhs.mean, rhs.weight);
    }
}

impl fmt::Display for Centroid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(centroid={}, num_points={})", self.mean, self.weight)
    }
}

impl Centroid {
    #[inline]
    pub fn new(mean: f64, weight: u64) -> Self {
        Self { mean, weight }
    }

    /// A centroid holding exactly one sample.
    #[inline]
    pub fn singleton(value: f64) -> Self {
        Self::new(value, 1)
    }

    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    #[inline]
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Running-average update. For `weight == 1` this is exactly
    /// `mean += (value - mean) / new_weight`.
    #[inline]
    pub(crate) fn fold(&mut self, value: f64, weight: u64) {
        let new_weight = self.weight + weight;
        self.mean += (value - self.mean) * weight as f64 / new_weight as f64;
        self.weight = new_weight;
    }

    /// Total order on means.
    #[inline]
    pub fn cmp_mean(&self, other: &Self) -> Ordering {
        FloatOrd(self.mean).cmp(&FloatOrd(other.mean))
    }
}
