use crate::{centroid::Centroid, error::*, scale, store::CentroidStore};
use std::f64::consts::FRAC_PI_2;

/// Compresses an ascending sequence of samples into a [CentroidStore].
///
/// Samples must already be sorted; this is not checked (see
/// [DigestConfig::with_validation](crate::DigestConfig::with_validation) for
/// a checked build). Empty input yields an empty store.
///
/// Fails with [Error::InvalidDelta] unless `delta` is finite and positive.
pub fn build(sorted_samples: &[f64], delta: f64) -> Result<CentroidStore> {
    let delta = check_delta(delta)?;
    Ok(build_unchecked(sorted_samples, delta))
}

/// [build] for a `delta` that has already been validated.
pub(crate) fn build_unchecked(sorted_samples: &[f64], delta: f64) -> CentroidStore {
    let total_weight = sorted_samples.len() as u64;
    let centroids = compress(
        sorted_samples.iter().copied().map(Centroid::singleton),
        total_weight,
        delta,
    );
    CentroidStore::from_sorted_centroids(centroids)
}

/// Greedy bucketing of mean-ordered weighted points.
///
/// Each point is folded into the open centroid while the grown centroid stays
/// within the scale bound evaluated at its own midpoint quantile; otherwise
/// the open centroid is closed and the point starts a new one. Singleton
/// points make this the sample builder; weighted points make it the merge.
pub(crate) fn compress<I>(points: I, total_weight: u64, delta: f64) -> Vec<Centroid>
where
    I: IntoIterator<Item = Centroid>,
{
    let mut points = points.into_iter();
    let Some(mut current) = points.next() else {
        return Vec::new();
    };

    let mut centroids = Vec::with_capacity(capacity_hint(delta, points.size_hint().0 + 1));
    let mut weight_so_far = 0u64;
    for point in points {
        let candidate = current.weight + point.weight;
        let midpoint = (weight_so_far as f64 + candidate as f64 / 2.0) / total_weight as f64;
        if candidate as f64 <= scale::max_weight(midpoint, delta, total_weight) {
            current += point;
        } else {
            weight_so_far += current.weight;
            centroids.push(current);
            current = point;
        }
    }
    centroids.push(current);

    centroids.sort_by(Centroid::cmp_mean); // Only necessary to fix float imprecision.
    centroids
}

/// Expected centroid count for `delta`, never more than the number of points.
#[inline]
fn capacity_hint(delta: f64, points: usize) -> usize {
    let expected = (delta * FRAC_PI_2).ceil() as usize + 1;
    expected.min(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(n: usize) -> Vec<f64> {
        (1..=n).map(|i| i as f64).collect()
    }

    #[test]
    fn test_invalid_delta() {
        assert_eq!(build(&[1.0], 0.0), Err(Error::InvalidDelta { delta: 0.0 }));
        assert_eq!(build(&[1.0], -5.0), Err(Error::InvalidDelta { delta: -5.0 }));
        assert!(build(&[1.0], f64::NAN).is_err());
        // empty input still validates delta
        assert!(build(&[], -1.0).is_err());
    }

    #[test]
    fn test_empty_input() {
        let store = build(&[], 10.0).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.total_weight(), 0);
    }

    #[test]
    fn test_small_inputs_stay_singletons() {
        for n in 1..8 {
            let values = uniform(n);
            let store = build(&values, 10.0).unwrap();
            assert_eq!(store.means(), values);
            assert!(store.weights().iter().all(|&w| w == 1));
        }
    }

    #[test]
    fn test_weights_sum_to_input_length() {
        for n in [1, 2, 3, 10, 999, 1000, 12_345] {
            let store = build(&uniform(n), 10.0).unwrap();
            assert_eq!(store.total_weight(), n as u64);
            assert_eq!(store.weights().iter().sum::<u64>(), n as u64);
        }
    }

    #[test]
    fn test_uniform_centroids() {
        let store = build(&uniform(1000), 10.0).unwrap();
        assert_eq!(store.len(), 15);
        assert_eq!(store[0], Centroid::new(10.0, 19));
        assert_eq!(store[7], Centroid::new(505.0, 99));
        assert_eq!(store[14], Centroid::new(992.0, 17));
    }

    #[test]
    fn test_tail_centroids_are_smaller_than_median_centroids() {
        let store = build(&uniform(100_000), 50.0).unwrap();
        let weights = store.weights();
        let middle = weights[weights.len() / 2];
        assert!(weights[0] < middle / 10);
        assert!(weights[weights.len() - 1] < middle / 10);
    }

    #[test]
    fn test_means_stay_ordered_and_within_range() {
        let mut values: Vec<f64> = (0..10_000).map(|i| ((i % 97) as f64).sqrt()).collect();
        values.sort_by(f64::total_cmp);
        let store = build(&values, 30.0).unwrap();
        for pair in store.centroids().windows(2) {
            assert!(pair[0].mean() <= pair[1].mean());
        }
        assert!(store[0].mean() >= values[0]);
        assert!(store[store.len() - 1].mean() <= values[values.len() - 1]);
    }

    #[test]
    fn test_repeated_value() {
        let store = build(&[5.0; 1000], 10.0).unwrap();
        assert_eq!(store.total_weight(), 1000);
        assert!(store.iter().all(|c| c.mean() == 5.0));
    }

    #[test]
    fn test_count_independent_of_n() {
        let small = build(&uniform(10_000), 100.0).unwrap().len();
        let large = build(&uniform(1_000_000), 100.0).unwrap().len();
        assert!(small <= 2 * large && large <= 2 * small);
        assert!((large as f64) < 100.0 * FRAC_PI_2 + 2.0);
    }

    #[test]
    fn test_capacity_hint() {
        assert_eq!(capacity_hint(10.0, 1_000_000), 17);
        assert_eq!(capacity_hint(1e12, 5), 5);
    }
}
