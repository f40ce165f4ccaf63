//! Building and combining many independent digests at once.
//!
//! Digests are immutable and their construction touches no shared state, so
//! each input array can be digested on its own worker. With the `parallel`
//! feature the work is spread over rayon's global pool; without it the same
//! functions run sequentially.

use crate::{config::DigestConfig, error::*, sort::Sorter, t_digest::TDigest};

/// Sorts and digests every array in `arrays`, one digest per array, in
/// input order.
///
/// Each array is sorted in place by its own worker; no two workers share a
/// buffer. Fails with the first error encountered (only an invalid config or,
/// with validation enabled, a non-finite sample can fail).
pub fn build_many<S>(
    arrays: &mut [Vec<f64>],
    config: &DigestConfig,
    sorter: &S,
) -> Result<Vec<TDigest>>
where
    S: Sorter + Sync + ?Sized,
{
    check_delta(config.delta())?;

    #[cfg(feature = "parallel")]
    let digests = {
        use rayon::iter::IntoParallelRefMutIterator;
        use rayon::iter::ParallelIterator;
        arrays
            .par_iter_mut()
            .map(|values| config.build_unsorted(values, sorter))
            .collect::<Result<Vec<TDigest>>>()
    };

    #[cfg(not(feature = "parallel"))]
    let digests = arrays
        .iter_mut()
        .map(|values| config.build_unsorted(values, sorter))
        .collect::<Result<Vec<TDigest>>>();

    let digests = digests?;
    log::debug!(
        "built {} t-digests (delta={})",
        digests.len(),
        config.delta()
    );
    Ok(digests)
}

/// Merges all of `digests` into one. Returns `None` when there are none.
///
/// With the `parallel` feature this is a tree reduction, so the merge order
/// (and with it the exact centroid layout) may differ from a left fold; the
/// total weight and extremes do not.
///
/// # Panics
///
/// Panics if the combined weight overflows `u64`, as [TDigest::merge] does.
pub fn merge_many(digests: Vec<TDigest>) -> Option<TDigest> {
    #[cfg(feature = "parallel")]
    {
        use rayon::iter::IntoParallelIterator;
        use rayon::iter::ParallelIterator;
        digests.into_par_iter().reduce_with(|a, b| a.merge(&b))
    }

    #[cfg(not(feature = "parallel"))]
    {
        TDigest::merge_all(digests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::UnstableSorter;

    fn shuffled_arrays(count: usize, len: usize) -> Vec<Vec<f64>> {
        (0..count)
            .map(|k| {
                (0..len)
                    .map(|i| ((i * 7919 + k * 13) % len) as f64)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_build_many_matches_sequential_builds() {
        let mut arrays = shuffled_arrays(16, 2000);
        let config = DigestConfig::new(20.0);
        let digests = build_many(&mut arrays, &config, &UnstableSorter).unwrap();

        assert_eq!(digests.len(), 16);
        for (digest, values) in digests.iter().zip(&arrays) {
            // arrays were sorted in place
            assert!(values.windows(2).all(|w| w[0] <= w[1]));
            assert_eq!(digest, &config.build(values).unwrap());
            assert_eq!(digest.total_weight(), 2000);
        }
    }

    #[test]
    fn test_build_many_rejects_bad_config() {
        let mut arrays = shuffled_arrays(2, 10);
        let config = DigestConfig::new(0.0);
        assert_eq!(
            build_many(&mut arrays, &config, &UnstableSorter).unwrap_err(),
            Error::InvalidDelta { delta: 0.0 }
        );
    }

    #[test]
    fn test_build_many_reports_bad_sample() {
        let mut arrays = shuffled_arrays(4, 10);
        arrays[2][3] = f64::NAN;
        let config = DigestConfig::new(10.0).with_validation(true);
        assert!(matches!(
            build_many(&mut arrays, &config, &UnstableSorter),
            Err(Error::NonFiniteSample { .. })
        ));
    }

    #[test]
    fn test_merge_many() {
        let mut arrays = shuffled_arrays(32, 1000);
        let digests = build_many(&mut arrays, &DigestConfig::new(50.0), &UnstableSorter).unwrap();

        let merged = merge_many(digests).unwrap();
        assert_eq!(merged.total_weight(), 32_000);
        assert_eq!(merged.min(), Some(0.0));
        assert_eq!(merged.max(), Some(999.0));
        let median = merged.median();
        assert!((median - 499.5).abs() < 10.0, "median={median}");
    }

    #[test]
    fn test_merge_many_empty() {
        assert!(merge_many(Vec::new()).is_none());
    }
}
