use crate::{build::compress, centroid::Centroid, error::*, store::CentroidStore};
use std::{cmp::Ordering, iter::Peekable, slice};

/// Stable two-pointer merge of two mean-ordered centroid slices. On equal
/// means the left side goes first.
struct MergeByMean<'a> {
    left: Peekable<slice::Iter<'a, Centroid>>,
    right: Peekable<slice::Iter<'a, Centroid>>,
}

impl<'a> MergeByMean<'a> {
    fn new(left: &'a [Centroid], right: &'a [Centroid]) -> Self {
        Self {
            left: left.iter().peekable(),
            right: right.iter().peekable(),
        }
    }
}

impl Iterator for MergeByMean<'_> {
    type Item = Centroid;

    fn next(&mut self) -> Option<Self::Item> {
        let take_left = match (self.left.peek(), self.right.peek()) {
            (Some(l), Some(r)) => l.cmp_mean(r) != Ordering::Greater,
            (Some(_), None) => true,
            (None, _) => false,
        };
        if take_left {
            self.left.next().copied()
        } else {
            self.right.next().copied()
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.left.len() + self.right.len();
        (n, Some(n))
    }
}

/// Combines two stores as if one digest had been built over both samples,
/// bounding centroid sizes with `delta`.
///
/// Every centroid is treated as a point mass carrying its weight. When
/// either side is empty the other side is returned as is.
pub(crate) fn merge_stores(
    a: &CentroidStore,
    b: &CentroidStore,
    delta: f64,
) -> Result<CentroidStore> {
    if b.is_empty() {
        return Ok(a.clone());
    }
    if a.is_empty() {
        return Ok(b.clone());
    }

    let total_weight = a
        .total_weight()
        .checked_add(b.total_weight())
        .ok_or(Error::MergeOverflow {
            left: a.total_weight(),
            right: b.total_weight(),
        })?;
    let centroids = compress(
        MergeByMean::new(a.centroids(), b.centroids()),
        total_weight,
        delta,
    );
    Ok(CentroidStore::from_sorted_centroids(centroids))
}

/// Compression of the merge of store `a` (built with `delta_a`) and store
/// `b` (built with `delta_b`).
///
/// When both sides hold centroids the larger value wins: it gives the
/// tighter per-centroid bound, so the merged digest is at least as fine as
/// either input. An empty side is the exception. [merge_stores] then keeps
/// the other side's centroids unchanged, so that side's delta carries over.
#[inline]
pub(crate) fn merged_delta(
    a: &CentroidStore,
    delta_a: f64,
    b: &CentroidStore,
    delta_b: f64,
) -> f64 {
    match (a.is_empty(), b.is_empty()) {
        (false, true) => delta_a,
        (true, false) => delta_b,
        _ => delta_a.max(delta_b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::build;

    #[test]
    fn test_merge_by_mean_is_stable() {
        let left = [Centroid::new(1.0, 1), Centroid::new(3.0, 2)];
        let right = [Centroid::new(1.0, 5), Centroid::new(2.0, 1), Centroid::new(4.0, 1)];
        let merged: Vec<_> = MergeByMean::new(&left, &right).collect();
        assert_eq!(
            merged,
            vec![
                Centroid::new(1.0, 1),
                Centroid::new(1.0, 5),
                Centroid::new(2.0, 1),
                Centroid::new(3.0, 2),
                Centroid::new(4.0, 1),
            ]
        );
        assert_eq!(MergeByMean::new(&left, &right).size_hint(), (5, Some(5)));
    }

    #[test]
    fn test_empty_side_is_identity() {
        let a = build(&(1..=1000).map(f64::from).collect::<Vec<_>>(), 10.0).unwrap();
        let empty = CentroidStore::default();
        assert_eq!(merge_stores(&a, &empty, 10.0), Ok(a.clone()));
        assert_eq!(merge_stores(&empty, &a, 10.0), Ok(a));
        assert!(merge_stores(&empty, &empty, 10.0).unwrap().is_empty());
    }

    #[test]
    fn test_weight_is_additive() {
        let a = build(&(1..=300).map(f64::from).collect::<Vec<_>>(), 10.0).unwrap();
        let b = build(&(1..=4321).map(f64::from).collect::<Vec<_>>(), 10.0).unwrap();
        let merged = merge_stores(&a, &b, 10.0).unwrap();
        assert_eq!(merged.total_weight(), 300 + 4321);
        assert_eq!(merged.weights().iter().sum::<u64>(), 300 + 4321);
        for pair in merged.centroids().windows(2) {
            assert!(pair[0].mean() <= pair[1].mean());
        }
    }

    #[test]
    fn test_interleaved_halves() {
        let evens: Vec<f64> = (0..1000).map(|i| (2 * i) as f64).collect();
        let odds: Vec<f64> = (0..1000).map(|i| (2 * i + 1) as f64).collect();
        let merged = merge_stores(
            &build(&evens, 20.0).unwrap(),
            &build(&odds, 20.0).unwrap(),
            20.0,
        )
        .unwrap();
        assert_eq!(merged.total_weight(), 2000);
        let median = merged.quantile(0.5);
        assert!((median - 1000.0).abs() < 30.0, "median={median}");
    }

    #[test]
    fn test_merged_delta_takes_max() {
        let a = build(&[1.0, 2.0, 3.0], 10.0).unwrap();
        let b = build(&[4.0, 5.0, 6.0], 50.0).unwrap();
        assert_eq!(merged_delta(&a, 10.0, &b, 50.0), 50.0);
        assert_eq!(merged_delta(&b, 50.0, &a, 10.0), 50.0);
        assert_eq!(merged_delta(&a, 10.0, &a, 10.0), 10.0);
    }

    #[test]
    fn test_merged_delta_keeps_non_empty_side() {
        let a = build(&[1.0, 2.0, 3.0], 10.0).unwrap();
        let empty = CentroidStore::default();
        assert_eq!(merged_delta(&a, 10.0, &empty, 500.0), 10.0);
        assert_eq!(merged_delta(&empty, 500.0, &a, 10.0), 10.0);
        assert_eq!(merged_delta(&empty, 500.0, &empty, 10.0), 500.0);
    }

    #[test]
    fn test_overflowing_total_weight() {
        let huge = CentroidStore::from_parts(&[1.0, 2.0], &[u64::MAX - 1, 1]).unwrap();
        let one = CentroidStore::from_parts(&[3.0], &[1]).unwrap();
        assert_eq!(
            merge_stores(&huge, &one, 10.0),
            Err(Error::MergeOverflow {
                left: u64::MAX,
                right: 1
            })
        );
    }
}
