use crate::centroid::Centroid;

/// Fewer centroids than this carry no usable spread; queries return `0.0`.
pub(crate) const MIN_CENTROIDS: usize = 3;

/// Index of the centroid containing rank `q` and the weight preceding it.
///
/// `None` when `q` is at or beyond the summed weight.
#[inline]
fn locate(centroids: &[Centroid], q: f64) -> Option<(usize, f64)> {
    let mut cum_weight = 0.0;
    for (i, centroid) in centroids.iter().enumerate() {
        let w = centroid.weight as f64;
        if cum_weight + w > q {
            return Some((i, cum_weight));
        }
        cum_weight += w;
    }
    None
}

/// Local density proxy around centroid `i`. Requires at least two centroids.
#[inline]
fn spread(centroids: &[Centroid], i: usize) -> f64 {
    let last = centroids.len() - 1;
    if i == 0 {
        centroids[1].mean - centroids[0].mean
    } else if i == last {
        centroids[i].mean - centroids[i - 1].mean
    } else {
        (centroids[i + 1].mean - centroids[i - 1].mean) / 2.0
    }
}

/// Linear position inside centroid `i` for rank `q`.
#[inline]
fn estimate_at(centroids: &[Centroid], i: usize, cum_weight: f64, q: f64) -> f64 {
    let centroid = &centroids[i];
    centroid.mean + ((q - cum_weight) / centroid.weight as f64 - 0.5) * spread(centroids, i)
}

/// Unclamped interpolation over a mean-ordered centroid slice.
pub(crate) fn interpolate(centroids: &[Centroid], total_weight: u64, x: f64) -> f64 {
    if centroids.len() < MIN_CENTROIDS {
        return 0.0;
    }

    let q = x * total_weight as f64;
    match locate(centroids, q) {
        Some((i, cum_weight)) => estimate_at(centroids, i, cum_weight, q),
        None => centroids[centroids.len() - 1].mean,
    }
}

/// Interpolation limited to the sample range `[min, max]` and to the
/// located centroid's footprint, which keeps estimates monotone in `x`.
///
/// A centroid's footprint runs from the midpoint with its left neighbor to
/// the midpoint with its right neighbor; the outermost centroids extend to
/// `min` and `max`.
pub(crate) fn interpolate_bounded(
    centroids: &[Centroid],
    total_weight: u64,
    min: f64,
    max: f64,
    x: f64,
) -> f64 {
    if centroids.len() < MIN_CENTROIDS {
        return 0.0;
    }

    if x.is_nan() || x <= 0.0 {
        return min;
    }
    if x >= 1.0 {
        return max;
    }

    let q = x * total_weight as f64;
    let last = centroids.len() - 1;
    let Some((i, cum_weight)) = locate(centroids, q) else {
        return centroids[last].mean.min(max);
    };

    let lower = if i == 0 {
        min
    } else {
        (centroids[i - 1].mean + centroids[i].mean) / 2.0
    };
    let upper = if i == last {
        max
    } else {
        (centroids[i].mean + centroids[i + 1].mean) / 2.0
    };

    // max/min rather than clamp: float drift may leave `lower` above `upper`
    // by an ulp, which clamp rejects.
    estimate_at(centroids, i, cum_weight, q)
        .max(lower)
        .min(upper)
}
