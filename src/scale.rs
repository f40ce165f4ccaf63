/*
 * The builder bounds each centroid's weight by a fraction of the total weight
 * that depends on where the centroid sits in the cumulative distribution:
 *
 *   max_weight(q) = n * scale(q, d)
 *
 * A usable bound has the following properties:
 *   - scale(0, d) = scale(1, d) = 0, so centroids at the extremes stay small
 *     and the tails keep their resolution.
 *   - scale(q, d) = scale(1 - q, d), so upper and lower quantiles are equally
 *     accurate.
 *   - scale(q, d) is largest at q = 0.5.
 *
 * The bound used here comes from the arcsine scale function
 *
 *   k(q, d) = d / 2 * asin(2q - 1)
 *
 * where a centroid may cover at most one unit of k. Its derivative is
 *
 *   dk/dq = d / (2 * sqrt(q * (1 - q)))
 *
 * so one unit of k covers roughly dq = 2 * sqrt(q * (1 - q)) / d of the
 * distribution. k spans d * pi / 2 units over [0, 1], so the centroid count
 * settles near 1.6 * d however many samples are digested. Small samples sit
 * somewhat above that, since their tail centroids cannot hold less than one
 * sample.
 */

/// Largest fraction of the total weight a centroid centered at cumulative
/// quantile `q` may hold.
#[inline]
pub(crate) fn scale(q: f64, delta: f64) -> f64 {
    let q = q.clamp(0.0, 1.0);
    2.0 * (q * (1.0 - q)).sqrt() / delta
}

/// Upper bound for the weight of a centroid centered at `q`, given `total`
/// samples.
#[inline]
pub(crate) fn max_weight(q: f64, delta: f64, total: u64) -> f64 {
    total as f64 * scale(q, delta)
}
