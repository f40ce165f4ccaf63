use float_ord::FloatOrd;

/// Puts raw samples into the ascending order the builder requires.
///
/// Digest construction never sorts on its own; callers holding unsorted data
/// hand one of these to [TDigest::from_unsorted](crate::TDigest::from_unsorted)
/// or [DigestConfig::build_unsorted](crate::DigestConfig::build_unsorted).
pub trait Sorter {
    fn sort(&self, values: &mut [f64]);
}

impl<F> Sorter for F
where
    F: Fn(&mut [f64]),
{
    #[inline]
    fn sort(&self, values: &mut [f64]) {
        self(values)
    }
}

/// Stable sort under [FloatOrd]'s total order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatOrdSorter;

impl Sorter for FloatOrdSorter {
    #[inline]
    fn sort(&self, values: &mut [f64]) {
        values.sort_by_key(|v| FloatOrd(*v));
    }
}

/// Unstable sort under [f64::total_cmp]. Faster on large buffers.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnstableSorter;

impl Sorter for UnstableSorter {
    #[inline]
    fn sort(&self, values: &mut [f64]) {
        values.sort_unstable_by(f64::total_cmp);
    }
}
