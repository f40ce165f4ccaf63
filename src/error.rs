/// Errors raised while building or re-assembling a digest.
///
/// The offending input is rejected before any centroid is produced, so a
/// failed call never yields a partial digest.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("delta must be finite and positive, got {delta}")]
    InvalidDelta { delta: f64 },

    #[error("samples must be sorted ascending: sample {index} ({value}) follows {previous}")]
    UnsortedInput {
        index: usize,
        previous: f64,
        value: f64,
    },

    #[error("sample {index} is not finite ({value})")]
    NonFiniteSample { index: usize, value: f64 },

    #[error("means and weights differ in length: {means} means, {weights} weights")]
    LengthMismatch { means: usize, weights: usize },

    #[error("centroid {index} has zero weight")]
    ZeroWeight { index: usize },

    #[error("centroid {index} has a smaller mean than its predecessor")]
    UnorderedMeans { index: usize },

    #[error("centroid {index} has a non-finite mean ({value})")]
    NonFiniteMean { index: usize, value: f64 },

    #[error("total weight overflows u64 at centroid {index}")]
    WeightOverflow { index: usize },

    #[error("merged weight {left} + {right} overflows u64")]
    MergeOverflow { left: u64, right: u64 },
}

impl Error {
    /// Whether the error rejects a caller-supplied parameter, as opposed to
    /// a combination of valid digests that cannot be represented.
    #[inline]
    pub fn is_invalid_parameter(&self) -> bool {
        match self {
            Self::InvalidDelta { .. }
            | Self::UnsortedInput { .. }
            | Self::NonFiniteSample { .. }
            | Self::LengthMismatch { .. }
            | Self::ZeroWeight { .. }
            | Self::UnorderedMeans { .. }
            | Self::NonFiniteMean { .. }
            | Self::WeightOverflow { .. } => true,
            Self::MergeOverflow { .. } => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Rejects `delta` values that cannot bound a centroid size.
#[inline]
pub(crate) fn check_delta(delta: f64) -> Result<f64> {
    if delta.is_finite() && delta > 0.0 {
        Ok(delta)
    } else {
        Err(Error::InvalidDelta { delta })
    }
}

/// One pass over `samples` checking the builder's input contract.
pub(crate) fn check_sorted_finite(samples: &[f64]) -> Result<()> {
    let mut previous = f64::NEG_INFINITY;
    for (index, &value) in samples.iter().enumerate() {
        if !value.is_finite() {
            return Err(Error::NonFiniteSample { index, value });
        }
        if value < previous {
            return Err(Error::UnsortedInput {
                index,
                previous,
                value,
            });
        }
        previous = value;
    }
    Ok(())
}
