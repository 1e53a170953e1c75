use thiserror::Error;

/// Every failure the training engine can report.
///
/// None of these are retried or logged inside the library; they propagate to
/// whoever drives training.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    /// A vector length disagrees with the width it is paired with.
    #[error("shape mismatch in {context}: expected length {expected}, got {actual}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The builder (or a direct constructor) was given an unusable topology.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A weight or bias update produced NaN or infinity.
    #[error("training diverged: {parameter} became {value} (lower the learning rate or check the loss/activation pairing)")]
    Divergence { parameter: String, value: f64 },

    /// Target vector does not satisfy the loss function's contract (e.g. not one-hot).
    #[error("invalid target: {0}")]
    InvalidTarget(String),

    /// An operation that needs at least one element received none.
    #[error("empty input to {0}")]
    EmptyInput(&'static str),
}

pub type Result<T> = std::result::Result<T, NetworkError>;

/// Fails with `ShapeMismatch` unless `actual == expected`.
pub(crate) fn check_len(context: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(NetworkError::ShapeMismatch { context, expected, actual });
    }
    Ok(())
}
