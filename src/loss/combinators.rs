use crate::error::{check_len, NetworkError, Result};

/// Scalar error of one `(target, predicted)` pair.
pub type PairError = fn(f64, f64) -> f64;

/// Sum of `error(target, predicted)` over aligned pairs.
pub fn total_error(targets: &[f64], predicted: &[f64], error: PairError) -> Result<f64> {
    check_pair(targets, predicted)?;
    Ok(targets.iter().zip(predicted).map(|(&t, &p)| error(t, p)).sum())
}

/// Mean of `error(target, predicted)` over aligned pairs.
pub fn mean_error(targets: &[f64], predicted: &[f64], error: PairError) -> Result<f64> {
    if targets.is_empty() && predicted.is_empty() {
        return Err(NetworkError::EmptyInput("mean_error"));
    }
    Ok(total_error(targets, predicted, error)? / targets.len() as f64)
}

/// Aggregate loss function averaging `error` over all outputs.
pub fn mean_of(error: PairError) -> impl Fn(&[f64], &[f64]) -> Result<f64> {
    move |targets: &[f64], predicted: &[f64]| mean_error(targets, predicted, error)
}

/// Aggregate loss function summing `error` over all outputs.
pub fn total_of(error: PairError) -> impl Fn(&[f64], &[f64]) -> Result<f64> {
    move |targets: &[f64], predicted: &[f64]| total_error(targets, predicted, error)
}

/// Element-wise gradient built from a per-pair derivative.
pub fn pairwise_gradient(targets: &[f64], predicted: &[f64], derivative: PairError) -> Result<Vec<f64>> {
    check_pair(targets, predicted)?;
    Ok(targets.iter().zip(predicted).map(|(&t, &p)| derivative(t, p)).collect())
}

pub(crate) fn check_pair(targets: &[f64], predicted: &[f64]) -> Result<()> {
    check_len("loss function", targets.len(), predicted.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff(t: f64, p: f64) -> f64 {
        t - p
    }

    #[test]
    fn total_and_mean_over_pairs() {
        let targets = [1.0, 2.0, 3.0];
        let predicted = [0.0, 0.0, 0.0];
        assert_eq!(total_error(&targets, &predicted, diff).unwrap(), 6.0);
        assert_eq!(mean_error(&targets, &predicted, diff).unwrap(), 2.0);
        assert_eq!(mean_of(diff)(&targets, &predicted).unwrap(), 2.0);
        assert_eq!(total_of(diff)(&targets, &predicted).unwrap(), 6.0);
    }

    #[test]
    fn mismatched_lengths_fail() {
        let err = total_error(&[1.0, 2.0], &[1.0], diff).unwrap_err();
        assert!(matches!(err, NetworkError::ShapeMismatch { expected: 2, actual: 1, .. }));
    }

    #[test]
    fn mean_of_nothing_is_an_error() {
        assert_eq!(mean_error(&[], &[], diff), Err(NetworkError::EmptyInput("mean_error")));
    }
}
