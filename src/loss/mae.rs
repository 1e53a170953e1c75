use crate::error::{NetworkError, Result};
use crate::loss::combinators::{mean_error, pairwise_gradient};

/// |t - p|, frequently used for regression problems.
pub fn absolute_error(target: f64, predicted: f64) -> f64 {
    (target - predicted).abs()
}

/// d|t - p| / dp = -sign(t - p), taken as 0 when the two are equal.
pub fn absolute_error_derivative(target: f64, predicted: f64) -> f64 {
    let diff = target - predicted;
    if diff > 0.0 { -1.0 } else if diff < 0.0 { 1.0 } else { 0.0 }
}

/// Mean absolute error over all outputs.
pub struct MaeLoss;

impl MaeLoss {
    /// Scalar MAE: mean(|target - predicted|)
    pub fn loss(targets: &[f64], predicted: &[f64]) -> Result<f64> {
        mean_error(targets, predicted, absolute_error)
    }

    /// Per-output subgradient: -sign(t - p) / n
    pub fn derivative(targets: &[f64], predicted: &[f64]) -> Result<Vec<f64>> {
        if predicted.is_empty() {
            return Err(NetworkError::EmptyInput("MaeLoss::derivative"));
        }
        let n = predicted.len() as f64;
        let gradient = pairwise_gradient(targets, predicted, absolute_error_derivative)?;
        Ok(gradient.into_iter().map(|g| g / n).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mae_of_known_pairs() {
        let loss = MaeLoss::loss(&[1.0, -1.0], &[0.5, 0.0]).unwrap();
        assert!((loss - 0.75).abs() < 1e-12);
    }

    #[test]
    fn subgradient_points_toward_target() {
        let grad = MaeLoss::derivative(&[1.0, -1.0, 2.0], &[0.5, 0.0, 2.0]).unwrap();
        assert_eq!(grad, vec![-1.0 / 3.0, 1.0 / 3.0, 0.0]);
    }
}
