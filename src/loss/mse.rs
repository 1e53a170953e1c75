use crate::error::{NetworkError, Result};
use crate::loss::combinators::{mean_error, pairwise_gradient, total_error};

/// (t - p)²
pub fn squared_error(target: f64, predicted: f64) -> f64 {
    (target - predicted).powi(2)
}

/// d(t - p)² / dp = -2(t - p)
pub fn squared_error_derivative(target: f64, predicted: f64) -> f64 {
    -2.0 * (target - predicted)
}

/// Mean squared error; pair with Linear or Sigmoid output.
pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((target - predicted)²)
    pub fn loss(targets: &[f64], predicted: &[f64]) -> Result<f64> {
        mean_error(targets, predicted, squared_error)
    }

    /// Per-output gradient: -2(t - p) / n
    pub fn derivative(targets: &[f64], predicted: &[f64]) -> Result<Vec<f64>> {
        if predicted.is_empty() {
            return Err(NetworkError::EmptyInput("MseLoss::derivative"));
        }
        let n = predicted.len() as f64;
        let gradient = pairwise_gradient(targets, predicted, squared_error_derivative)?;
        Ok(gradient.into_iter().map(|g| g / n).collect())
    }
}

/// Sum of squared errors over all outputs.
pub struct SseLoss;

impl SseLoss {
    /// Scalar SSE: sum((target - predicted)²)
    pub fn loss(targets: &[f64], predicted: &[f64]) -> Result<f64> {
        total_error(targets, predicted, squared_error)
    }

    /// Per-output gradient: -2(t - p)
    pub fn derivative(targets: &[f64], predicted: &[f64]) -> Result<Vec<f64>> {
        pairwise_gradient(targets, predicted, squared_error_derivative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squared_error_pair() {
        assert_eq!(squared_error(1.0, 0.5), 0.25);
        assert_eq!(squared_error_derivative(1.0, 0.5), -1.0);
    }

    #[test]
    fn mse_is_sse_over_n() {
        let targets = [1.0, 0.0, 0.5];
        let predicted = [0.5, 0.5, 0.0];
        let sse = SseLoss::loss(&targets, &predicted).unwrap();
        let mse = MseLoss::loss(&targets, &predicted).unwrap();
        assert!((sse - 0.75).abs() < 1e-12);
        assert!((mse - 0.25).abs() < 1e-12);
    }

    #[test]
    fn mse_gradient_is_scaled_by_output_count() {
        let grad = MseLoss::derivative(&[1.0, 0.0], &[0.5, 0.5]).unwrap();
        assert_eq!(grad, vec![-0.5, 0.5]);
    }
}
