use crate::error::{NetworkError, Result};
use crate::loss::combinators::check_pair;
use crate::loss::cross_entropy::clamp_probability;

/// Binary cross-entropy over independent per-output probabilities; pair with a
/// Sigmoid output.
pub struct BceLoss;

impl BceLoss {
    /// Scalar BCE: mean(-(t·log(p) + (1-t)·log(1-p))), p clamped to [ε, 1-ε]
    pub fn loss(targets: &[f64], predicted: &[f64]) -> Result<f64> {
        check_pair(targets, predicted)?;
        if predicted.is_empty() {
            return Err(NetworkError::EmptyInput("BceLoss::loss"));
        }
        let n = predicted.len() as f64;
        Ok(targets.iter().zip(predicted)
            .map(|(t, &p)| {
                let p = clamp_probability(p);
                -(t * p.ln() + (1.0 - t) * (1.0 - p).ln())
            })
            .sum::<f64>() / n)
    }

    /// Per-output gradient: -(t/p - (1-t)/(1-p)) / n
    pub fn derivative(targets: &[f64], predicted: &[f64]) -> Result<Vec<f64>> {
        check_pair(targets, predicted)?;
        if predicted.is_empty() {
            return Err(NetworkError::EmptyInput("BceLoss::derivative"));
        }
        let n = predicted.len() as f64;
        Ok(targets.iter().zip(predicted)
            .map(|(t, &p)| {
                let p = clamp_probability(p);
                -(t / p - (1.0 - t) / (1.0 - p)) / n
            })
            .collect())
    }
}
