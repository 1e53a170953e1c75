use crate::error::{NetworkError, Result};
use crate::loss::combinators::check_pair;

/// Predicted probabilities are clamped to [EPS, 1 - EPS] before any log or division.
pub const EPS: f64 = 1e-7;

pub(crate) fn clamp_probability(p: f64) -> f64 {
    p.clamp(EPS, 1.0 - EPS)
}

/// Checks that `targets` is one-hot: exactly one element is 1 and the rest are 0.
pub fn validate_one_hot(targets: &[f64]) -> Result<usize> {
    let mut hot = None;
    for (i, &t) in targets.iter().enumerate() {
        if t == 1.0 {
            if let Some(first) = hot {
                return Err(NetworkError::InvalidTarget(format!(
                    "one-hot target has more than one 1.0 (indices {first} and {i})"
                )));
            }
            hot = Some(i);
        } else if t != 0.0 {
            return Err(NetworkError::InvalidTarget(format!(
                "one-hot target must contain only 0.0 or 1.0, found {t} at index {i}"
            )));
        }
    }
    hot.ok_or_else(|| NetworkError::InvalidTarget("one-hot target has no element equal to 1.0".into()))
}

/// Categorical cross-entropy for a one-hot target; pair with a Softmax output.
pub struct CrossEntropyLoss;

impl CrossEntropyLoss {
    /// L = -Σ t_i · log(clamp(p_i))
    pub fn loss(targets: &[f64], predicted: &[f64]) -> Result<f64> {
        check_pair(targets, predicted)?;
        validate_one_hot(targets)?;
        Ok(targets.iter().zip(predicted)
            .map(|(t, &p)| -t * clamp_probability(p).ln())
            .sum())
    }

    /// ∂L/∂p_i = -t_i / clamp(p_i)
    ///
    /// This is the gradient with respect to the Softmax *outputs*; the Softmax
    /// layer applies its own Jacobian during back propagation.
    pub fn derivative(targets: &[f64], predicted: &[f64]) -> Result<Vec<f64>> {
        check_pair(targets, predicted)?;
        validate_one_hot(targets)?;
        Ok(targets.iter().zip(predicted)
            .map(|(t, &p)| -t / clamp_probability(p))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loss_matches_reference_value() {
        let loss = CrossEntropyLoss::loss(&[1.0, 0.0, 0.0], &[0.7, 0.1, 0.2]).unwrap();
        assert!((loss - 0.3566749439373245).abs() < 1e-5);
    }

    #[test]
    fn derivative_matches_reference_value() {
        let grad = CrossEntropyLoss::derivative(&[0.0, 1.0, 0.0, 0.0], &[0.05, 0.85, 0.10, 0.0]).unwrap();
        let expected = [0.0, -1.17647059, 0.0, 0.0];
        for (g, e) in grad.iter().zip(expected) {
            assert!((g - e).abs() < 1e-5, "{grad:?}");
        }
    }

    #[test]
    fn zero_probability_is_clamped() {
        let loss = CrossEntropyLoss::loss(&[0.0, 1.0], &[1.0, 0.0]).unwrap();
        assert!(loss.is_finite());
        assert!((loss + EPS.ln()).abs() < 1e-9);
    }

    #[test]
    fn one_hot_validation_checks_every_index() {
        assert_eq!(validate_one_hot(&[0.0, 0.0, 1.0]), Ok(2));
        assert!(validate_one_hot(&[1.0, 1.0, 0.0]).is_err());
        assert!(validate_one_hot(&[0.0, 0.0, 0.0]).is_err());
        assert!(validate_one_hot(&[0.5, 0.5]).is_err());
        assert!(CrossEntropyLoss::loss(&[0.0, 2.0], &[0.5, 0.5]).is_err());
    }
}
