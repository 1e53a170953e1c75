use serde::Serialize;

use crate::error::{check_len, NetworkError, Result};

/// A single weighted-sum-plus-bias unit with momentum-based updates.
///
/// The weight vector is fixed in length at construction; only its values, the
/// bias and the momentum accumulators change, and only through `back_prop`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unit {
    weights: Vec<f64>,
    bias: f64,
    #[serde(skip)]
    momentum: f64,
    #[serde(skip)]
    weight_momentums: Vec<f64>,
    #[serde(skip)]
    bias_momentum: f64,
}

impl Unit {
    pub fn new(weights: Vec<f64>, bias: f64) -> Unit {
        Unit::with_momentum(weights, bias, 0.0)
    }

    pub fn with_momentum(weights: Vec<f64>, bias: f64, momentum: f64) -> Unit {
        let weight_momentums = vec![0.0; weights.len()];
        Unit {
            weights,
            bias,
            momentum,
            weight_momentums,
            bias_momentum: 0.0,
        }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    pub fn input_size(&self) -> usize {
        self.weights.len()
    }

    /// Σ inputs[i]·weights[i] + bias
    pub fn apply(&self, inputs: &[f64]) -> Result<f64> {
        check_len("unit inputs", self.weights.len(), inputs.len())?;
        Ok(inputs.iter().zip(&self.weights).map(|(x, w)| x * w).sum::<f64>() + self.bias)
    }

    /// Applies one gradient-descent step given ∂E/∂net for this unit and
    /// returns the error to propagate to each input, weighted by the
    /// pre-update weights.
    ///
    /// The update is committed only if every new weight and the new bias are
    /// finite; otherwise the unit is left untouched and `Divergence` is returned.
    pub fn back_prop(&mut self, inputs: &[f64], error_wrt_net: f64, learning_rate: f64) -> Result<Vec<f64>> {
        check_len("unit inputs", self.weights.len(), inputs.len())?;

        let mut new_weights = Vec::with_capacity(self.weights.len());
        let mut new_momentums = Vec::with_capacity(self.weights.len());
        let mut error_to_propagate = Vec::with_capacity(self.weights.len());

        for (i, (&weight, &input)) in self.weights.iter().zip(inputs).enumerate() {
            let gradient = error_wrt_net * input;
            error_to_propagate.push(error_wrt_net * weight);

            let delta = self.momentum * self.weight_momentums[i] - learning_rate * gradient;
            let updated = weight + delta;
            if !updated.is_finite() {
                return Err(NetworkError::Divergence {
                    parameter: format!("weight[{i}] (was {weight}, input {input}, error {error_wrt_net})"),
                    value: updated,
                });
            }
            new_momentums.push(delta);
            new_weights.push(updated);
        }

        let bias_delta = self.momentum * self.bias_momentum - learning_rate * error_wrt_net;
        let new_bias = self.bias + bias_delta;
        if !new_bias.is_finite() {
            return Err(NetworkError::Divergence {
                parameter: format!("bias (was {}, error {error_wrt_net})", self.bias),
                value: new_bias,
            });
        }

        self.weights = new_weights;
        self.weight_momentums = new_momentums;
        self.bias = new_bias;
        self.bias_momentum = bias_delta;

        Ok(error_to_propagate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_unit() -> Unit {
        Unit::new(vec![-3.0, -1.0, 2.0], 1.0)
    }

    #[test]
    fn apply_is_weighted_sum_plus_bias() {
        assert_eq!(sample_unit().apply(&[1.0, -2.0, 3.0]).unwrap(), 6.0);
    }

    #[test]
    fn back_prop_steps_against_gradient() {
        let mut unit = sample_unit();
        let propagated = unit.back_prop(&[1.0, -2.0, 3.0], 1.0, 0.001).unwrap();

        let expected = [-3.001, -0.998, 1.997];
        for (w, e) in unit.weights().iter().zip(expected) {
            assert!((w - e).abs() < 1e-12, "{:?}", unit.weights());
        }
        assert!((unit.bias() - 0.999).abs() < 1e-12);
        // error is distributed by the weights as they were before the update
        assert_eq!(propagated, vec![-3.0, -1.0, 2.0]);
    }

    #[test]
    fn momentum_accumulates_previous_step() {
        let mut unit = Unit::with_momentum(vec![0.0], 0.0, 0.5);
        unit.back_prop(&[1.0], 1.0, 0.1).unwrap();
        assert!((unit.weights()[0] + 0.1).abs() < 1e-12);
        unit.back_prop(&[1.0], 1.0, 0.1).unwrap();
        // second delta = 0.5 * -0.1 - 0.1 = -0.15
        assert!((unit.weights()[0] + 0.25).abs() < 1e-12);
        assert!((unit.bias() + 0.25).abs() < 1e-12);
    }

    #[test]
    fn wrong_input_width_is_rejected() {
        let mut unit = sample_unit();
        assert!(matches!(unit.apply(&[1.0]), Err(NetworkError::ShapeMismatch { expected: 3, actual: 1, .. })));
        assert!(unit.back_prop(&[1.0, 2.0], 1.0, 0.1).is_err());
    }

    #[test]
    fn non_finite_update_is_fatal_and_not_applied() {
        let mut unit = sample_unit();
        let before = unit.clone();
        let err = unit.back_prop(&[1.0, -2.0, 3.0], f64::NAN, 0.1).unwrap_err();
        assert!(matches!(err, NetworkError::Divergence { .. }));
        assert_eq!(unit, before);

        let err = unit.back_prop(&[f64::INFINITY, 0.0, 0.0], 1.0, 0.1).unwrap_err();
        assert!(matches!(err, NetworkError::Divergence { .. }));
    }
}
