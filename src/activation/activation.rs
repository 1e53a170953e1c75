use rand::Rng;
use serde::{Serialize, Deserialize};
use std::f64::consts::PI;

use crate::error::{check_len, Result};
use crate::math::random;

/// Nonlinearity applied to a layer's vector of weighted sums.
///
/// Every variant knows how to squash a whole vector, how to turn an error with
/// respect to its outputs into an error with respect to its inputs, and how to
/// initialize the weights of the units feeding it.  `Softmax` is the only
/// variant whose derivative is not elementwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActivationFunction {
    Linear,
    ReLU,
    LeakyReLU { alpha: f64 },
    Sigmoid,
    Tanh,
    Softmax,
    Elu { alpha: f64 },
    Gelu,
    Swish,
}

impl ActivationFunction {
    /// Forward pass over the full vector of weighted sums.
    pub fn squash(&self, inputs: &[f64]) -> Vec<f64> {
        match self {
            ActivationFunction::Softmax => softmax(inputs),
            _ => inputs.iter().map(|&x| self.function(x)).collect(),
        }
    }

    /// Maps ∂E/∂out to ∂E/∂net given the `inputs` and `outputs` of the last
    /// `squash` call.
    pub fn back_prop(
        &self,
        inputs: &[f64],
        outputs: &[f64],
        error_wrt_output: &[f64],
    ) -> Result<Vec<f64>> {
        check_len("activation back_prop", outputs.len(), error_wrt_output.len())?;
        check_len("activation back_prop", outputs.len(), inputs.len())?;

        let result: Vec<f64> = match self {
            ActivationFunction::Softmax => {
                // Jacobian-vector product: J[i][j] = out_i (δ_ij - out_j)
                let n = outputs.len();
                (0..n)
                    .map(|i| {
                        (0..n)
                            .map(|j| {
                                let jacobian = if i == j {
                                    outputs[i] * (1.0 - outputs[i])
                                } else {
                                    -outputs[i] * outputs[j]
                                };
                                jacobian * error_wrt_output[j]
                            })
                            .sum::<f64>()
                    })
                    .collect()
            }
            _ => error_wrt_output
                .iter()
                .zip(inputs.iter().zip(outputs.iter()))
                .map(|(e, (&x, &out))| e * self.derivative(x, out))
                .collect(),
        };
        Ok(result)
    }

    /// Initial weights for one unit with `input_count` inputs in a layer of
    /// `output_count` units.
    pub fn weight_initializer<R: Rng>(
        &self,
        input_count: usize,
        output_count: usize,
        rng: &mut R,
    ) -> Vec<f64> {
        match self {
            ActivationFunction::ReLU | ActivationFunction::LeakyReLU { .. } => {
                // He-style scale: sqrt(2 / fan_in)
                let std_dev = (2.0 / input_count as f64).sqrt();
                (0..input_count).map(|_| std_dev * rng.gen::<f64>()).collect()
            }
            _ => {
                // Glorot uniform, Glorot & Bengio (AISTATS 2010), scaled down by 0.1
                let limit = (6.0 / (input_count + output_count) as f64).sqrt();
                (0..input_count)
                    .map(|_| 0.1 * random::uniform(rng, -limit, limit))
                    .collect()
            }
        }
    }

    /// Initial bias for one unit in a layer of `output_count` units.
    pub fn bias_initializer<R: Rng>(&self, output_count: usize, rng: &mut R) -> f64 {
        match self {
            ActivationFunction::Linear
            | ActivationFunction::ReLU
            | ActivationFunction::LeakyReLU { .. } => 0.0,
            _ => random::normal(rng, 0.0, 1.0 / (output_count as f64).sqrt()),
        }
    }

    /// Element-wise activation.  Softmax is handled on the whole vector in
    /// `squash`, so it never reaches this path.
    fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Linear | ActivationFunction::Softmax => x,
            ActivationFunction::ReLU => x.max(0.0),
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { x } else { alpha * x },
            ActivationFunction::Sigmoid => sigmoid(x),
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::Elu { alpha } => {
                if x > 0.0 { x } else { alpha * (x.exp() - 1.0) }
            }
            ActivationFunction::Gelu => {
                let c = (2.0_f64 / PI).sqrt();
                0.5 * x * (1.0 + (c * (x + 0.044715 * x.powi(3))).tanh())
            }
            ActivationFunction::Swish => x * sigmoid(x),
        }
    }

    /// Element-wise derivative d out / d net, given the net input `x` and the
    /// already computed output `out`.
    fn derivative(&self, x: f64, out: f64) -> f64 {
        match self {
            ActivationFunction::Linear | ActivationFunction::Softmax => 1.0,
            ActivationFunction::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { 1.0 } else { *alpha },
            ActivationFunction::Sigmoid => out * (1.0 - out),
            ActivationFunction::Tanh => 1.0 - out * out,
            ActivationFunction::Elu { alpha } => if x > 0.0 { 1.0 } else { alpha * x.exp() },
            ActivationFunction::Gelu => {
                let c = (2.0_f64 / PI).sqrt();
                let inner = c * (x + 0.044715 * x.powi(3));
                let tanh_inner = inner.tanh();
                let sech2 = 1.0 - tanh_inner * tanh_inner;
                let d_inner = c * (1.0 + 3.0 * 0.044715 * x.powi(2));
                0.5 * tanh_inner + 0.5 * x * sech2 * d_inner + 0.5
            }
            ActivationFunction::Swish => {
                let sig = sigmoid(x);
                sig + x * sig * (1.0 - sig)
            }
        }
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Softmax with the maximum subtracted first so `exp` cannot overflow.
fn softmax(inputs: &[f64]) -> Vec<f64> {
    let max = inputs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = inputs.iter().map(|x| (x - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
