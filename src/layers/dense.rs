use rand::Rng;

use crate::activation::{ActivationFunction, Activator};
use crate::error::{check_len, NetworkError, Result};
use crate::layers::unit::Unit;

/// A fully connected layer: `size` units over the same `input_size` inputs,
/// followed by one activation applied to the whole output vector.
#[derive(Debug, Clone)]
pub struct Layer {
    input_size: usize,
    units: Vec<Unit>,
    activator: Activator,
}

impl Layer {
    /// Creates a layer whose weights and biases come from the activation's
    /// initializers.
    pub fn new<R: Rng>(
        size: usize,
        input_size: usize,
        activation: ActivationFunction,
        momentum: f64,
        rng: &mut R,
    ) -> Layer {
        let units = (0..size)
            .map(|_| {
                let weights = activation.weight_initializer(input_size, size, rng);
                let bias = activation.bias_initializer(size, rng);
                Unit::with_momentum(weights, bias, momentum)
            })
            .collect();

        Layer {
            input_size,
            units,
            activator: Activator::new(activation),
        }
    }

    /// Wraps hand-built units.  All units must share one input width.
    pub fn from_units(units: Vec<Unit>, activation: ActivationFunction) -> Result<Layer> {
        let input_size = match units.first() {
            Some(unit) => unit.input_size(),
            None => return Err(NetworkError::InvalidConfiguration("a layer needs at least one unit".into())),
        };
        for unit in &units {
            check_len("layer unit width", input_size, unit.input_size())?;
        }
        Ok(Layer {
            input_size,
            units,
            activator: Activator::new(activation),
        })
    }

    pub fn size(&self) -> usize {
        self.units.len()
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn activation(&self) -> &ActivationFunction {
        self.activator.function()
    }

    /// Forward pass without touching the backprop cache.
    pub fn apply(&self, inputs: &[f64]) -> Result<Vec<f64>> {
        let net = self.weighted_sums(inputs)?;
        Ok(self.activator.function().squash(&net))
    }

    /// Forward pass that records what the activation saw, for the matching
    /// `back_prop` call.
    pub fn feed_from(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        let net = self.weighted_sums(inputs)?;
        Ok(self.activator.squash(&net))
    }

    /// Updates every unit and returns ∂E/∂input for the preceding layer.
    ///
    /// `inputs` must be the vector passed to the last `feed_from`.  Each input
    /// feeds every unit, so its error is summed across units.  Units are
    /// updated all together or, on error, not at all.
    pub fn back_prop(&mut self, inputs: &[f64], error_wrt_output: &[f64], learning_rate: f64) -> Result<Vec<f64>> {
        check_len("layer inputs", self.input_size, inputs.len())?;
        let error_wrt_net = self.activator.back_prop(error_wrt_output)?;

        let mut staged = self.units.clone();
        let mut aggregate_error_per_input = vec![0.0; self.input_size];
        for (unit, &error) in staged.iter_mut().zip(&error_wrt_net) {
            let error_per_input = unit.back_prop(inputs, error, learning_rate)?;
            for (total, e) in aggregate_error_per_input.iter_mut().zip(error_per_input) {
                *total += e;
            }
        }

        self.units = staged;
        Ok(aggregate_error_per_input)
    }

    fn weighted_sums(&self, inputs: &[f64]) -> Result<Vec<f64>> {
        check_len("layer inputs", self.input_size, inputs.len())?;
        self.units.iter().map(|unit| unit.apply(inputs)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn linear_layer() -> Layer {
        Layer::from_units(
            vec![
                Unit::new(vec![1.0, 2.0], 0.5),
                Unit::new(vec![-1.0, 0.5], 0.0),
            ],
            ActivationFunction::Linear,
        )
        .unwrap()
    }

    #[test]
    fn new_layer_has_requested_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        let layer = Layer::new(4, 3, ActivationFunction::Tanh, 0.9, &mut rng);
        assert_eq!(layer.size(), 4);
        assert_eq!(layer.input_size(), 3);
        assert!(layer.units().iter().all(|u| u.weights().len() == 3 && u.momentum() == 0.9));
    }

    #[test]
    fn relu_layer_starts_with_zero_bias() {
        let mut rng = StdRng::seed_from_u64(2);
        let layer = Layer::new(3, 2, ActivationFunction::ReLU, 0.0, &mut rng);
        assert!(layer.units().iter().all(|u| u.bias() == 0.0));
    }

    #[test]
    fn apply_squashes_weighted_sums() {
        let layer = linear_layer();
        assert_eq!(layer.apply(&[1.0, 1.0]).unwrap(), vec![3.5, -0.5]);

        let relu = Layer::from_units(layer.units().to_vec(), ActivationFunction::ReLU).unwrap();
        assert_eq!(relu.apply(&[1.0, 1.0]).unwrap(), vec![3.5, 0.0]);
    }

    #[test]
    fn back_prop_sums_error_across_units() {
        let mut layer = linear_layer();
        let inputs = [1.0, 1.0];
        layer.feed_from(&inputs).unwrap();
        let upstream = layer.back_prop(&inputs, &[1.0, 2.0], 0.0).unwrap();
        // input 0: 1*1 + 2*-1 ; input 1: 1*2 + 2*0.5
        assert_eq!(upstream, vec![-1.0, 3.0]);
    }

    #[test]
    fn back_prop_updates_units() {
        let mut layer = linear_layer();
        let inputs = [1.0, 2.0];
        layer.feed_from(&inputs).unwrap();
        layer.back_prop(&inputs, &[1.0, 0.0], 0.1).unwrap();
        let first = &layer.units()[0];
        assert!((first.weights()[0] - 0.9).abs() < 1e-12);
        assert!((first.weights()[1] - 1.8).abs() < 1e-12);
        assert!((first.bias() - 0.4).abs() < 1e-12);
        assert_eq!(layer.units()[1].weights(), &[-1.0, 0.5]);
    }

    #[test]
    fn diverging_unit_rolls_back_the_whole_layer() {
        let mut layer = Layer::from_units(
            vec![Unit::new(vec![1.0], 0.0), Unit::new(vec![1.0], f64::MAX)],
            ActivationFunction::Linear,
        )
        .unwrap();
        layer.feed_from(&[1.0]).unwrap();
        let result = layer.back_prop(&[1.0], &[2.0, f64::INFINITY], 0.1);
        assert!(matches!(result, Err(NetworkError::Divergence { .. })));
        assert_eq!(layer.units()[0].weights(), &[1.0]);
        assert_eq!(layer.units()[0].bias(), 0.0);
    }

    #[test]
    fn shape_errors_surface() {
        let mut layer = linear_layer();
        assert!(layer.apply(&[1.0]).is_err());
        layer.feed_from(&[1.0, 1.0]).unwrap();
        assert!(layer.back_prop(&[1.0, 1.0], &[1.0], 0.1).is_err());
        assert!(layer.back_prop(&[1.0], &[1.0, 1.0], 0.1).is_err());
    }

    #[test]
    fn from_units_rejects_ragged_widths() {
        let result = Layer::from_units(
            vec![Unit::new(vec![1.0], 0.0), Unit::new(vec![1.0, 2.0], 0.0)],
            ActivationFunction::Linear,
        );
        assert!(matches!(result, Err(NetworkError::ShapeMismatch { .. })));
        assert!(Layer::from_units(vec![], ActivationFunction::Linear).is_err());
    }
}
