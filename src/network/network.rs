use serde::Serialize;
use std::fmt;

use crate::activation::ActivationFunction;
use crate::error::{check_len, NetworkError, Result};
use crate::layers::{Layer, Unit};
use crate::loss::{AggregateLossFn, GradientLossFn};

/// An ordered chain of layers plus the loss pair used by `train`.
pub struct Network {
    input_size: usize,
    layers: Vec<Layer>,
    aggregate_loss: AggregateLossFn,
    gradient_loss: GradientLossFn,
}

#[derive(Serialize)]
struct LayerDump<'a> {
    activation: &'a ActivationFunction,
    neurons: &'a [Unit],
}

#[derive(Serialize)]
struct NetworkDump<'a> {
    layers: Vec<LayerDump<'a>>,
}

impl Network {
    /// Assembles a network from already constructed layers, checking that
    /// each layer's width matches the next layer's input width.
    pub fn from_layers(
        layers: Vec<Layer>,
        aggregate_loss: AggregateLossFn,
        gradient_loss: GradientLossFn,
    ) -> Result<Network> {
        let input_size = match layers.first() {
            Some(layer) => layer.input_size(),
            None => return Err(NetworkError::InvalidConfiguration("no layers were specified".into())),
        };
        for pair in layers.windows(2) {
            check_len("layer chain", pair[0].size(), pair[1].input_size())?;
        }
        Ok(Network { input_size, layers, aggregate_loss, gradient_loss })
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(self.input_size, Layer::size)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Inference: folds `inputs` through every layer.
    pub fn apply(&self, inputs: &[f64]) -> Result<Vec<f64>> {
        check_len("network inputs", self.input_size, inputs.len())?;
        let mut current = inputs.to_vec();
        for layer in &self.layers {
            current = layer.apply(&current)?;
        }
        Ok(current)
    }

    /// One stochastic gradient-descent step on a single sample.
    ///
    /// The whole step runs on a staged copy of the layers, which replaces the
    /// live ones only once every layer has updated.  On any error the network
    /// is left exactly as it was.
    ///
    /// Returns the aggregate loss measured before the weights were updated.
    pub fn train(&mut self, inputs: &[f64], targets: &[f64], learning_rate: f64) -> Result<f64> {
        check_len("network inputs", self.input_size, inputs.len())?;
        check_len("network targets", self.output_size(), targets.len())?;

        let mut staged = self.layers.clone();

        // layer_inputs[i] is what layer i saw; the final output is kept apart
        let mut layer_inputs: Vec<Vec<f64>> = Vec::with_capacity(staged.len());
        let mut current = inputs.to_vec();
        for layer in &mut staged {
            let next = layer.feed_from(&current)?;
            layer_inputs.push(std::mem::replace(&mut current, next));
        }
        let predicted = current;

        let aggregate_error = (self.aggregate_loss)(targets, &predicted)?;
        let gradient = (self.gradient_loss)(targets, &predicted)?;
        check_len("loss gradient", predicted.len(), gradient.len())?;

        let mut error = gradient;
        for (layer, layer_input) in staged.iter_mut().zip(&layer_inputs).rev() {
            error = layer.back_prop(layer_input, &error, learning_rate)?;
        }

        self.layers = staged;
        Ok(aggregate_error)
    }

    /// Human-readable JSON rendering of every layer's units (weights and bias).
    /// Diagnostic only; there is no loader for it.
    pub fn dump(&self) -> String {
        let dump = NetworkDump {
            layers: self.layers.iter()
                .map(|layer| LayerDump { activation: layer.activation(), neurons: layer.units() })
                .collect(),
        };
        serde_json::to_string_pretty(&dump)
            .unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}

impl fmt::Debug for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Network")
            .field("input_size", &self.input_size)
            .field("layers", &self.layers)
            .finish_non_exhaustive()
    }
}
