use serde::{Serialize, Deserialize};
use std::fs;
use std::io;
use std::path::Path;

use crate::activation::ActivationFunction;
use crate::error::Result;
use crate::loss::LossType;
use crate::network::builder::NetworkBuilder;
use crate::network::network::Network;

/// Describes one layer in a network specification.
///
/// Fields:
/// - `size`       — number of units in this layer; also the input width of
///                  the next layer
/// - `activation` — activation function applied to the layer's weighted sums
/// - `momentum`   — fraction of the previous update blended into the next (default 0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: usize,
    pub activation: ActivationFunction,
    #[serde(default)]
    pub momentum: f64,
}

/// A serializable description of a network architecture plus its loss.
///
/// Only the topology is stored, never trained weights; `build` always
/// produces a freshly initialized network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name used as the file stem.
    pub name: String,
    /// Width of the input vector.
    pub inputs: usize,
    /// Ordered list of layer descriptions (input → output).
    pub layers: Vec<LayerSpec>,
    /// Loss pair registered on the built network.
    pub loss: LossType,
    /// Seed for weight initialization; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl NetworkSpec {
    /// A builder pre-populated with this spec's layers, loss and seed.
    pub fn builder(&self) -> NetworkBuilder {
        let mut builder = self.layers.iter().fold(
            NetworkBuilder::with_inputs(self.inputs),
            |builder, layer| builder.with_momentum_layer(layer.size, layer.activation.clone(), layer.momentum),
        );
        builder = builder.with_loss(self.loss);
        if let Some(seed) = self.seed {
            builder = builder.with_seed(seed);
        }
        builder
    }

    pub fn build(&self) -> Result<Network> {
        self.builder().build()
    }

    /// Writes the spec to `path` as pretty-printed JSON.
    pub fn save_json(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::from)?;
        fs::write(path, json)
    }

    /// Reads a spec written by `save_json`.  Malformed JSON surfaces as an
    /// I/O error.
    pub fn load_json(path: impl AsRef<Path>) -> io::Result<NetworkSpec> {
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(io::Error::from)
    }
}
