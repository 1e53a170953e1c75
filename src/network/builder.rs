use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use crate::activation::ActivationFunction;
use crate::error::{NetworkError, Result};
use crate::layers::Layer;
use crate::loss::{AggregateLossFn, GradientLossFn, LossType};
use crate::network::network::Network;

#[derive(Debug, Clone)]
struct LayerDesign {
    size: usize,
    activation: ActivationFunction,
    momentum: f64,
}

/// Fluent assembler for a [`Network`].
///
/// ```
/// use backprop_nn::{ActivationFunction, LossType, NetworkBuilder};
///
/// let network = NetworkBuilder::with_inputs(2)
///     .with_layer(2, ActivationFunction::ReLU)
///     .with_layer(1, ActivationFunction::Sigmoid)
///     .with_loss(LossType::Mse)
///     .with_seed(42)
///     .build()
///     .unwrap();
/// assert_eq!(network.output_size(), 1);
/// ```
///
/// A single-layer network can only represent linearly separable functions;
/// anything else needs at least one hidden layer with a non-linear activation.
pub struct NetworkBuilder {
    inputs: usize,
    layers: Vec<LayerDesign>,
    aggregate_loss: Option<AggregateLossFn>,
    gradient_loss: Option<GradientLossFn>,
    seed: Option<u64>,
}

impl NetworkBuilder {
    /// Starts a builder for an `inputs`-wide input vector.
    pub fn with_inputs(inputs: usize) -> NetworkBuilder {
        NetworkBuilder {
            inputs,
            layers: Vec::new(),
            aggregate_loss: None,
            gradient_loss: None,
            seed: None,
        }
    }

    /// Appends a layer without momentum.
    pub fn with_layer(self, size: usize, activation: ActivationFunction) -> NetworkBuilder {
        self.with_momentum_layer(size, activation, 0.0)
    }

    /// Appends a layer whose units blend `momentum` of the previous step into each update.
    pub fn with_momentum_layer(mut self, size: usize, activation: ActivationFunction, momentum: f64) -> NetworkBuilder {
        self.layers.push(LayerDesign { size, activation, momentum });
        self
    }

    pub fn with_aggregate_loss_function<F>(mut self, func: F) -> NetworkBuilder
    where
        F: Fn(&[f64], &[f64]) -> Result<f64> + 'static,
    {
        self.aggregate_loss = Some(Box::new(func));
        self
    }

    pub fn with_gradient_loss_function<F>(mut self, func: F) -> NetworkBuilder
    where
        F: Fn(&[f64], &[f64]) -> Result<Vec<f64>> + 'static,
    {
        self.gradient_loss = Some(Box::new(func));
        self
    }

    /// Registers both halves of a built-in loss pair.
    pub fn with_loss(self, loss: LossType) -> NetworkBuilder {
        self.with_aggregate_loss_function(move |t, p| loss.aggregate(t, p))
            .with_gradient_loss_function(move |t, p| loss.gradient(t, p))
    }

    /// Makes weight initialization reproducible.
    pub fn with_seed(mut self, seed: u64) -> NetworkBuilder {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<Network> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.build_with_rng(&mut rng)
    }

    /// Builds using a caller-supplied random source for initialization.
    pub fn build_with_rng<R: Rng>(self, rng: &mut R) -> Result<Network> {
        self.validate()?;

        let (aggregate_loss, gradient_loss) = match (self.aggregate_loss, self.gradient_loss) {
            (Some(aggregate), Some(gradient)) => (aggregate, gradient),
            (None, None) => {
                let aggregate: AggregateLossFn = Box::new(|t: &[f64], p: &[f64]| LossType::Mse.aggregate(t, p));
                let gradient: GradientLossFn = Box::new(|t: &[f64], p: &[f64]| LossType::Mse.gradient(t, p));
                (aggregate, gradient)
            }
            _ => {
                return Err(NetworkError::InvalidConfiguration(
                    "aggregate and gradient loss functions must be registered together".into(),
                ))
            }
        };

        // each layer's unit count becomes the next layer's input width
        let mut input_size = self.inputs;
        let mut layers = Vec::with_capacity(self.layers.len());
        for design in self.layers {
            layers.push(Layer::new(design.size, input_size, design.activation, design.momentum, rng));
            input_size = design.size;
        }

        debug!(
            inputs = self.inputs,
            topology = ?layers.iter().map(|l| (l.size(), l.activation().clone())).collect::<Vec<_>>(),
            "built network"
        );

        Network::from_layers(layers, aggregate_loss, gradient_loss)
    }

    fn validate(&self) -> Result<()> {
        if self.layers.is_empty() {
            return Err(NetworkError::InvalidConfiguration("no layers were specified".into()));
        }
        if self.inputs == 0 {
            return Err(NetworkError::InvalidConfiguration("input width must be at least 1".into()));
        }
        for (i, design) in self.layers.iter().enumerate() {
            if design.size == 0 {
                return Err(NetworkError::InvalidConfiguration(format!("layer {i} has no units")));
            }
            if !design.momentum.is_finite() || design.momentum < 0.0 {
                return Err(NetworkError::InvalidConfiguration(format!(
                    "layer {i} momentum must be a finite non-negative number, got {}",
                    design.momentum
                )));
            }
        }
        Ok(())
    }
}
