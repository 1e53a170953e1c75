use crate::activation::activation::ActivationFunction;
use crate::error::Result;

/// An activation function together with the inputs and outputs of its most
/// recent `squash`, which `back_prop` needs.
///
/// Each `Layer` owns exactly one of these; it must not be shared between
/// layers because the cache belongs to a single forward/backward pair.
#[derive(Debug, Clone)]
pub struct Activator {
    function: ActivationFunction,
    inputs: Vec<f64>,
    outputs: Vec<f64>,
}

impl Activator {
    pub fn new(function: ActivationFunction) -> Activator {
        Activator {
            function,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn function(&self) -> &ActivationFunction {
        &self.function
    }

    /// Squashes `inputs` and remembers both sides for the next `back_prop`.
    pub fn squash(&mut self, inputs: &[f64]) -> Vec<f64> {
        self.inputs = inputs.to_vec();
        self.outputs = self.function.squash(inputs);
        self.outputs.clone()
    }

    /// ∂E/∂net for the last squashed vector.  Fails with a shape mismatch if
    /// `error_wrt_output` does not match the last output width (including when
    /// nothing has been squashed yet).
    pub fn back_prop(&self, error_wrt_output: &[f64]) -> Result<Vec<f64>> {
        self.function.back_prop(&self.inputs, &self.outputs, error_wrt_output)
    }
}
