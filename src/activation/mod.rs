pub mod activation;
pub mod activator;

pub use activation::ActivationFunction;
pub use activator::Activator;
