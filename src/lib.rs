pub mod error;
pub mod math;
pub mod activation;
pub mod loss;
pub mod layers;
pub mod network;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use error::{NetworkError, Result};
pub use activation::{ActivationFunction, Activator};
pub use loss::{AggregateLossFn, GradientLossFn, LossType};
pub use layers::{Layer, Unit};
pub use network::{LayerSpec, Network, NetworkBuilder, NetworkSpec};
pub use optim::LearningRateSchedule;
pub use train::{train_loop, DecayCadence, EpochStats, TrainConfig};
