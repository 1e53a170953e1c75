pub mod combinators;
pub mod mae;
pub mod mse;
pub mod cross_entropy;
pub mod bce;
pub mod loss_type;

pub use combinators::{mean_error, mean_of, total_error, total_of, PairError};
pub use mae::{absolute_error, MaeLoss};
pub use mse::{squared_error, squared_error_derivative, MseLoss, SseLoss};
pub use cross_entropy::{validate_one_hot, CrossEntropyLoss};
pub use bce::BceLoss;
pub use loss_type::LossType;

use crate::error::Result;

/// Aggregate loss: `(targets, predicted) -> scalar`.
pub type AggregateLossFn = Box<dyn Fn(&[f64], &[f64]) -> Result<f64>>;

/// Loss gradient with respect to each predicted component: `(targets, predicted) -> vector`.
pub type GradientLossFn = Box<dyn Fn(&[f64], &[f64]) -> Result<Vec<f64>>>;
