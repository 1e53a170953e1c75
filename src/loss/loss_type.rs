use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::loss::{BceLoss, CrossEntropyLoss, MaeLoss, MseLoss, SseLoss};

/// Selects a consistent (aggregate, gradient) loss pair.
///
/// - `Mae`                — mean absolute error; pair with Linear output.
/// - `Mse`                — mean squared error; pair with Linear or Sigmoid output.
/// - `Sse`                — summed squared error.
/// - `CrossEntropy`       — categorical cross-entropy on a one-hot target; pair with Softmax output.
/// - `BinaryCrossEntropy` — binary cross-entropy; pair with Sigmoid output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossType {
    Mae,
    Mse,
    Sse,
    CrossEntropy,
    BinaryCrossEntropy,
}

impl LossType {
    pub fn aggregate(&self, targets: &[f64], predicted: &[f64]) -> Result<f64> {
        match self {
            LossType::Mae                => MaeLoss::loss(targets, predicted),
            LossType::Mse                => MseLoss::loss(targets, predicted),
            LossType::Sse                => SseLoss::loss(targets, predicted),
            LossType::CrossEntropy       => CrossEntropyLoss::loss(targets, predicted),
            LossType::BinaryCrossEntropy => BceLoss::loss(targets, predicted),
        }
    }

    pub fn gradient(&self, targets: &[f64], predicted: &[f64]) -> Result<Vec<f64>> {
        match self {
            LossType::Mae                => MaeLoss::derivative(targets, predicted),
            LossType::Mse                => MseLoss::derivative(targets, predicted),
            LossType::Sse                => SseLoss::derivative(targets, predicted),
            LossType::CrossEntropy       => CrossEntropyLoss::derivative(targets, predicted),
            LossType::BinaryCrossEntropy => BceLoss::derivative(targets, predicted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&LossType::BinaryCrossEntropy).unwrap();
        assert_eq!(json, "\"binary_cross_entropy\"");
        let back: LossType = serde_json::from_str("\"cross_entropy\"").unwrap();
        assert_eq!(back, LossType::CrossEntropy);
    }
}
