use serde::{Serialize, Deserialize};

/// Per-epoch training statistics emitted by `train_loop`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Maximum epochs requested for this run.
    pub total_epochs: usize,
    /// Mean pre-update loss over all samples in this epoch.
    pub train_loss: f64,
    /// Learning rate in effect at the end of the epoch.
    pub learning_rate: f64,
    /// Fraction of samples classified correctly after the epoch, in [0, 1].
    pub accuracy: f64,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}
