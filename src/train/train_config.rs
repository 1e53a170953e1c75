use serde::{Serialize, Deserialize};
use std::sync::mpsc;

use crate::optim::schedule::LearningRateSchedule;
use crate::train::epoch_stats::EpochStats;

/// When `train_loop` advances the learning-rate schedule.
///
/// Decaying per sample shrinks the rate `samples` times faster than decaying
/// per epoch, so the two produce very different effective schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecayCadence {
    PerEpoch,
    PerSample,
    Never,
}

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`        — maximum number of full passes over the training data
/// - `schedule`      — learning-rate schedule; cloned at the start of the run
/// - `decay_cadence` — when the schedule's `decay()` is invoked
/// - `shuffle`       — reshuffle sample order every epoch
/// - `seed`          — seed for the shuffle; entropy when absent
/// - `target_loss`   — stop once an epoch's mean loss falls below this value
/// - `progress_tx`   — optional channel sender; one `EpochStats` is sent per
///                     completed epoch.  If the receiver is dropped the loop
///                     terminates early.
pub struct TrainConfig {
    pub epochs: usize,
    pub schedule: LearningRateSchedule,
    pub decay_cadence: DecayCadence,
    pub shuffle: bool,
    pub seed: Option<u64>,
    pub target_loss: Option<f64>,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` that decays per epoch, shuffles, and runs every epoch.
    pub fn new(epochs: usize, schedule: LearningRateSchedule) -> Self {
        TrainConfig {
            epochs,
            schedule,
            decay_cadence: DecayCadence::PerEpoch,
            shuffle: true,
            seed: None,
            target_loss: None,
            progress_tx: None,
        }
    }

    pub fn decay_cadence(mut self, cadence: DecayCadence) -> Self {
        self.decay_cadence = cadence;
        self
    }

    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn target_loss(mut self, target: f64) -> Self {
        self.target_loss = Some(target);
        self
    }

    pub fn progress(mut self, tx: mpsc::Sender<EpochStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }
}
