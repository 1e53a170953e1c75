use std::time::Instant;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::{debug, info, warn};

use crate::error::{check_len, NetworkError, Result};
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::{DecayCadence, TrainConfig};

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` one sample at a time for up to `config.epochs` epochs and
/// returns the mean training loss of the **last completed epoch**.
///
/// # Early termination
/// The loop stops before `config.epochs` if:
/// - an epoch's mean loss is below `config.target_loss`, **or**
/// - the `progress_tx` receiver has been dropped.
///
/// # Errors
/// - `InvalidConfiguration` if `config.epochs` is zero
/// - `EmptyInput` if there are no samples
/// - `ShapeMismatch` if the input and target counts differ, or any sample has
///   the wrong width
/// - `Divergence` as soon as an update goes non-finite
pub fn train_loop(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    config: &TrainConfig,
) -> Result<f64> {
    if config.epochs == 0 {
        return Err(NetworkError::InvalidConfiguration("train_loop needs at least one epoch".into()));
    }
    if inputs.is_empty() {
        return Err(NetworkError::EmptyInput("train_loop"));
    }
    check_len("train_loop targets", inputs.len(), targets.len())?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut schedule = config.schedule.clone();
    let mut order: Vec<usize> = (0..inputs.len()).collect();
    let mut last_loss = f64::NAN;

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();

        if config.shuffle {
            order.shuffle(&mut rng);
        }

        // ── One full pass over the training data ───────────────────────────
        let mut total_loss = 0.0;
        for &idx in &order {
            let loss = network
                .train(&inputs[idx], &targets[idx], schedule.value())
                .map_err(|e| {
                    if let NetworkError::Divergence { .. } = e {
                        warn!(epoch, sample = idx, learning_rate = schedule.value(), "training diverged");
                    }
                    e
                })?;
            total_loss += loss;

            if config.decay_cadence == DecayCadence::PerSample {
                schedule.decay();
            }
        }
        if config.decay_cadence == DecayCadence::PerEpoch {
            schedule.decay();
        }

        last_loss = total_loss / inputs.len() as f64;
        let accuracy = compute_accuracy(network, inputs, targets)?;
        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        debug!(epoch, loss = last_loss, accuracy, learning_rate = schedule.value(), elapsed_ms, "epoch complete");

        // ── Emit progress ─────────────────────────────────────────────────
        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss: last_loss,
            learning_rate: schedule.value(),
            accuracy,
            elapsed_ms,
        };
        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                info!(epoch, loss = last_loss, "progress receiver dropped, stopping");
                break;
            }
        }

        if let Some(target) = config.target_loss {
            if last_loss < target {
                info!(epoch, loss = last_loss, target, "target loss reached");
                return Ok(last_loss);
            }
        }
    }

    info!(epochs = config.epochs, loss = last_loss, "training finished");
    Ok(last_loss)
}

/// Index of the first largest element; 0 for an empty slice.  NaNs never win.
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &value) in values.iter().enumerate() {
        if value > values[best] || values[best].is_nan() {
            best = i;
        }
    }
    best
}

/// Class index of an output vector: the argmax for multi-output vectors,
/// `1` if above 0.5 (else `0`) for a single output.
pub fn classify(output: &[f64]) -> usize {
    match output {
        [single] => usize::from(*single > 0.5),
        _ => argmax(output),
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Fraction of samples classified correctly.
fn compute_accuracy(network: &Network, inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<f64> {
    let mut correct = 0usize;
    for (input, target) in inputs.iter().zip(targets) {
        if classify(&network.apply(input)?) == classify(target) {
            correct += 1;
        }
    }
    Ok(correct as f64 / inputs.len() as f64)
}
