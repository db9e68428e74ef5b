use std::time::Instant;

use tracing::{debug, info, trace};

use crate::data::dataset::{DataSet, validate_all};
use crate::error::{NetworkError, Result};
use crate::network::network::Network;
use crate::train::epoch_stats::{EpochStats, TrainOutcome};
use crate::train::train_config::{TrainConfig, TrainingType};
use crate::train::trainer::run_epoch;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` on `datasets` until `config.training` says to stop.
///
/// # Termination
/// - `Epochs(n)` runs exactly `n` passes. On an empty dataset nothing runs.
/// - `MinimumError(e)` starts from an error of 1.0 and keeps running passes
///   while the error is above `e` and fewer than `config.epoch_ceiling`
///   passes have run. A threshold of 1.0 or more therefore runs no pass.
///
/// # Errors
/// An empty dataset under `MinimumError` (its mean error is undefined), an entry whose lengths do not fit the network, or a
/// negative / NaN error threshold. These are checked before any weight changes.
pub fn train_loop(
    network: &mut Network,
    datasets: &[DataSet],
    config: &TrainConfig,
) -> Result<TrainOutcome> {
    if datasets.is_empty() && matches!(config.training, TrainingType::Epochs(_)) {
        debug!("empty dataset, no epoch to run");
        return Ok(TrainOutcome { epochs: 0, mean_error: None, converged: true });
    }
    validate_all(datasets, network)?;

    let outcome = match config.training {
        TrainingType::Epochs(epochs) => {
            let mut last_error = None;
            for epoch in 1..=epochs {
                last_error = Some(timed_epoch(network, datasets, epoch, config)?);
            }
            TrainOutcome { epochs, mean_error: last_error, converged: true }
        }
        TrainingType::MinimumError(minimum_error) => {
            if minimum_error.is_nan() || minimum_error < 0.0 {
                return Err(NetworkError::InvalidHyperparameter {
                    name: "minimum error",
                    value: minimum_error,
                });
            }

            let mut error = 1.0;
            let mut last_error = None;
            let mut epochs = 0;
            while error > minimum_error && epochs < config.epoch_ceiling {
                epochs += 1;
                error = timed_epoch(network, datasets, epochs, config)?;
                last_error = Some(error);
            }
            TrainOutcome { epochs, mean_error: last_error, converged: error <= minimum_error }
        }
    };

    info!(
        epochs = outcome.epochs,
        mean_error = ?outcome.mean_error,
        converged = outcome.converged,
        "training finished"
    );
    Ok(outcome)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Runs one epoch, reports it, and returns its mean error.
fn timed_epoch(
    network: &mut Network,
    datasets: &[DataSet],
    epoch: usize,
    config: &TrainConfig,
) -> Result<f64> {
    let t_start = Instant::now();
    let mean_error = run_epoch(network, datasets)?;
    let elapsed_ms = t_start.elapsed().as_millis() as u64;

    trace!(epoch, mean_error, "epoch complete");

    if let Some(ref tx) = config.progress_tx {
        // No cancellation: a dropped receiver just stops receiving stats.
        let _ = tx.send(EpochStats { epoch, mean_error, elapsed_ms });
    }
    Ok(mean_error)
}
