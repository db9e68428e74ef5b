use std::sync::mpsc;

use serde::{Serialize, Deserialize};

use crate::train::epoch_stats::EpochStats;

/// Upper bound on passes for minimum-error training.
pub const DEFAULT_EPOCH_CEILING: usize = i32::MAX as usize;

/// When a training run stops.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingType {
    /// Exactly this many full passes over the dataset.
    Epochs(usize),
    /// Pass after pass until the mean per-entry error drops to this value.
    MinimumError(f64),
}

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `training`       : termination policy
/// - `epoch_ceiling`  : hard limit on passes for `MinimumError`; ignored by `Epochs`
/// - `progress_tx`    : optional channel sender; one `EpochStats` is sent per
///                      completed epoch. A dropped receiver does not stop training.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub training: TrainingType,
    pub epoch_ceiling: usize,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` with the default ceiling and no progress channel.
    pub fn new(training: TrainingType) -> Self {
        TrainConfig {
            training,
            epoch_ceiling: DEFAULT_EPOCH_CEILING,
            progress_tx: None,
        }
    }

    pub fn epochs(epochs: usize) -> Self {
        TrainConfig::new(TrainingType::Epochs(epochs))
    }

    pub fn minimum_error(minimum_error: f64) -> Self {
        TrainConfig::new(TrainingType::MinimumError(minimum_error))
    }

    pub fn with_ceiling(mut self, epoch_ceiling: usize) -> Self {
        self.epoch_ceiling = epoch_ceiling;
        self
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<EpochStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }
}
