use serde::{Serialize, Deserialize};

/// Statistics for one completed epoch, sent on `TrainConfig::progress_tx`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Mean over entries of Σ|target - value|, each entry measured from its
    /// own forward pass inside the epoch.
    pub mean_error: f64,
    /// Wall-clock duration of this epoch in milliseconds.
    pub elapsed_ms: u64,
}

/// Result of a whole `train_loop` run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainOutcome {
    /// Number of epochs actually run.
    pub epochs: usize,
    /// Mean error of the last epoch; `None` when no epoch ran.
    pub mean_error: Option<f64>,
    /// Whether the error target was met. Always true for fixed-epoch runs.
    pub converged: bool,
}
