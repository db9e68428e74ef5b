pub mod trainer;
pub mod epoch_stats;
pub mod train_config;
pub mod loop_fn;

pub use trainer::train_network;
pub use epoch_stats::{EpochStats, TrainOutcome};
pub use train_config::{TrainConfig, TrainingType, DEFAULT_EPOCH_CEILING};
pub use loop_fn::train_loop;
