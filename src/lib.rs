pub mod error;
pub mod activation;
pub mod random;
pub mod network;
pub mod loss;
pub mod data;
pub mod train;

// Convenience re-exports
pub use error::{NetworkError, Result};
pub use activation::Sigmoid;
pub use random::WeightInit;
pub use network::{Network, NetworkRecord, NetworkSpec, Neuron, NeuronId, Synapse, SynapseId};
pub use loss::AbsoluteError;
pub use data::DataSet;
pub use train::{train_loop, train_network, EpochStats, TrainConfig, TrainOutcome, TrainingType};
