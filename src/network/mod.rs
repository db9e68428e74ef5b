pub(crate) mod arena;
pub mod network;
pub mod neuron;
pub mod persisted;
pub mod spec;
pub mod synapse;

pub use network::Network;
pub use neuron::{Neuron, NeuronId};
pub use persisted::{NetworkRecord, NeuronRecord, SynapseRecord};
pub use spec::NetworkSpec;
pub use synapse::{Synapse, SynapseId};
