use uuid::Uuid;

use crate::network::neuron::NeuronId;

/// Handle of a synapse inside its network's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SynapseId(pub(crate) usize);

impl SynapseId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Directed weighted edge from `input` to `output`.
///
/// The endpoints are fixed at creation; only `weight` and `weight_delta`
/// change during training.
#[derive(Debug, Clone)]
pub struct Synapse {
    pub id: Uuid,
    input: NeuronId,
    output: NeuronId,
    pub weight: f64,
    /// Last applied weight step, carried into the next update as momentum.
    pub weight_delta: f64,
}

impl Synapse {
    pub fn new(id: Uuid, input: NeuronId, output: NeuronId, weight: f64) -> Synapse {
        Synapse { id, input, output, weight, weight_delta: 0.0 }
    }

    pub fn input(&self) -> NeuronId {
        self.input
    }

    pub fn output(&self) -> NeuronId {
        self.output
    }
}
