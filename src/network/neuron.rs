use uuid::Uuid;

use crate::network::synapse::{Synapse, SynapseId};
use crate::random::WeightInit;

/// Handle of a neuron inside its network's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NeuronId(pub(crate) usize);

impl NeuronId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A computational node. Synapses are referenced by handle; the arena that
/// owns both lives in `Network`.
#[derive(Debug, Clone)]
pub struct Neuron {
    pub id: Uuid,
    pub bias: f64,
    /// Last applied bias step, carried into the next update as momentum.
    pub bias_delta: f64,
    pub gradient: f64,
    pub value: f64,
    inputs: Vec<SynapseId>,
    outputs: Vec<SynapseId>,
    // Reserved flags; training never reads them.
    pub is_mirror: bool,
    pub is_canonical: bool,
}

impl Neuron {
    /// Fresh identity, no synapses, random bias in [-1, 1).
    pub fn new(init: &mut WeightInit) -> Neuron {
        let id = init.next_id();
        let bias = init.next_weight();
        Neuron::restored(id, bias, 0.0, 0.0, 0.0)
    }

    /// Rebuilds a neuron from stored state, with empty synapse lists.
    pub fn restored(id: Uuid, bias: f64, bias_delta: f64, gradient: f64, value: f64) -> Neuron {
        Neuron {
            id,
            bias,
            bias_delta,
            gradient,
            value,
            inputs: Vec::new(),
            outputs: Vec::new(),
            is_mirror: false,
            is_canonical: false,
        }
    }

    /// Inbound synapses, in creation order.
    pub fn inputs(&self) -> &[SynapseId] {
        &self.inputs
    }

    /// Outbound synapses, in creation order.
    pub fn outputs(&self) -> &[SynapseId] {
        &self.outputs
    }

    pub(crate) fn push_input(&mut self, synapse: SynapseId) {
        self.inputs.push(synapse);
    }

    pub(crate) fn push_output(&mut self, synapse: SynapseId) {
        self.outputs.push(synapse);
    }

    pub fn calculate_error(&self, target: f64) -> f64 {
        target - self.value
    }

    /// Σ weight · upstream value over inbound synapses, plus bias.
    pub fn net_input(&self, neurons: &[Neuron], synapses: &[Synapse]) -> f64 {
        let weighted: f64 = self.inputs.iter()
            .map(|s| {
                let synapse = &synapses[s.0];
                synapse.weight * neurons[synapse.input().0].value
            })
            .sum();
        weighted + self.bias
    }

    /// Σ downstream gradient · weight over outbound synapses.
    pub fn downstream_error(&self, neurons: &[Neuron], synapses: &[Synapse]) -> f64 {
        self.outputs.iter()
            .map(|s| {
                let synapse = &synapses[s.0];
                neurons[synapse.output().0].gradient * synapse.weight
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_neuron_has_no_synapses_and_bounded_bias() {
        let mut init = WeightInit::seeded(3);
        let n = Neuron::new(&mut init);
        assert!(n.inputs().is_empty());
        assert!(n.outputs().is_empty());
        assert!((-1.0..1.0).contains(&n.bias));
        assert_eq!(n.bias_delta, 0.0);
    }

    #[test]
    fn error_is_target_minus_value() {
        let mut n = Neuron::restored(Uuid::nil(), 0.0, 0.0, 0.0, 0.25);
        assert_eq!(n.calculate_error(1.0), 0.75);
        n.value = 0.9;
        assert!((n.calculate_error(0.0) + 0.9).abs() < 1e-15);
    }

    #[test]
    fn net_input_sums_weighted_upstream_values_and_bias() {
        let mut a = Neuron::restored(Uuid::nil(), 0.0, 0.0, 0.0, 0.5);
        let mut b = Neuron::restored(Uuid::nil(), 0.0, 0.0, 0.0, 2.0);
        let mut c = Neuron::restored(Uuid::nil(), 0.1, 0.0, 0.0, 0.0);
        let synapses = vec![
            Synapse::new(Uuid::nil(), NeuronId(0), NeuronId(2), 0.4),
            Synapse::new(Uuid::nil(), NeuronId(1), NeuronId(2), -0.25),
        ];
        a.push_output(SynapseId(0));
        b.push_output(SynapseId(1));
        c.push_input(SynapseId(0));
        c.push_input(SynapseId(1));
        c.gradient = 0.5;
        let neurons = vec![a, b, c];

        let net = neurons[2].net_input(&neurons, &synapses);
        assert!((net - (0.4 * 0.5 - 0.25 * 2.0 + 0.1)).abs() < 1e-15);

        assert_eq!(neurons[0].downstream_error(&neurons, &synapses), 0.5 * 0.4);
        assert_eq!(neurons[1].downstream_error(&neurons, &synapses), 0.5 * -0.25);
    }
}
