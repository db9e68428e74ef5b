use crate::activation::Sigmoid;
use crate::network::neuron::{Neuron, NeuronId};
use crate::network::synapse::{Synapse, SynapseId};
use crate::random::WeightInit;

/// Flat storage for every neuron and synapse of a network.
///
/// Neurons and synapses refer to each other through `NeuronId` / `SynapseId`
/// handles, so the cross-references never need shared ownership.
#[derive(Debug, Clone, Default)]
pub struct Arena {
    neurons: Vec<Neuron>,
    synapses: Vec<Synapse>,
}

impl Arena {
    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn synapses(&self) -> &[Synapse] {
        &self.synapses
    }

    pub fn neuron(&self, id: NeuronId) -> &Neuron {
        &self.neurons[id.0]
    }

    pub fn synapse(&self, id: SynapseId) -> &Synapse {
        &self.synapses[id.0]
    }

    pub(crate) fn neuron_mut(&mut self, id: NeuronId) -> &mut Neuron {
        &mut self.neurons[id.0]
    }

    pub(crate) fn insert(&mut self, neuron: Neuron) -> NeuronId {
        self.neurons.push(neuron);
        NeuronId(self.neurons.len() - 1)
    }

    /// Adds a bare neuron with a random bias.
    pub(crate) fn add_neuron(&mut self, init: &mut WeightInit) -> NeuronId {
        let neuron = Neuron::new(init);
        self.insert(neuron)
    }

    /// Adds a neuron fed by every neuron in `upstream`, one random-weight
    /// synapse each, in `upstream` order.
    pub(crate) fn add_connected_neuron(&mut self, upstream: &[NeuronId], init: &mut WeightInit) -> NeuronId {
        let id = self.add_neuron(init);
        for &from in upstream {
            let synapse_id = init.next_id();
            let weight = init.next_weight();
            self.link(Synapse::new(synapse_id, from, id, weight));
        }
        id
    }

    /// Stores `synapse` and registers it with both of its endpoints.
    pub(crate) fn link(&mut self, synapse: Synapse) -> SynapseId {
        let (from, to) = (synapse.input(), synapse.output());
        self.synapses.push(synapse);
        let handle = SynapseId(self.synapses.len() - 1);
        self.neurons[from.0].push_output(handle);
        self.neurons[to.0].push_input(handle);
        handle
    }

    /// Recomputes and returns the neuron's activation from its inbound values.
    pub fn calculate_value(&mut self, id: NeuronId) -> f64 {
        let net = self.neurons[id.0].net_input(&self.neurons, &self.synapses);
        let value = Sigmoid::output(net);
        self.neurons[id.0].value = value;
        value
    }

    /// Output neurons pass `Some(target)`; hidden neurons pass `None` and read
    /// the already-computed gradients of their downstream neurons.
    pub fn calculate_gradient(&mut self, id: NeuronId, target: Option<f64>) -> f64 {
        let neuron = &self.neurons[id.0];
        let error = match target {
            Some(target) => neuron.calculate_error(target),
            None => neuron.downstream_error(&self.neurons, &self.synapses),
        };
        let gradient = error * Sigmoid::derivative(neuron.value);
        self.neurons[id.0].gradient = gradient;
        gradient
    }

    /// Delta-rule step with momentum on the bias and every inbound weight.
    pub fn update_weights(&mut self, id: NeuronId, learn_rate: f64, momentum: f64) {
        let neuron = &mut self.neurons[id.0];
        let prev_delta = neuron.bias_delta;
        neuron.bias_delta = learn_rate * neuron.gradient;
        neuron.bias += neuron.bias_delta + momentum * prev_delta;

        let neuron = &self.neurons[id.0];
        let gradient = neuron.gradient;
        for &s in neuron.inputs() {
            let synapse = &mut self.synapses[s.0];
            let prev_delta = synapse.weight_delta;
            synapse.weight_delta = learn_rate * gradient * self.neurons[synapse.input().0].value;
            synapse.weight += synapse.weight_delta + momentum * prev_delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    /// Two inputs feeding one output with known weights.
    fn tiny_arena() -> (Arena, [NeuronId; 3]) {
        let mut arena = Arena::default();
        let a = arena.insert(Neuron::restored(Uuid::nil(), 0.0, 0.0, 0.0, 1.0));
        let b = arena.insert(Neuron::restored(Uuid::nil(), 0.0, 0.0, 0.0, 0.0));
        let out = arena.insert(Neuron::restored(Uuid::nil(), 0.5, 0.0, 0.0, 0.0));
        arena.link(Synapse::new(Uuid::nil(), a, out, 0.5));
        arena.link(Synapse::new(Uuid::nil(), b, out, -1.0));
        (arena, [a, b, out])
    }

    #[test]
    fn connected_neuron_is_wired_both_ways() {
        let mut init = WeightInit::seeded(11);
        let mut arena = Arena::default();
        let a = arena.add_neuron(&mut init);
        let b = arena.add_neuron(&mut init);
        let c = arena.add_connected_neuron(&[a, b], &mut init);

        assert_eq!(arena.neuron(c).inputs().len(), 2);
        assert_eq!(arena.neuron(a).outputs().len(), 1);
        assert_eq!(arena.neuron(b).outputs().len(), 1);
        let first = arena.synapse(arena.neuron(c).inputs()[0]);
        assert_eq!(first.input(), a);
        assert_eq!(first.output(), c);
    }

    #[test]
    fn value_is_sigmoid_of_net_input() {
        let (mut arena, [_, _, out]) = tiny_arena();
        let value = arena.calculate_value(out);
        assert_eq!(value, Sigmoid::output(0.5 * 1.0 + -1.0 * 0.0 + 0.5));
        assert_eq!(arena.neuron(out).value, value);
    }

    #[test]
    fn output_and_hidden_gradients() {
        let (mut arena, [a, _, out]) = tiny_arena();
        arena.neuron_mut(out).value = 0.8;
        let g = arena.calculate_gradient(out, Some(1.0));
        assert!((g - 0.2 * 0.8 * 0.2).abs() < 1e-15);

        arena.neuron_mut(a).value = 0.5;
        let h = arena.calculate_gradient(a, None);
        assert!((h - g * 0.5 * 0.25).abs() < 1e-15);
    }

    #[test]
    fn update_applies_momentum_from_previous_delta() {
        let (mut arena, [_, _, out]) = tiny_arena();
        arena.neuron_mut(out).gradient = 0.1;
        arena.neuron_mut(out).bias_delta = 0.2;

        arena.update_weights(out, 0.5, 0.9);

        let n = arena.neuron(out);
        assert!((n.bias_delta - 0.05).abs() < 1e-15);
        assert!((n.bias - (0.5 + 0.05 + 0.9 * 0.2)).abs() < 1e-15);

        let wa = arena.synapse(n.inputs()[0]);
        assert!((wa.weight_delta - 0.05).abs() < 1e-15);
        assert!((wa.weight - 0.55).abs() < 1e-15);
        // Upstream value 0.0 produces no step.
        let wb = arena.synapse(n.inputs()[1]);
        assert_eq!(wb.weight_delta, 0.0);
        assert_eq!(wb.weight, -1.0);
    }
}
