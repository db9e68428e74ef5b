use tracing::debug;

use crate::data::dataset::DataSet;
use crate::error::{NetworkError, Result};
use crate::network::arena::Arena;
use crate::network::neuron::{Neuron, NeuronId};
use crate::network::spec::NetworkSpec;
use crate::network::synapse::{Synapse, SynapseId};
use crate::random::WeightInit;
use crate::train::{train_loop, TrainConfig, TrainOutcome, TrainingType};

pub const DEFAULT_LEARNING_RATE: f64 = 0.434;
pub const DEFAULT_MOMENTUM: f64 = 0.912;

/// A stack of fully-connected sigmoid layers trained by back-propagation.
///
/// `Network::default()` is an empty shell (no layers, zero learning rate and
/// momentum) meant to be filled from a persisted record.
#[derive(Debug, Clone, Default)]
pub struct Network {
    learning_rate: f64,
    momentum: f64,
    pub(crate) arena: Arena,
    pub(crate) input_layer: Vec<NeuronId>,
    pub(crate) hidden_layers: Vec<Vec<NeuronId>>,
    pub(crate) output_layer: Vec<NeuronId>,
}

impl Network {
    /// Builds and wires a network. `learn_rate` and `momentum` default to
    /// 0.434 and 0.912.
    pub fn new(
        input_size: usize,
        hidden_sizes: &[usize],
        output_size: usize,
        learn_rate: Option<f64>,
        momentum: Option<f64>,
        init: &mut WeightInit,
    ) -> Result<Network> {
        let learning_rate = learn_rate.unwrap_or(DEFAULT_LEARNING_RATE);
        let momentum = momentum.unwrap_or(DEFAULT_MOMENTUM);
        validate_hyperparameters(learning_rate, momentum)?;
        validate_topology(input_size, hidden_sizes, output_size)?;

        let mut arena = Arena::default();

        let input_layer: Vec<NeuronId> = (0..input_size)
            .map(|_| arena.add_neuron(init))
            .collect();

        let mut hidden_layers: Vec<Vec<NeuronId>> = Vec::with_capacity(hidden_sizes.len());
        for &size in hidden_sizes {
            let upstream = hidden_layers.last().unwrap_or(&input_layer).clone();
            let layer = (0..size)
                .map(|_| arena.add_connected_neuron(&upstream, init))
                .collect();
            hidden_layers.push(layer);
        }

        let last_hidden = hidden_layers.last().cloned().unwrap_or_default();
        let output_layer = (0..output_size)
            .map(|_| arena.add_connected_neuron(&last_hidden, init))
            .collect();

        let network = Network {
            learning_rate,
            momentum,
            arena,
            input_layer,
            hidden_layers,
            output_layer,
        };
        debug!(
            input = input_size,
            hidden = ?hidden_sizes,
            output = output_size,
            synapses = network.arena.synapses().len(),
            "network wired"
        );
        Ok(network)
    }

    /// Builds a network from a serializable spec.
    pub fn from_spec(spec: &NetworkSpec, init: &mut WeightInit) -> Result<Network> {
        Network::new(
            spec.input_size,
            &spec.hidden_sizes,
            spec.output_size,
            spec.learning_rate,
            spec.momentum,
            init,
        )
    }

    /// Assembles a network from already-linked parts. Used when restoring a
    /// persisted record.
    pub(crate) fn from_parts(
        learning_rate: f64,
        momentum: f64,
        arena: Arena,
        input_layer: Vec<NeuronId>,
        hidden_layers: Vec<Vec<NeuronId>>,
        output_layer: Vec<NeuronId>,
    ) -> Network {
        Network { learning_rate, momentum, arena, input_layer, hidden_layers, output_layer }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    /// Replaces both hyper-parameters; rejects values outside
    /// learning rate [0, 1] and momentum [0, 1).
    pub fn set_hyperparameters(&mut self, learning_rate: f64, momentum: f64) -> Result<()> {
        validate_hyperparameters(learning_rate, momentum)?;
        self.learning_rate = learning_rate;
        self.momentum = momentum;
        Ok(())
    }

    pub fn input_layer(&self) -> &[NeuronId] {
        &self.input_layer
    }

    pub fn hidden_layers(&self) -> &[Vec<NeuronId>] {
        &self.hidden_layers
    }

    pub fn output_layer(&self) -> &[NeuronId] {
        &self.output_layer
    }

    pub fn input_size(&self) -> usize {
        self.input_layer.len()
    }

    pub fn output_size(&self) -> usize {
        self.output_layer.len()
    }

    /// # Panics
    /// If `id` was not handed out by this network. `get_neuron` is the
    /// non-panicking form.
    pub fn neuron(&self, id: NeuronId) -> &Neuron {
        self.arena.neuron(id)
    }

    /// # Panics
    /// If `id` was not handed out by this network. `get_synapse` is the
    /// non-panicking form.
    pub fn synapse(&self, id: SynapseId) -> &Synapse {
        self.arena.synapse(id)
    }

    pub fn get_neuron(&self, id: NeuronId) -> Option<&Neuron> {
        self.arena.neurons().get(id.0)
    }

    pub fn get_synapse(&self, id: SynapseId) -> Option<&Synapse> {
        self.arena.synapses().get(id.0)
    }

    pub fn neurons(&self) -> &[Neuron] {
        self.arena.neurons()
    }

    pub fn synapses(&self) -> &[Synapse] {
        self.arena.synapses()
    }

    /// Loads `inputs` into the input layer, then computes hidden layers first
    /// to last, then the output layer.
    pub fn forward_propagate(&mut self, inputs: &[f64]) -> Result<()> {
        self.check_inputs(inputs)?;
        for (&id, &x) in self.input_layer.iter().zip(inputs) {
            self.arena.neuron_mut(id).value = x;
        }
        for layer in &self.hidden_layers {
            for &id in layer {
                self.arena.calculate_value(id);
            }
        }
        for &id in &self.output_layer {
            self.arena.calculate_value(id);
        }
        Ok(())
    }

    /// Computes every gradient (output layer, then hidden layers last to
    /// first) and only then updates weights, hidden layers first to last and
    /// the output layer at the end.
    pub fn back_propagate(&mut self, targets: &[f64]) -> Result<()> {
        self.check_targets(targets)?;
        for (&id, &t) in self.output_layer.iter().zip(targets) {
            self.arena.calculate_gradient(id, Some(t));
        }
        for layer in self.hidden_layers.iter().rev() {
            for &id in layer {
                self.arena.calculate_gradient(id, None);
            }
        }

        let (lr, momentum) = (self.learning_rate, self.momentum);
        for layer in &self.hidden_layers {
            for &id in layer {
                self.arena.update_weights(id, lr, momentum);
            }
        }
        for &id in &self.output_layer {
            self.arena.update_weights(id, lr, momentum);
        }
        Ok(())
    }

    /// Trains on `datasets` with the default epoch ceiling and no progress
    /// channel. See `train_loop` for the termination rules.
    pub fn train(&mut self, datasets: &[DataSet], training: TrainingType) -> Result<TrainOutcome> {
        train_loop(self, datasets, &TrainConfig::new(training))
    }

    /// Forward pass only; returns the output activations in layer order.
    pub fn compute(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        self.forward_propagate(inputs)?;
        Ok(self.output_values())
    }

    pub fn output_values(&self) -> Vec<f64> {
        self.output_layer.iter()
            .map(|&id| self.arena.neuron(id).value)
            .collect()
    }

    /// Σ |target - value| over the output layer, using the current values.
    pub fn calculate_error(&self, targets: &[f64]) -> Result<f64> {
        self.check_targets(targets)?;
        Ok(crate::loss::AbsoluteError::loss(&self.output_values(), targets))
    }

    pub(crate) fn check_inputs(&self, inputs: &[f64]) -> Result<()> {
        if inputs.len() != self.input_layer.len() {
            return Err(NetworkError::InputSizeMismatch {
                expected: self.input_layer.len(),
                actual: inputs.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn check_targets(&self, targets: &[f64]) -> Result<()> {
        if targets.len() != self.output_layer.len() {
            return Err(NetworkError::TargetSizeMismatch {
                expected: self.output_layer.len(),
                actual: targets.len(),
            });
        }
        Ok(())
    }
}

fn validate_hyperparameters(learning_rate: f64, momentum: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&learning_rate) {
        return Err(NetworkError::InvalidHyperparameter { name: "learning rate", value: learning_rate });
    }
    if !(0.0..1.0).contains(&momentum) {
        return Err(NetworkError::InvalidHyperparameter { name: "momentum", value: momentum });
    }
    Ok(())
}

fn validate_topology(input_size: usize, hidden_sizes: &[usize], output_size: usize) -> Result<()> {
    if hidden_sizes.is_empty() {
        return Err(NetworkError::NoHiddenLayers);
    }
    if input_size == 0 {
        return Err(NetworkError::EmptyLayer { layer: "input".into() });
    }
    if let Some(i) = hidden_sizes.iter().position(|&size| size == 0) {
        return Err(NetworkError::EmptyLayer { layer: format!("hidden {i}") });
    }
    if output_size == 0 {
        return Err(NetworkError::EmptyLayer { layer: "output".into() });
    }
    Ok(())
}
