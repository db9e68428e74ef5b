use std::collections::HashMap;

use serde::{Serialize, Deserialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{NetworkError, Result};
use crate::network::arena::Arena;
use crate::network::network::Network;
use crate::network::neuron::{Neuron, NeuronId};
use crate::network::synapse::Synapse;

/// Stored state of one neuron. Synapse lists are rebuilt from
/// `NetworkRecord::synapses`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NeuronRecord {
    pub id: Uuid,
    pub bias: f64,
    pub bias_delta: f64,
    pub gradient: f64,
    pub value: f64,
}

/// Stored state of one synapse; endpoints are neuron ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SynapseRecord {
    pub id: Uuid,
    pub output_neuron_id: Uuid,
    pub input_neuron_id: Uuid,
    pub weight: f64,
    pub weight_delta: f64,
}

/// Flat, id-linked form of a whole network, as written to disk.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkRecord {
    pub learning_rate: f64,
    pub momentum: f64,
    pub input_layer: Vec<NeuronRecord>,
    pub hidden_layers: Vec<Vec<NeuronRecord>>,
    pub output_layer: Vec<NeuronRecord>,
    pub synapses: Vec<SynapseRecord>,
}

impl From<&Neuron> for NeuronRecord {
    fn from(n: &Neuron) -> Self {
        NeuronRecord {
            id: n.id,
            bias: n.bias,
            bias_delta: n.bias_delta,
            gradient: n.gradient,
            value: n.value,
        }
    }
}

impl Network {
    /// Captures the network's full state.
    ///
    /// Synapses are emitted grouped by output neuron, in layer order, each
    /// group in inbound order, so `from_record` restores every synapse list in
    /// its original order.
    pub fn to_record(&self) -> NetworkRecord {
        let layer = |ids: &[NeuronId]| -> Vec<NeuronRecord> {
            ids.iter().map(|&id| NeuronRecord::from(self.neuron(id))).collect()
        };

        let synapses = self.layers()
            .flat_map(|ids| ids.iter())
            .flat_map(|&id| self.neuron(id).inputs().iter())
            .map(|&s| {
                let synapse = self.synapse(s);
                SynapseRecord {
                    id: synapse.id,
                    output_neuron_id: self.neuron(synapse.output()).id,
                    input_neuron_id: self.neuron(synapse.input()).id,
                    weight: synapse.weight,
                    weight_delta: synapse.weight_delta,
                }
            })
            .collect();

        NetworkRecord {
            learning_rate: self.learning_rate(),
            momentum: self.momentum(),
            input_layer: layer(self.input_layer.as_slice()),
            hidden_layers: self.hidden_layers.iter().map(|l| layer(l.as_slice())).collect(),
            output_layer: layer(self.output_layer.as_slice()),
            synapses,
        }
    }

    /// Rebuilds a network from its record, resolving synapse endpoints by id.
    ///
    /// Fails on a repeated neuron id or on a synapse naming an unknown neuron;
    /// nothing is returned in that case.
    pub fn from_record(record: &NetworkRecord) -> Result<Network> {
        let mut arena = Arena::default();
        let mut by_id: HashMap<Uuid, NeuronId> = HashMap::new();

        let mut restore = |records: &[NeuronRecord], arena: &mut Arena| -> Result<Vec<NeuronId>> {
            records.iter()
                .map(|r| {
                    let id = arena.insert(Neuron::restored(r.id, r.bias, r.bias_delta, r.gradient, r.value));
                    if by_id.insert(r.id, id).is_some() {
                        return Err(NetworkError::DuplicateNeuron(r.id));
                    }
                    Ok(id)
                })
                .collect()
        };

        let input_layer = restore(record.input_layer.as_slice(), &mut arena)?;
        let hidden_layers = record.hidden_layers.iter()
            .map(|l| restore(l.as_slice(), &mut arena))
            .collect::<Result<Vec<_>>>()?;
        let output_layer = restore(record.output_layer.as_slice(), &mut arena)?;

        for s in &record.synapses {
            let resolve = |neuron: Uuid| {
                by_id.get(&neuron)
                    .copied()
                    .ok_or(NetworkError::DanglingSynapse { synapse: s.id, neuron })
            };
            let input = resolve(s.input_neuron_id)?;
            let output = resolve(s.output_neuron_id)?;
            let mut synapse = Synapse::new(s.id, input, output, s.weight);
            synapse.weight_delta = s.weight_delta;
            arena.link(synapse);
        }

        debug!(
            neurons = arena.neurons().len(),
            synapses = arena.synapses().len(),
            hidden_layers = hidden_layers.len(),
            "network restored from record"
        );

        Ok(Network::from_parts(
            record.learning_rate,
            record.momentum,
            arena,
            input_layer,
            hidden_layers,
            output_layer,
        ))
    }

    /// Serializes the network to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.to_record())?;
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json(path: &str) -> Result<Network> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let record: NetworkRecord = serde_json::from_reader(reader)?;
        Network::from_record(&record)
    }

    /// Input layer, hidden layers in order, then the output layer.
    fn layers(&self) -> impl Iterator<Item = &[NeuronId]> {
        std::iter::once(self.input_layer.as_slice())
            .chain(self.hidden_layers.iter().map(|l| l.as_slice()))
            .chain(std::iter::once(self.output_layer.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neuron(id: u128) -> NeuronRecord {
        NeuronRecord { id: Uuid::from_u128(id), bias: 0.1, bias_delta: 0.0, gradient: 0.0, value: 0.0 }
    }

    fn synapse(id: u128, from: u128, to: u128) -> SynapseRecord {
        SynapseRecord {
            id: Uuid::from_u128(id),
            output_neuron_id: Uuid::from_u128(to),
            input_neuron_id: Uuid::from_u128(from),
            weight: 0.5,
            weight_delta: 0.01,
        }
    }

    fn record() -> NetworkRecord {
        NetworkRecord {
            learning_rate: 0.3,
            momentum: 0.6,
            input_layer: vec![neuron(1)],
            hidden_layers: vec![vec![neuron(2)]],
            output_layer: vec![neuron(3)],
            synapses: vec![synapse(10, 1, 2), synapse(11, 2, 3)],
        }
    }

    #[test]
    fn restores_links_from_ids() {
        let net = Network::from_record(&record()).unwrap();
        assert_eq!(net.learning_rate(), 0.3);
        assert_eq!(net.momentum(), 0.6);
        let hidden = net.hidden_layers()[0][0];
        assert_eq!(net.neuron(hidden).inputs().len(), 1);
        assert_eq!(net.neuron(hidden).outputs().len(), 1);
        let s = net.synapse(net.neuron(hidden).inputs()[0]);
        assert_eq!(net.neuron(s.input()).id, Uuid::from_u128(1));
        assert_eq!(s.weight_delta, 0.01);
        assert_eq!(net.to_record(), record());
    }

    #[test]
    fn dangling_synapse_is_rejected() {
        let mut rec = record();
        rec.synapses.push(synapse(12, 2, 99));
        match Network::from_record(&rec) {
            Err(NetworkError::DanglingSynapse { synapse, neuron }) => {
                assert_eq!(synapse, Uuid::from_u128(12));
                assert_eq!(neuron, Uuid::from_u128(99));
            }
            other => panic!("expected dangling synapse error, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_neuron_is_rejected() {
        let mut rec = record();
        rec.output_layer.push(neuron(2));
        assert!(matches!(
            Network::from_record(&rec),
            Err(NetworkError::DuplicateNeuron(id)) if id == Uuid::from_u128(2)
        ));
    }

    #[test]
    fn json_uses_pascal_case_fields() {
        let json = serde_json::to_value(record()).unwrap();
        assert!(json.get("LearningRate").is_some());
        assert!(json["Synapses"][0].get("InputNeuronId").is_some());
        assert!(json["InputLayer"][0].get("BiasDelta").is_some());
    }
}
