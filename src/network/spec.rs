use serde::{Serialize, Deserialize};

use crate::error::Result;

/// A serializable description of a network's topology and hyper-parameters.
///
/// `NetworkSpec` can be saved to / loaded from JSON independently of any
/// trained weights, so an architecture can be stored before training starts.
///
/// Fields:
/// - `input_size`    : neurons in the input layer
/// - `hidden_sizes`  : neuron count of each hidden layer, input side first
/// - `output_size`   : neurons in the output layer
/// - `learning_rate` : defaults to 0.434 when absent
/// - `momentum`      : defaults to 0.912 when absent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub input_size: usize,
    pub hidden_sizes: Vec<usize>,
    pub output_size: usize,
    #[serde(default)]
    pub learning_rate: Option<f64>,
    #[serde(default)]
    pub momentum: Option<f64>,
}

impl NetworkSpec {
    pub fn new(input_size: usize, hidden_sizes: Vec<usize>, output_size: usize) -> Self {
        NetworkSpec {
            input_size,
            hidden_sizes,
            output_size,
            learning_rate: None,
            momentum: None,
        }
    }

    /// Total synapse count of a network built from this spec.
    pub fn synapse_count(&self) -> usize {
        let mut sizes = Vec::with_capacity(self.hidden_sizes.len() + 2);
        sizes.push(self.input_size);
        sizes.extend_from_slice(&self.hidden_sizes);
        sizes.push(self.output_size);
        sizes.windows(2).map(|w| w[0] * w[1]).sum()
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
