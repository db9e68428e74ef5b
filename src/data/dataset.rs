use serde::{Serialize, Deserialize};

use crate::error::{NetworkError, Result};
use crate::network::network::Network;

/// One training example: input `values` and the expected `targets`.
///
/// Field names match the PascalCase dataset files (`"Values"`, `"Targets"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataSet {
    pub values: Vec<f64>,
    pub targets: Vec<f64>,
}

impl DataSet {
    pub fn new(values: Vec<f64>, targets: Vec<f64>) -> Self {
        DataSet { values, targets }
    }

    /// Checks that both vectors line up with the network's input and output layers.
    pub fn validate_for(&self, network: &Network) -> Result<()> {
        network.check_inputs(&self.values)?;
        network.check_targets(&self.targets)
    }
}

/// Validates every entry against `network`, reporting the first misfit by index.
pub fn validate_all(datasets: &[DataSet], network: &Network) -> Result<()> {
    if datasets.is_empty() {
        return Err(NetworkError::EmptyDataset);
    }
    for (index, entry) in datasets.iter().enumerate() {
        entry.validate_for(network).map_err(|e| NetworkError::DatasetShape {
            index,
            source: Box::new(e),
        })?;
    }
    Ok(())
}

/// Reads a JSON array of datasets.
pub fn load_datasets(path: &str) -> Result<Vec<DataSet>> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

/// Writes datasets as a pretty-printed JSON array.
pub fn save_datasets(path: &str, datasets: &[DataSet]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, datasets)?;
    Ok(())
}
