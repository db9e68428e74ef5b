use crate::{
    data::dataset::{DataSet, validate_all},
    error::Result,
    network::network::Network,
};

/// Runs one epoch (forward then backward for every entry, in order) and
/// returns the mean per-entry Σ|target - value|.
///
/// Every entry is validated before the first weight changes.
pub fn train_network(network: &mut Network, datasets: &[DataSet]) -> Result<f64> {
    validate_all(datasets, network)?;
    run_epoch(network, datasets)
}

/// Epoch body; `datasets` must already be validated and non-empty.
pub(crate) fn run_epoch(network: &mut Network, datasets: &[DataSet]) -> Result<f64> {
    let mut total_error = 0.0;

    for entry in datasets {
        network.forward_propagate(&entry.values)?;
        network.back_propagate(&entry.targets)?;
        // Back-propagation leaves values untouched, so this is the error of
        // this entry's own forward pass.
        total_error += network.calculate_error(&entry.targets)?;
    }

    Ok(total_error / datasets.len() as f64)
}
