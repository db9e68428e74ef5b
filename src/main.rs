//! Trains a network on a JSON dataset file and exports the trained network.
//!
//! e.g. `backprop-nn xor.json 3 --min-error 0.01 --out xor-net.json`

use std::process::ExitCode;

use anyhow::{Context, Result};
use backprop_nn::{data, DataSet, Network, NetworkError, TrainConfig, TrainingType, WeightInit};
use clap::{ArgGroup, Parser};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_MIN_ERROR: f64 = 0.01;

#[derive(Parser, Debug)]
#[command(name = "backprop-nn")]
#[command(version)]
#[command(about = "Train a feed-forward sigmoid network by back-propagation")]
#[command(group(ArgGroup::new("training").args(["epochs", "min_error"])))]
struct Args {
    /// JSON array of `{ "Values": [...], "Targets": [...] }` entries
    datasets: String,

    /// Hidden layer sizes, input side first (e.g. `4,3`)
    #[arg(value_delimiter = ',', required = true)]
    hidden_sizes: Vec<usize>,

    /// Train for exactly this many epochs
    #[arg(long)]
    epochs: Option<usize>,

    /// Train until the mean error drops to this value (default 0.01)
    #[arg(long)]
    min_error: Option<f64>,

    /// Export the trained network to this JSON file
    #[arg(short, long)]
    out: Option<String>,

    /// Seed for the weight initializer
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn training(&self) -> TrainingType {
        match (self.epochs, self.min_error) {
            (Some(epochs), _) => TrainingType::Epochs(epochs),
            (None, min_error) => TrainingType::MinimumError(min_error.unwrap_or(DEFAULT_MIN_ERROR)),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let datasets = data::load_datasets(&args.datasets)
        .with_context(|| format!("could not import datasets from {}", args.datasets))?;
    let first = datasets.first().ok_or(NetworkError::EmptyDataset)?;

    let mut init = WeightInit::new(args.seed);
    let mut network = Network::new(
        first.values.len(),
        &args.hidden_sizes,
        first.targets.len(),
        None,
        None,
        &mut init,
    )
    .context("could not build network")?;

    let training = args.training();
    info!(entries = datasets.len(), hidden_sizes = ?args.hidden_sizes, ?training, "training");
    let outcome = backprop_nn::train_loop(&mut network, &datasets, &TrainConfig::new(training))
        .context("training failed")?;
    info!(epochs = outcome.epochs, mean_error = ?outcome.mean_error, "done");

    report(&mut network, &datasets)?;

    if let Some(out) = &args.out {
        network.save_json(out)
            .with_context(|| format!("could not export network to {out}"))?;
        info!(path = %out, "network exported");
    }
    Ok(())
}

fn report(network: &mut Network, datasets: &[DataSet]) -> Result<()> {
    for entry in datasets {
        let output = network.compute(&entry.values)?;
        println!("{:?} -> {:.4?} (target {:?})", entry.values, output, entry.targets);
    }
    Ok(())
}
