use backprop_nn::{DataSet, Network, TrainConfig, WeightInit, train_loop};

fn main() -> backprop_nn::Result<()> {
    tracing_subscriber::fmt::init();

    let mut init = WeightInit::seeded(2024);
    let mut network = Network::new(2, &[3], 1, None, None, &mut init)?;

    let datasets = vec![
        DataSet::new(vec![0.0, 0.0], vec![0.0]),
        DataSet::new(vec![0.0, 1.0], vec![1.0]),
        DataSet::new(vec![1.0, 0.0], vec![1.0]),
        DataSet::new(vec![1.0, 1.0], vec![0.0]),
    ];

    let (tx, rx) = std::sync::mpsc::channel();
    let config = TrainConfig::minimum_error(0.05)
        .with_ceiling(100_000)
        .with_progress(tx);
    let outcome = train_loop(&mut network, &datasets, &config)?;
    drop(config);

    for stats in rx.iter().filter(|s| s.epoch % 1000 == 0) {
        println!("Epoch {}: mean error = {:.6}", stats.epoch, stats.mean_error);
    }
    println!("Stopped after {} epochs (converged: {})", outcome.epochs, outcome.converged);

    for entry in &datasets {
        println!("Input: {:?} -> Output: {:.4}", entry.values, network.compute(&entry.values)?[0]);
    }
    Ok(())
}
