use backprop_nn::data::{load_datasets, save_datasets};
use backprop_nn::{DataSet, Network, NetworkError, NetworkRecord, NetworkSpec, TrainingType, WeightInit};
use rand::prelude::*;
use tempfile::tempdir;

fn trained_network() -> Network {
    let mut net = Network::new(3, &[4, 3], 2, None, None, &mut WeightInit::seeded(21)).unwrap();
    let data = vec![
        DataSet::new(vec![0.0, 1.0, 0.5], vec![1.0, 0.0]),
        DataSet::new(vec![1.0, 0.0, 0.25], vec![0.0, 1.0]),
        DataSet::new(vec![0.5, 0.5, 1.0], vec![1.0, 1.0]),
    ];
    net.train(&data, TrainingType::Epochs(300)).unwrap();
    net
}

#[test]
fn record_round_trip_reproduces_outputs() {
    let mut original = trained_network();
    let mut restored = Network::from_record(&original.to_record()).unwrap();

    assert_eq!(restored.learning_rate(), original.learning_rate());
    assert_eq!(restored.momentum(), original.momentum());
    assert_eq!(restored.synapses().len(), original.synapses().len());

    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..50 {
        let inputs: Vec<f64> = (0..3).map(|_| rng.gen_range(-2.0..2.0)).collect();
        assert_eq!(original.compute(&inputs).unwrap(), restored.compute(&inputs).unwrap());
    }
}

#[test]
fn restored_network_keeps_training_identically() {
    let mut original = trained_network();
    let mut restored = Network::from_record(&original.to_record()).unwrap();
    let data = vec![DataSet::new(vec![0.2, 0.4, 0.6], vec![0.0, 1.0])];

    original.train(&data, TrainingType::Epochs(20)).unwrap();
    restored.train(&data, TrainingType::Epochs(20)).unwrap();

    assert_eq!(original.to_record(), restored.to_record());
}

#[test]
fn json_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("network.json");
    let path = path.to_str().unwrap();

    let mut original = trained_network();
    original.save_json(path).unwrap();
    let mut loaded = Network::load_json(path).unwrap();

    assert_eq!(loaded.to_record(), original.to_record());
    let inputs = [0.1, 0.9, 0.3];
    assert_eq!(loaded.compute(&inputs).unwrap(), original.compute(&inputs).unwrap());
}

#[test]
fn malformed_file_is_an_import_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ \"LearningRate\": 0.4, ").unwrap();

    assert!(matches!(Network::load_json(path.to_str().unwrap()), Err(NetworkError::Json(_))));
    assert!(matches!(Network::load_json("/definitely/not/here.json"), Err(NetworkError::Io(_))));
}

#[test]
fn dangling_reference_in_file_is_rejected() {
    let mut record: NetworkRecord = trained_network().to_record();
    record.output_layer.pop();

    assert!(matches!(
        Network::from_record(&record),
        Err(NetworkError::DanglingSynapse { .. })
    ));
}

#[test]
fn datasets_round_trip_through_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");
    let path = path.to_str().unwrap();
    let data = vec![
        DataSet::new(vec![0.0, 1.0], vec![1.0]),
        DataSet::new(vec![1.0, 1.0], vec![0.0]),
    ];

    save_datasets(path, &data).unwrap();
    assert_eq!(load_datasets(path).unwrap(), data);
}

#[test]
fn spec_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("spec.json");
    let path = path.to_str().unwrap();
    let mut spec = NetworkSpec::new(4, vec![6, 3], 2);
    spec.momentum = Some(0.5);

    spec.save_json(path).unwrap();
    assert_eq!(NetworkSpec::load_json(path).unwrap(), spec);
}
