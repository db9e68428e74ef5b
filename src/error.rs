use uuid::Uuid;

/// Errors produced while building, training or (de)serializing a network.
#[derive(thiserror::Error, Debug)]
pub enum NetworkError {
    #[error("at least one hidden layer size is required")]
    NoHiddenLayers,

    #[error("{layer} layer must contain at least one neuron")]
    EmptyLayer { layer: String },

    #[error("invalid {name}: {value}")]
    InvalidHyperparameter { name: &'static str, value: f64 },

    #[error("expected {expected} input values, got {actual}")]
    InputSizeMismatch { expected: usize, actual: usize },

    #[error("expected {expected} target values, got {actual}")]
    TargetSizeMismatch { expected: usize, actual: usize },

    #[error("dataset must contain at least one entry")]
    EmptyDataset,

    #[error("dataset entry {index} does not fit the network: {source}")]
    DatasetShape {
        index: usize,
        #[source]
        source: Box<NetworkError>,
    },

    #[error("neuron id {0} appears more than once")]
    DuplicateNeuron(Uuid),

    #[error("synapse {synapse} references unknown neuron {neuron}")]
    DanglingSynapse { synapse: Uuid, neuron: Uuid },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NetworkError>;
