pub mod dataset;

pub use dataset::{DataSet, load_datasets, save_datasets, validate_all};
