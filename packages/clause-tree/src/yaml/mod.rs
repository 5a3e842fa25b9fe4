//! YAML output of records and chunks.

mod writer;

pub use writer::{chunks_to_yaml, records_to_yaml, save_yaml};
