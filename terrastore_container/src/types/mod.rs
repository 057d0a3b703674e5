mod config;

pub use config::{DuplicatePolicy, SerializerConfig, StoreOptions};
