//! Infrastructure layer for lattice
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod gateway;
pub mod records;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileBackendConfig, FileConfig, FileDataConfig,
    FileExecutionConfig, FileLoggingConfig, FileModelsConfig,
};
pub use gateway::OpenAiCompatibleGateway;
pub use records::JsonRecordStore;
