//! Configuration file loading for lattice
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `LATTICE_*` (nested keys separated by `__`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./lattice.toml` or `./.lattice.toml`
//! 4. Global: `$XDG_CONFIG_HOME/lattice/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileBackendConfig, FileConfig, FileDataConfig, FileExecutionConfig,
    FileLoggingConfig, FileModelsConfig,
};
pub use loader::ConfigLoader;
