//! Configuration: file schema and multi-source loader.

pub mod file_config;
pub mod loader;

pub use file_config::{
    ConfigError, FileConfig, FileEndpointConfig, FileGenerationConfig, FileLinkerConfig,
    FilePipelineConfig,
};
pub use loader::ConfigLoader;
