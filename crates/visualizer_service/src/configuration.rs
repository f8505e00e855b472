// =============================================================================
// Quantum State Visualizer - Service Configuration
// =============================================================================
// Table of Contents:
//   1. ServiceConfiguration - Bind address, body limit, logging, tolerances
//   2. CommandLineArguments - clap flags that override the file
//   3. Loading and validation
// =============================================================================
// Purpose: Settings come from built-in defaults, then an optional TOML file,
//          then command-line flags. Later sources win.
// =============================================================================

use bloch_engine::configuration::{
    MAXIMUM_CONSISTENCY_TOLERANCE, MINIMUM_CONSISTENCY_TOLERANCE, NumericalTolerances,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_MAXIMUM_REQUEST_BYTES: u64 = 64 * 1024;
pub const DEFAULT_LOG_FILTER: &str = "info";

// =============================================================================
// 1. ServiceConfiguration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfiguration {
    pub bind_address: SocketAddr,
    pub maximum_request_bytes: u64,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub tolerances: NumericalTolerances,
}

impl Default for ServiceConfiguration {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 5000)),
            maximum_request_bytes: DEFAULT_MAXIMUM_REQUEST_BYTES,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            tolerances: NumericalTolerances::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(
        "consistency_tolerance must lie in [{minimum:e}, {maximum:e}], got {0:e}",
        minimum = MINIMUM_CONSISTENCY_TOLERANCE,
        maximum = MAXIMUM_CONSISTENCY_TOLERANCE
    )]
    InvalidTolerance(f64),

    #[error("maximum_request_bytes must be greater than zero")]
    ZeroRequestLimit,
}

// =============================================================================
// 2. CommandLineArguments
// =============================================================================

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "visualizer_service", version, about = "Quantum State Visualizer API")]
pub struct CommandLineArguments {
    /// TOML configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Socket address to listen on, e.g. 0.0.0.0:5000
    #[arg(long, value_name = "ADDRESS")]
    pub bind: Option<SocketAddr>,

    /// Default tracing filter directive
    #[arg(long, value_name = "DIRECTIVE")]
    pub log_filter: Option<String>,
}

// =============================================================================
// 3. Loading and validation
// =============================================================================

impl ServiceConfiguration {
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigurationError> {
        let configuration: Self = toml::from_str(text).map_err(|source| ConfigurationError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigurationError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    pub fn load(arguments: &CommandLineArguments) -> Result<Self, ConfigurationError> {
        let base = match &arguments.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_overrides(arguments))
    }

    pub fn with_overrides(mut self, arguments: &CommandLineArguments) -> Self {
        if let Some(bind) = arguments.bind {
            self.bind_address = bind;
        }
        if let Some(filter) = &arguments.log_filter {
            self.log_filter = filter.clone();
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.tolerances.is_valid() {
            return Err(ConfigurationError::InvalidTolerance(
                self.tolerances.consistency_tolerance,
            ));
        }
        if self.maximum_request_bytes == 0 {
            return Err(ConfigurationError::ZeroRequestLimit);
        }
        Ok(())
    }
}
