//! Configuration management for the tremor stabilizer

use crate::{
    filters::{stabilizer::Stabilizer, PointerFilter},
    parameters::Parameters,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Stabilizer configuration
    pub stabilizer: StabilizerConfig,

    /// Output configuration
    pub output: OutputConfig,
}

/// Stabilizer parameters and initial state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilizerConfig {
    /// Number of recent samples averaged (1-20)
    pub history_capacity: usize,

    /// Tremor speed cutoff in hundredths of px/ms (1-20)
    pub tremor_threshold: u32,

    /// Start with stabilization enabled. On by default for batch replay;
    /// interactive front ends usually start with it off.
    pub enabled: bool,
}

/// Output line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Space separated values
    #[default]
    Plain,
    /// Comma separated values
    Csv,
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Line format
    pub format: OutputFormat,

    /// Prefix each line with the raw sample
    pub include_raw: bool,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        let params = Parameters::default();
        Self {
            history_capacity: params.history_capacity,
            tremor_threshold: params.tremor_threshold,
            enabled: true,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validated stabilizer parameters
    pub fn parameters(&self) -> Result<Parameters> {
        Parameters::new(self.stabilizer.history_capacity, self.stabilizer.tremor_threshold)
            .map_err(|e| Error::ConfigError(e.to_string()))
    }

    /// Create a filter from configuration
    pub fn create_filter(&self) -> Result<Box<dyn PointerFilter>> {
        Ok(Box::new(Stabilizer::with_parameters(self.parameters()?)))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.parameters().map(|_| ())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Tremor Stabilizer Configuration

# Stabilizer parameters
stabilizer:
  history_capacity: 5
  tremor_threshold: 5
  enabled: true

# Output settings
output:
  format: "plain"
  include_raw: false
"#;
