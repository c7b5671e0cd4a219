use crate::{
    domain::{WorkflowConfig, DEFAULT_COLUMN_CAPACITY},
    error::{FlowboardError, Result},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings read from `.flowboard/config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowboardConfig {
    pub column_capacity: usize,
    pub enforce_column_capacity: bool,
    /// `tracing_subscriber::EnvFilter` directive, e.g. `"flowboard_core=debug"`
    pub log_filter: String,
}

impl Default for FlowboardConfig {
    fn default() -> Self {
        Self {
            column_capacity: DEFAULT_COLUMN_CAPACITY,
            enforce_column_capacity: false,
            log_filter: "info".to_string(),
        }
    }
}

impl FlowboardConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| FlowboardError::ConfigError(e.to_string()))?;
        if config.column_capacity == 0 {
            return Err(FlowboardError::ConfigError(
                "column_capacity must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    /// Loads the file at `path`, falling back to defaults when it does not exist
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| FlowboardError::ConfigError(e.to_string()))
    }

    pub fn workflow(&self) -> WorkflowConfig {
        WorkflowConfig {
            column_capacity: self.column_capacity,
            enforce_column_capacity: self.enforce_column_capacity,
        }
    }
}
