use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

const CONFIG_FILE: &str = ".typegraph.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub thresholds: Thresholds,
}

#[derive(Debug, Clone)]
pub struct Thresholds {
    /// Fan-in at or above this count is reported as an issue.
    pub high_fan_in: usize,
    /// Fan-out at or above this count is reported as an issue.
    pub high_fan_out: usize,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    thresholds: Option<RawThresholds>,
}

#[derive(Debug, Deserialize)]
struct RawThresholds {
    high_fan_in: Option<usize>,
    high_fan_out: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            high_fan_in: 5,
            high_fan_out: 10,
        }
    }
}

impl Config {
    /// Load `.typegraph.toml` from the project root, falling back to
    /// defaults when the file is absent.
    pub fn load(project_path: &Path) -> Result<Self, ConfigError> {
        let config_path = project_path.join(CONFIG_FILE);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;

        let thresholds = match raw.thresholds {
            Some(t) => Thresholds {
                high_fan_in: t.high_fan_in.unwrap_or(5),
                high_fan_out: t.high_fan_out.unwrap_or(10),
            },
            None => Thresholds::default(),
        };

        Ok(Self { thresholds })
    }
}
