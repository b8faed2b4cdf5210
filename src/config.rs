//! Configuration module for rustible-route53
//!
//! Handles loading and merging configuration from multiple sources:
//! - Default values
//! - `RUSTIBLE_ROUTE53_CONFIG`
//! - System configuration (/etc/rustible/route53.toml)
//! - User configuration (~/.rustible/route53.toml)
//! - Project configuration (./rustible-route53.toml)
//! - Environment variables
//!
//! Later sources win. Command-line flags are applied on top by the binary.

use crate::error::{Error, Result};
use crate::modules::cloud::aws::AwsConnectionConfig;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Connection defaults for AWS modules
    pub aws: AwsConnectionConfig,

    /// Result output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// How module results are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Ansible-style JSON result
    #[default]
    Json,
    /// YAML result
    Yaml,
    /// Colored summary for terminals
    Human,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "human" => Ok(OutputFormat::Human),
            _ => Err(Error::Configuration(format!(
                "Invalid output format '{}'. Valid formats: json, yaml, human",
                s
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Human => write!(f, "human"),
        }
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Result format
    pub format: OutputFormat,

    /// Pretty-print JSON results
    pub pretty: bool,

    /// Colored human output
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
            color: true,
        }
    }
}

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `-v` is not given (e.g. `info`)
    pub level: Option<String>,

    /// Log format
    pub format: LogFormat,
}

impl Config {
    /// Load configuration from all sources
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Config::default();

        for path in Self::config_paths(config_path) {
            if path.exists() {
                tracing::debug!(path = %path.display(), "Loading config file");
                config = config.merge_from_file(&path)?;
            } else if config_path == Some(&path) {
                return Err(Error::ConfigLoad {
                    path,
                    message: "file does not exist".to_string(),
                });
            }
        }

        config.apply_env_overrides();

        Ok(config)
    }

    /// Candidate config files, lowest priority first
    pub fn config_paths(explicit_path: Option<&PathBuf>) -> Vec<PathBuf> {
        // Explicit path replaces the search
        if let Some(path) = explicit_path {
            return vec![path.clone()];
        }

        let mut paths = Vec::new();

        if let Ok(env_config) = std::env::var("RUSTIBLE_ROUTE53_CONFIG") {
            paths.push(PathBuf::from(env_config));
        }

        paths.push(PathBuf::from("/etc/rustible/route53.toml"));

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".rustible/route53.toml"));
        }

        paths.push(PathBuf::from("rustible-route53.toml"));

        paths
    }

    fn merge_from_file(&self, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let parsed: std::result::Result<Config, String> = match extension {
            "yml" | "yaml" => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
            "json" => serde_json::from_str(&content).map_err(|e| e.to_string()),
            "toml" => toml::from_str(&content).map_err(|e| e.to_string()),
            _ => toml::from_str(&content)
                .or_else(|_| serde_yaml::from_str(&content))
                .map_err(|e| e.to_string()),
        };

        let file_config = parsed.map_err(|message| Error::ConfigLoad {
            path: path.to_path_buf(),
            message,
        })?;

        Ok(self.merge(file_config))
    }

    /// Merge another config into this one; set values in `other` win
    fn merge(&self, other: Config) -> Config {
        let defaults = OutputConfig::default();
        Config {
            aws: other.aws.or(&self.aws),
            output: OutputConfig {
                format: if other.output.format != defaults.format {
                    other.output.format
                } else {
                    self.output.format
                },
                pretty: if other.output.pretty != defaults.pretty {
                    other.output.pretty
                } else {
                    self.output.pretty
                },
                color: if other.output.color != defaults.color {
                    other.output.color
                } else {
                    self.output.color
                },
            },
            logging: LoggingConfig {
                level: other.logging.level.or_else(|| self.logging.level.clone()),
                format: if other.logging.format != LogFormat::default() {
                    other.logging.format
                } else {
                    self.logging.format
                },
            },
        }
    }

    fn apply_env_overrides(&mut self) {
        // RUSTIBLE_ROUTE53_REGION
        if let Ok(region) = std::env::var("RUSTIBLE_ROUTE53_REGION") {
            self.aws.region = Some(region);
        }

        // RUSTIBLE_ROUTE53_PROFILE
        if let Ok(profile) = std::env::var("RUSTIBLE_ROUTE53_PROFILE") {
            self.aws.profile = Some(profile);
        }

        // RUSTIBLE_ROUTE53_ENDPOINT_URL
        if let Ok(url) = std::env::var("RUSTIBLE_ROUTE53_ENDPOINT_URL") {
            self.aws.endpoint_url = Some(url);
        }

        // RUSTIBLE_ROUTE53_OUTPUT
        if let Ok(format) = std::env::var("RUSTIBLE_ROUTE53_OUTPUT") {
            match format.parse() {
                Ok(format) => self.output.format = format,
                Err(e) => tracing::warn!("Ignoring RUSTIBLE_ROUTE53_OUTPUT: {}", e),
            }
        }

        // NO_COLOR
        if std::env::var("NO_COLOR").is_ok() {
            self.output.color = false;
        }
    }

    /// AWS connection defaults after config and environment
    pub fn connection(&self) -> &AwsConnectionConfig {
        &self.aws
    }
}
