use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::campaign::labels::{Industry, Language, Region};
use crate::pipeline::PipelineConfig;
use crate::providers::ollama::OllamaGenerator;
use crate::providers::TextGenerator;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Text generator settings
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Defaults for campaign requests
    #[serde(default)]
    pub campaign: CampaignDefaults,

    /// History persistence
    #[serde(default)]
    pub history: HistoryConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Text generator provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorProvider {
    // @provider: Ollama
    #[default]
    Ollama,
}

impl GeneratorProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Ollama => "Ollama",
        }
    }
}

impl std::fmt::Display for GeneratorProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for GeneratorProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Text generator configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Provider to use
    #[serde(default)]
    pub provider: GeneratorProvider,

    /// Model name used for every stage
    #[serde(default = "default_model")]
    pub model: String,

    /// Service endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Bound on each generation call, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Sampling temperature (0.0 to 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Transport-level retries per call (0 disables retrying)
    #[serde(default)]
    pub max_retries: u32,

    /// Base backoff between retries in milliseconds, doubled on each retry
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            provider: GeneratorProvider::default(),
            model: default_model(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            temperature: default_temperature(),
            max_retries: 0,
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

impl GeneratorConfig {
    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Worst-case time for one generate call: every attempt times out and
    /// every retry waits its full backoff
    pub fn call_budget(&self) -> Duration {
        let attempts = self.max_retries.saturating_add(1);
        let requests = self.timeout().saturating_mul(attempts);
        // waits double up to 2^16 times the base, then stay flat
        let doubling = u64::from(self.max_retries.min(17));
        let flat = u64::from(self.max_retries.saturating_sub(17));
        let units = ((1u64 << doubling) - 1).saturating_add(flat.saturating_mul(1 << 16));
        let backoff_ms = self.retry_backoff_ms.saturating_mul(units);
        requests.saturating_add(Duration::from_millis(backoff_ms))
    }
}

/// Default labels used when the CLI does not specify them
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct CampaignDefaults {
    #[serde(default = "default_language")]
    pub target_language: Language,

    #[serde(default = "default_region")]
    pub target_region: Region,

    #[serde(default)]
    pub industry: Industry,
}

impl Default for CampaignDefaults {
    fn default() -> Self {
        Self {
            target_language: default_language(),
            target_region: default_region(),
            industry: Industry::default(),
        }
    }
}

/// History persistence configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HistoryConfig {
    /// Whether processed campaigns are saved
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Database file; the platform data directory is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            database_path: None,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_model() -> String {
    crate::providers::DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    crate::providers::ollama::DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_temperature() -> f32 {
    crate::providers::DEFAULT_TEMPERATURE
}

fn default_retry_backoff_ms() -> u64 {
    1000
}

fn default_language() -> Language {
    Language::Spanish
}

fn default_region() -> Region {
    Region::Spain
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let generator = &self.generator;

        Url::parse(&generator.endpoint)
            .with_context(|| format!("Invalid generator endpoint: {}", generator.endpoint))?;

        if generator.model.trim().is_empty() {
            return Err(anyhow!("Generator model must not be empty"));
        }

        if generator.timeout_secs == 0 {
            return Err(anyhow!("Generator timeout must be greater than zero"));
        }

        if !(0.0..=2.0).contains(&generator.temperature) {
            return Err(anyhow!(
                "Temperature must be between 0.0 and 2.0, got {}",
                generator.temperature
            ));
        }

        Ok(())
    }

    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("Failed to open config file: {:?}", path))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to file: {:?}", path))?;
        Ok(())
    }

    /// Load the configuration, writing the defaults first when the file is missing
    ///
    /// @returns: The configuration and whether it was just created
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<(Self, bool)> {
        let path = path.as_ref();
        if path.exists() {
            Ok((Self::from_file(path)?, false))
        } else {
            let config = Self::default();
            config.save(path)?;
            Ok((config, true))
        }
    }

    /// Pipeline parameters derived from the generator settings; a stage may
    /// spend the whole retry budget
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::new(self.generator.model.clone())
            .with_temperature(self.generator.temperature)
            .with_stage_timeout(self.generator.call_budget())
    }

    /// Build the configured text generator
    pub fn build_generator(&self) -> Arc<dyn TextGenerator> {
        match self.generator.provider {
            GeneratorProvider::Ollama => Arc::new(self.build_ollama()),
        }
    }

    /// Build the Ollama client for the configured endpoint
    pub fn build_ollama(&self) -> OllamaGenerator {
        OllamaGenerator::new_with_config(
            self.generator.endpoint.clone(),
            self.generator.timeout(),
            self.generator.max_retries,
            self.generator.retry_backoff_ms,
        )
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            generator: GeneratorConfig::default(),
            campaign: CampaignDefaults::default(),
            history: HistoryConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
