//! TOML-based configuration for Parley
//!
//! Everything has a default, so a missing `parley.toml` still yields a
//! working server as long as the completion credential is in the
//! environment. Secrets are never stored in the file itself; the file only
//! names the environment variable to read them from.

use crate::llm::{CompletionParams, Provider, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure loaded from parley.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParleyConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub completion: CompletionConfig,

    #[serde(default)]
    pub reply: ReplyConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

// ============= Completion Endpoint Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Environment variable name containing the bearer credential
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Longer prompts keep only their last `max_prompt_chars` characters
    #[serde(default = "default_max_prompt_chars")]
    pub max_prompt_chars: usize,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_prompt_chars() -> usize {
    4096
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            api_key_env: default_api_key_env(),
            model: default_model(),
            max_prompt_chars: default_max_prompt_chars(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ============= Reply Sampling Configuration =============

/// Sampling parameters for the reply completion. Name detection questions
/// use their own fixed parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplyConfig {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub best_of: u32,
}

impl Default for ReplyConfig {
    fn default() -> Self {
        let params = CompletionParams::default();
        Self {
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
            frequency_penalty: params.frequency_penalty,
            presence_penalty: params.presence_penalty,
            best_of: params.best_of,
        }
    }
}

// ============= Logging Configuration =============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// One of `debug`, `info`, `warn`, `error`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Service name recorded on each HTTP request span
    #[serde(default)]
    pub service: Option<String>,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            service: None,
            format: LogFormat::default(),
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),
}

impl From<ConfigError> for crate::types::AppError {
    fn from(err: ConfigError) -> Self {
        crate::types::AppError::Config(err.to_string())
    }
}

impl ParleyConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config: ParleyConfig = toml::from_str(&content)?;

        config.validate()?;

        Ok(config)
    }

    /// Like [`ParleyConfig::load`], but a missing file yields `None`.
    ///
    /// Runs before logging is set up, so it reports the fallback to the
    /// caller instead of logging it.
    pub fn load_optional<P: AsRef<Path>>(path: P) -> Result<Option<Self>, ConfigError> {
        match Self::load(path) {
            Ok(config) => Ok(Some(config)),
            Err(ConfigError::FileNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Validate the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.completion.api_base.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "completion.api_base must not be empty".to_string(),
            ));
        }
        if self.completion.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "completion.model must not be empty".to_string(),
            ));
        }
        if self.completion.max_prompt_chars == 0 {
            return Err(ConfigError::ValidationError(
                "completion.max_prompt_chars must be greater than zero".to_string(),
            ));
        }
        if self.completion.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "completion.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.reply.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "reply.max_tokens must be greater than zero".to_string(),
            ));
        }
        if self.reply.best_of == 0 {
            return Err(ConfigError::ValidationError(
                "reply.best_of must be at least 1".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.reply.temperature) {
            return Err(ConfigError::ValidationError(
                "reply.temperature must be between 0 and 2".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.reply.top_p) {
            return Err(ConfigError::ValidationError(
                "reply.top_p must be between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the completion credential from the environment
    pub fn api_key(&self) -> Result<String, ConfigError> {
        std::env::var(&self.completion.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(self.completion.api_key_env.clone()))
    }

    /// Build the completion provider, resolving the credential
    pub fn provider(&self) -> Result<Provider, ConfigError> {
        Ok(Provider::OpenAI {
            api_key: self.api_key()?,
            api_base: self.completion.api_base.clone(),
            model: self.completion.model.clone(),
            max_prompt_chars: self.completion.max_prompt_chars,
            timeout_secs: self.completion.timeout_secs,
        })
    }

    /// Sampling parameters for the reply completion
    pub fn reply_params(&self) -> CompletionParams {
        CompletionParams {
            model: None,
            max_tokens: self.reply.max_tokens,
            temperature: self.reply.temperature,
            top_p: self.reply.top_p,
            frequency_penalty: self.reply.frequency_penalty,
            presence_penalty: self.reply.presence_penalty,
            best_of: self.reply.best_of,
        }
    }

    /// Address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
