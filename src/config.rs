//! Configuration loading and constants.
//!
//! Loads application configuration from TOML files and defines constants for
//! default paths, the upstream chat-completions API, logging and HTTP headers.
//! `AppConfig` is the root configuration struct containing all settings.

use const_format::formatcp;
use serde::Deserialize;
use std::path::Path;

// =============================================================================
// HTTP Response Headers
// =============================================================================

/// Liveness probes and edit results must never be answered from a cache
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

/// Response header carrying the per-request correlation ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

// =============================================================================
// Upstream Chat-Completions API
// =============================================================================

/// Base URL of the OpenAI REST API
pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Default chat-completions endpoint
pub const DEFAULT_EDITOR_ENDPOINT: &str = formatcp!("{}/chat/completions", OPENAI_API_BASE);

/// Default model used for text edits
pub const DEFAULT_EDITOR_MODEL: &str = "gpt-3.5-turbo";

/// Default completion length cap, in tokens
pub const DEFAULT_EDITOR_MAX_TOKENS: u32 = 100;

/// Default sampling temperature
pub const DEFAULT_EDITOR_TEMPERATURE: f32 = 0.7;

/// Upper bound accepted by the chat-completions API for `temperature`
pub const MAX_EDITOR_TEMPERATURE: f32 = 2.0;

/// Default upstream request timeout in seconds
pub const DEFAULT_EDITOR_TIMEOUT_SECS: u64 = 30;

/// Environment variable holding the upstream API key
pub const DEFAULT_API_KEY_ENV: &str = "API_KEY";

/// User-Agent sent on upstream requests
pub const USER_AGENT: &str = formatcp!("{}/{}", CRATE_NAME, env!("CARGO_PKG_VERSION"));

// =============================================================================
// Server Defaults
// =============================================================================

/// Default bind host
pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";

/// Default bind port
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Time allowed for in-flight connections to finish after a shutdown signal
pub const SHUTDOWN_GRACE_PERIOD_SECS: u64 = 30;

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Crate name, used as the tracing target prefix
pub const CRATE_NAME: &str = "penwright";

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when neither --log-level nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = formatcp!("{}=debug,tower_http=debug", CRATE_NAME);

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Upstream text editor configuration
    #[serde(default)]
    pub editor: EditorConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HTTP_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Settings for the chat-completions backed text editor
#[derive(Debug, Clone, Deserialize)]
pub struct EditorConfig {
    /// Full URL of the chat-completions endpoint
    #[serde(default = "EditorConfig::default_endpoint")]
    pub endpoint: String,
    #[serde(default = "EditorConfig::default_model")]
    pub model: String,
    #[serde(default = "EditorConfig::default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "EditorConfig::default_temperature")]
    pub temperature: f32,
    /// Upstream request timeout in seconds
    #[serde(default = "EditorConfig::default_timeout")]
    pub timeout_seconds: u64,
    /// Name of the environment variable holding the API key
    #[serde(default = "EditorConfig::default_api_key_env")]
    pub api_key_env: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            endpoint: Self::default_endpoint(),
            model: Self::default_model(),
            max_tokens: Self::default_max_tokens(),
            temperature: Self::default_temperature(),
            timeout_seconds: Self::default_timeout(),
            api_key_env: Self::default_api_key_env(),
        }
    }
}

impl EditorConfig {
    fn default_endpoint() -> String {
        DEFAULT_EDITOR_ENDPOINT.to_string()
    }

    fn default_model() -> String {
        DEFAULT_EDITOR_MODEL.to_string()
    }

    fn default_max_tokens() -> u32 {
        DEFAULT_EDITOR_MAX_TOKENS
    }

    fn default_temperature() -> f32 {
        DEFAULT_EDITOR_TEMPERATURE
    }

    fn default_timeout() -> u64 {
        DEFAULT_EDITOR_TIMEOUT_SECS
    }

    fn default_api_key_env() -> String {
        DEFAULT_API_KEY_ENV.to_string()
    }

    /// Read the API key from the configured environment variable.
    ///
    /// Loads a `.env` file from the working directory first, if one exists.
    /// An empty value is treated the same as an unset one.
    pub fn resolve_api_key(&self) -> Option<String> {
        dotenvy::dotenv().ok();
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    /// Whether structured JSON output was requested
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit path, or fall back to the default
    /// path when it exists, or to built-in defaults when it does not.
    pub fn resolve(path: Option<&str>) -> Result<Self, ConfigError> {
        Self::resolve_with_default(path, Path::new(DEFAULT_CONFIG_PATH))
    }

    fn resolve_with_default(path: Option<&str>, default_path: &Path) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None if default_path.exists() => Self::load(default_path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::Validation(
                "http.port must be non-zero".to_string(),
            ));
        }
        if self.editor.max_tokens == 0 {
            return Err(ConfigError::Validation(
                "editor.max_tokens must be greater than zero".to_string(),
            ));
        }
        if self.editor.timeout_seconds == 0 {
            return Err(ConfigError::Validation(
                "editor.timeout_seconds must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=MAX_EDITOR_TEMPERATURE).contains(&self.editor.temperature) {
            return Err(ConfigError::Validation(format!(
                "editor.temperature must be between 0 and {}",
                MAX_EDITOR_TEMPERATURE
            )));
        }
        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(ConfigError::Validation(format!(
                "logging.format must be \"text\" or \"json\", got \"{}\"",
                self.logging.format
            )));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
