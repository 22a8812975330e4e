//! Configuration management for the MCP server.
//!
//! Configuration is loaded once at startup from environment variables and
//! is immutable afterwards. A missing or malformed credential is fatal:
//! `from_env` returns an error and the process does not start.

use serde::{Deserialize, Serialize};
use url::Url;

use super::error::Error;

/// Production API endpoint.
pub const PRODUCTION_URL: &str = "https://api.infakt.pl/api/v3";

/// Sandbox API endpoint for test accounts.
pub const SANDBOX_URL: &str = "https://api.sandbox-infakt.pl/api/v3";

/// Minimum plausible credential length; anything shorter is a typo.
const MIN_API_KEY_LENGTH: usize = 10;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// inFakt API access configuration.
    pub api: ApiConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// inFakt API credentials and endpoint selection.
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Opaque API credential, sent in the `X-inFakt-ApiKey` header.
    pub api_key: String,

    /// Base URL all request paths are appended to.
    pub base_url: String,

    /// Whether the sandbox endpoint was selected.
    pub sandbox: bool,
}

/// Custom Debug implementation to redact the credential from logs.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("sandbox", &self.sandbox)
            .finish()
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Recognized variables: `INFAKT_API_KEY` (required), `INFAKT_SANDBOX`,
    /// `INFAKT_API_URL`, `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Result<Self, Error> {
        dotenvy::dotenv().ok();

        let api = ApiConfig::from_env()?;

        let name =
            std::env::var("MCP_SERVER_NAME").unwrap_or_else(|_| "infakt-mcp-server".to_string());
        let level = std::env::var("MCP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            server: ServerConfig {
                name,
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            api,
            logging: LoggingConfig { level },
        })
    }
}

impl ApiConfig {
    /// Load and validate API configuration from the environment.
    pub fn from_env() -> Result<Self, Error> {
        let api_key = std::env::var("INFAKT_API_KEY")
            .map_err(|_| Error::config("INFAKT_API_KEY is required"))?
            .trim()
            .to_string();

        if api_key.len() < MIN_API_KEY_LENGTH {
            return Err(Error::config(format!(
                "INFAKT_API_KEY looks truncated (minimum {MIN_API_KEY_LENGTH} characters)"
            )));
        }

        let sandbox = std::env::var("INFAKT_SANDBOX")
            .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);

        // Config loads before the tracing subscriber exists, so endpoint
        // selection is logged by the caller, not here.
        let base_url = match std::env::var("INFAKT_API_URL") {
            Ok(override_url) => validate_base_url(&override_url)?,
            Err(_) if sandbox => SANDBOX_URL.to_string(),
            Err(_) => PRODUCTION_URL.to_string(),
        };

        Ok(Self {
            api_key,
            base_url,
            sandbox,
        })
    }
}

/// Check an override URL is a well-formed http(s) URL; strip the trailing slash.
fn validate_base_url(value: &str) -> Result<String, Error> {
    let url = Url::parse(value)
        .map_err(|e| Error::config(format!("INFAKT_API_URL is not a valid URL: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::config("INFAKT_API_URL must use http or https"));
    }
    Ok(value.trim_end_matches('/').to_string())
}
