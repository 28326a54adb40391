// src/config.rs
use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";
const DEFAULT_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_PORT: u16 = 8000;

/// Which cross-origin callers the CORS layer lets through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

impl AllowedOrigins {
    pub fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(|o| o.trim().trim_end_matches('/').to_string())
            .filter(|o| !o.is_empty())
            .collect();

        if origins.iter().any(|o| o == "*") {
            AllowedOrigins::Any
        } else {
            AllowedOrigins::List(origins)
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub groq_api_key: Option<String>,
    pub groq_base_url: String,
    pub groq_model: String,
    pub upstream_timeout: Duration,
    pub allowed_origins: AllowedOrigins,
    pub fallback_enabled: bool,
}

// Hand-written so the credential never reaches the logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("groq_api_key", &self.groq_api_key.as_ref().map(|_| "<redacted>"))
            .field("groq_base_url", &self.groq_base_url)
            .field("groq_model", &self.groq_model)
            .field("upstream_timeout", &self.upstream_timeout)
            .field("allowed_origins", &self.allowed_origins)
            .field("fallback_enabled", &self.fallback_enabled)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            groq_api_key: None,
            groq_base_url: DEFAULT_BASE_URL.to_string(),
            groq_model: DEFAULT_MODEL.to_string(),
            upstream_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            allowed_origins: AllowedOrigins::parse(DEFAULT_ORIGINS),
            fallback_enabled: false,
        }
    }
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: raw,
            })?,
            None => defaults.port,
        };

        let upstream_timeout = match get("UPSTREAM_TIMEOUT_MS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "UPSTREAM_TIMEOUT_MS",
                        value: raw,
                    });
                }
            },
            None => defaults.upstream_timeout,
        };

        let fallback_enabled = match get("AI_FALLBACK_ENABLED") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid {
                key: "AI_FALLBACK_ENABLED",
                value: raw,
            })?,
            None => false,
        };

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),
            port,
            groq_api_key: get("GROQ_API_KEY"),
            groq_base_url: get("GROQ_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.groq_base_url),
            groq_model: get("GROQ_MODEL").unwrap_or(defaults.groq_model),
            upstream_timeout,
            allowed_origins: get("ALLOWED_ORIGINS")
                .map(|raw| AllowedOrigins::parse(&raw))
                .unwrap_or(defaults.allowed_origins),
            fallback_enabled,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn groq_configured(&self) -> bool {
        self.groq_api_key.is_some()
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
