//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults. Upstream credentials are read here once and
//! injected into the orchestrator at construction time; no module reads
//! ambient process state after startup.

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Upstream service credentials
    pub credentials: CredentialConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Upstream service credentials
#[derive(Clone)]
pub struct CredentialConfig {
    /// API key for the Gemini completion endpoint
    pub gemini_api_key: String,
    /// API key for the Google Maps geocoding and Places endpoints
    pub maps_api_key: String,
}

// Manual Debug so key material never lands in logs.
impl std::fmt::Debug for CredentialConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialConfig")
            .field("gemini_api_key", &"<redacted>")
            .field("maps_api_key", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    ///
    /// Missing credentials default to empty strings; the upstream clients
    /// reject empty keys on first use rather than at startup.
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(3050),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            credentials: CredentialConfig {
                gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
                maps_api_key: env::var("GOOGLE_MAPS_API_KEY").unwrap_or_default(),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_addr_joins_host_and_port() {
        let config = Config {
            server: ServerConfig {
                port: 3050,
                host: "127.0.0.1".to_string(),
            },
            credentials: CredentialConfig {
                gemini_api_key: String::new(),
                maps_api_key: String::new(),
            },
        };
        assert_eq!(config.server_addr(), "127.0.0.1:3050");
    }

    #[test]
    fn credential_debug_is_redacted() {
        let creds = CredentialConfig {
            gemini_api_key: "secret".to_string(),
            maps_api_key: "also-secret".to_string(),
        };
        let rendered = format!("{:?}", creds);
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
