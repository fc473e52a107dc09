//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `ACCOUNT_*` environment variables or a
//! configuration file, in the precedence `ortho_config` applies.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use account::inbound::http::signup::DEFAULT_JSON_LIMIT;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Settings controlling the HTTP listener.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ACCOUNT")]
pub struct ServerSettings {
    /// Socket address to listen on, for example `127.0.0.1:8080`.
    pub bind_addr: Option<String>,
    /// Maximum accepted JSON request body, in bytes.
    pub json_limit: Option<usize>,
}

impl ServerSettings {
    /// Return the configured bind address, falling back to the default.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Return the configured body limit, falling back to the default.
    pub fn json_limit(&self) -> usize {
        self.json_limit.unwrap_or(DEFAULT_JSON_LIMIT)
    }
}
