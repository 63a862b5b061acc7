//! Server configuration loaded via OrthoConfig.
//!
//! Values resolve from CLI arguments, environment variables prefixed with
//! `BARROW_`, and configuration files, in that precedence order. Every
//! field is optional; accessors fall back to built-in defaults.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_PAGE_LIMIT: u32 = 7;

/// Configuration values controlling the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BARROW")]
pub struct AppSettings {
    /// Interface the server binds to.
    pub host: Option<String>,
    /// Port the server listens on.
    pub port: Option<u16>,
    /// Page size applied when a catalog listing omits `limit`.
    pub page_limit: Option<u32>,
}

impl AppSettings {
    /// Return the configured bind host, falling back to loopback.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the configured port, falling back to the default.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Return the catalog page size used when listing requests omit `limit`.
    pub fn page_limit(&self) -> u32 {
        self.page_limit.unwrap_or(DEFAULT_PAGE_LIMIT)
    }

    /// Host/port pair for the HTTP listener.
    pub fn bind_addr(&self) -> (String, u16) {
        (self.host().to_owned(), self.port())
    }
}
