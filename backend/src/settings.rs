//! Server configuration loaded via OrthoConfig.
//!
//! Every field can come from `STUDENTS_*` environment variables, a
//! configuration file or the command line. Missing values fall back to the
//! defaults exposed by the accessors.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{DEFAULT_PERSISTENCE_TIMEOUT, Deadline, ErrorExposure};

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_SIZE: u32 = 10;

/// Runtime settings for the student records server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STUDENTS")]
pub struct AppSettings {
    /// Interface to bind; defaults to all interfaces.
    pub host: Option<IpAddr>,
    /// Port to bind; defaults to 8080.
    pub port: Option<u16>,
    /// PostgreSQL connection string. Without one the server keeps records
    /// in memory.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_size: Option<u32>,
    /// Per-call persistence timeout in milliseconds.
    pub persistence_timeout_ms: Option<u64>,
    /// Append failure details to unexpected-error messages.
    #[ortho_config(default = false)]
    pub verbose_errors: bool,
}

impl AppSettings {
    /// Address the HTTP server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn pool_size(&self) -> u32 {
        self.pool_size.unwrap_or(DEFAULT_POOL_SIZE)
    }

    pub fn persistence_timeout(&self) -> Duration {
        self.persistence_timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_PERSISTENCE_TIMEOUT)
    }

    /// Deadline handed to the domain services.
    pub fn deadline(&self) -> Deadline {
        Deadline::new(
            self.persistence_timeout(),
            ErrorExposure::from_verbose_flag(self.verbose_errors),
        )
    }
}
