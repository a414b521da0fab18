//! HTTP server configuration object.

use std::net::SocketAddr;

use student_records::domain::Deadline;
use student_records::inbound::http::session_config::SessionSettings;
use student_records::outbound::persistence::DbPool;

/// Everything `create_server` needs besides the health state.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) deadline: Deadline,
}

impl ServerConfig {
    /// Start from the session settings and bind address; records are kept in
    /// memory until a pool is attached.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self {
            session,
            bind_addr,
            db_pool: None,
            deadline: Deadline::default(),
        }
    }

    /// Persist records in PostgreSQL through `pool`.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Bound every persistence call made by the domain services.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = deadline;
        self
    }
}
