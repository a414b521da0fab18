//! Shared HTTP adapter state.
//!
//! Handlers receive this state via `actix_web::web::Data` and only depend on
//! the driving ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AddressBook, LoginService, StudentDirectory};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub students: Arc<dyn StudentDirectory>,
    pub addresses: Arc<dyn AddressBook>,
    pub login: Arc<dyn LoginService>,
}

impl HttpState {
    /// Bundle the driving ports used by the handlers.
    pub fn new(
        students: Arc<dyn StudentDirectory>,
        addresses: Arc<dyn AddressBook>,
        login: Arc<dyn LoginService>,
    ) -> Self {
        Self {
            students,
            addresses,
            login,
        }
    }
}
