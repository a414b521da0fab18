//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials without knowing the backing infrastructure.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, StudentId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated student id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<StudentId, Error>;
}
