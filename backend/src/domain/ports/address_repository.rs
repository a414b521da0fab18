//! Port abstraction for address persistence adapters and their errors.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Address, AddressChanges, StudentId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by address repository adapters.
    pub enum AddressPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "address repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "address repository query failed: {message}",
        /// The student already owns an active address.
        Duplicate => "student already has an active address",
    }
}

/// Addresses are keyed by their owning student; a student has at most one
/// active address.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// Fetch the active address owned by `student_id`.
    async fn find_active_by_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Option<Address>, AddressPersistenceError>;

    /// Insert a fully formed address, failing with
    /// [`AddressPersistenceError::Duplicate`] when the owner already has one.
    async fn insert(&self, address: &Address) -> Result<(), AddressPersistenceError>;

    /// Apply `changes` to the owner's active address.
    async fn update(
        &self,
        student_id: &StudentId,
        changes: &AddressChanges,
    ) -> Result<Option<Address>, AddressPersistenceError>;

    /// Flag the owner's active address as deleted.
    async fn soft_delete(
        &self,
        student_id: &StudentId,
        deleted_at: DateTime<Utc>,
    ) -> Result<Option<Address>, AddressPersistenceError>;
}
