//! Driving port for the authenticated student's address.

use async_trait::async_trait;

use crate::domain::{Address, AddressChanges, Error, NewAddress, StudentId};

/// Address use-cases, always scoped to the student owning the session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressBook: Send + Sync {
    /// Register the owner's address; fails with a conflict when one exists.
    async fn create(&self, owner: &StudentId, draft: NewAddress) -> Result<Address, Error>;

    /// Fetch the owner's active address.
    async fn get(&self, owner: &StudentId) -> Result<Address, Error>;

    /// Partially update the owner's active address.
    async fn update(&self, owner: &StudentId, changes: AddressChanges) -> Result<Address, Error>;

    /// Soft-delete the owner's active address.
    async fn delete(&self, owner: &StudentId) -> Result<Address, Error>;
}
