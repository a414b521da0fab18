//! Address use-cases for the authenticated student.
//!
//! Every operation first confirms the session's student is still active, so
//! a session outliving a soft-deleted student cannot touch addresses.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use super::ports::{AddressBook, AddressPersistenceError, AddressRepository, StudentRepository};
use super::{
    ADDRESS_NOT_FOUND_MESSAGE, Address, AddressChanges, AddressId, DUPLICATE_ADDRESS_MESSAGE,
    Deadline, Error, NewAddress, StudentId, UNAUTHORIZED_MESSAGE, UnexpectedFailure,
};

/// Domain service implementing [`AddressBook`].
#[derive(Clone)]
pub struct AddressService<A, S> {
    addresses: Arc<A>,
    students: Arc<S>,
    clock: Arc<dyn Clock>,
    deadline: Deadline,
}

impl<A, S> AddressService<A, S> {
    /// Create a new service over the address and student repositories.
    pub fn new(
        addresses: Arc<A>,
        students: Arc<S>,
        clock: Arc<dyn Clock>,
        deadline: Deadline,
    ) -> Self {
        Self {
            addresses,
            students,
            clock,
            deadline,
        }
    }
}

impl<A, S> AddressService<A, S>
where
    A: AddressRepository,
    S: StudentRepository,
{
    async fn call<T, F>(&self, operation: &'static str, call: F) -> Result<T, Error>
    where
        F: Future<Output = Result<T, AddressPersistenceError>>,
    {
        self.deadline
            .run(operation, call)
            .await?
            .map_err(|err| match err {
                AddressPersistenceError::Duplicate => Error::conflict(DUPLICATE_ADDRESS_MESSAGE),
                other => self.deadline.unexpected(
                    operation,
                    &UnexpectedFailure::new(other.kind(), other.detail()),
                ),
            })
    }

    async fn ensure_owner_active(&self, owner: &StudentId) -> Result<(), Error> {
        let operation = "find address owner";
        let found = self
            .deadline
            .run(operation, self.students.find_active_by_id(owner))
            .await?
            .map_err(|err| {
                self.deadline
                    .unexpected(operation, &UnexpectedFailure::new(err.kind(), err.detail()))
            })?;
        match found {
            Some(_) => Ok(()),
            None => Err(Error::unauthorized(UNAUTHORIZED_MESSAGE)),
        }
    }

    async fn require_address(&self, owner: &StudentId) -> Result<Address, Error> {
        self.call("find address", self.addresses.find_active_by_student(owner))
            .await?
            .ok_or_else(not_found)
    }
}

fn not_found() -> Error {
    Error::not_found(ADDRESS_NOT_FOUND_MESSAGE)
}

#[async_trait]
impl<A, S> AddressBook for AddressService<A, S>
where
    A: AddressRepository,
    S: StudentRepository,
{
    async fn create(&self, owner: &StudentId, draft: NewAddress) -> Result<Address, Error> {
        self.ensure_owner_active(owner).await?;
        let existing = self
            .call("find address", self.addresses.find_active_by_student(owner))
            .await?;
        if existing.is_some() {
            return Err(Error::conflict(DUPLICATE_ADDRESS_MESSAGE));
        }
        let address = draft.into_address(AddressId::random(), *owner, self.clock.utc());
        self.call("insert address", self.addresses.insert(&address))
            .await?;
        Ok(address)
    }

    async fn get(&self, owner: &StudentId) -> Result<Address, Error> {
        self.ensure_owner_active(owner).await?;
        self.require_address(owner).await
    }

    async fn update(&self, owner: &StudentId, changes: AddressChanges) -> Result<Address, Error> {
        self.ensure_owner_active(owner).await?;
        let current = self.require_address(owner).await?;
        if changes.is_empty() {
            return Ok(current);
        }
        self.call("update address", self.addresses.update(owner, &changes))
            .await?
            .ok_or_else(not_found)
    }

    async fn delete(&self, owner: &StudentId) -> Result<Address, Error> {
        self.ensure_owner_active(owner).await?;
        self.require_address(owner).await?;
        let deleted_at = self.clock.utc();
        self.call("delete address", self.addresses.soft_delete(owner, deleted_at))
            .await?
            .ok_or_else(not_found)
    }
}

#[cfg(test)]
#[path = "address_service_tests.rs"]
mod tests;
