//! Driving port for student use-cases.
//!
//! Inbound adapters call this port to manage student records without
//! importing persistence concerns. Every method resolves persistence failures
//! into domain [`Error`] values, so handlers only render the outcome.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, NewStudent, Student, StudentChanges, StudentId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentDirectory: Send + Sync {
    /// Register a student after checking document and e-mail uniqueness.
    async fn create(&self, draft: NewStudent) -> Result<Student, Error>;

    /// Fetch an active student.
    async fn get(&self, id: &StudentId) -> Result<Student, Error>;

    /// List active students, newest first.
    async fn list(&self, request: PageRequest) -> Result<Page<Student>, Error>;

    /// Change the name and/or age of an active student.
    async fn update(&self, id: &StudentId, changes: StudentChanges) -> Result<Student, Error>;

    /// Soft-delete an active student.
    async fn delete(&self, id: &StudentId) -> Result<Student, Error>;
}
