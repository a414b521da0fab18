//! Port abstraction for student persistence adapters and their errors.
//!
//! Every lookup is scoped to active students: soft-deleted rows are invisible
//! to callers of this port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Student, StudentChanges, StudentId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by student repository adapters.
    pub enum StudentPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "student repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "student repository query failed: {message}",
        /// Another active student already uses the document.
        DuplicateDocument => "document already registered by an active student",
        /// Another active student already uses the e-mail address.
        DuplicateEmail => "email address already registered by an active student",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Fetch an active student by identifier.
    async fn find_active_by_id(
        &self,
        id: &StudentId,
    ) -> Result<Option<Student>, StudentPersistenceError>;

    /// Fetch the active student registered with `document`.
    async fn find_active_by_document(
        &self,
        document: &str,
    ) -> Result<Option<Student>, StudentPersistenceError>;

    /// Fetch the active student registered with `email`.
    async fn find_active_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Student>, StudentPersistenceError>;

    /// Insert a fully formed student.
    ///
    /// Adapters must reject a second active student with the same document
    /// or e-mail atomically, reporting the matching `Duplicate*` variant.
    async fn insert(&self, student: &Student) -> Result<(), StudentPersistenceError>;

    /// Apply `changes` to an active student, returning the updated row.
    async fn update(
        &self,
        id: &StudentId,
        changes: &StudentChanges,
    ) -> Result<Option<Student>, StudentPersistenceError>;

    /// Flag an active student as deleted, returning the updated row.
    async fn soft_delete(
        &self,
        id: &StudentId,
        deleted_at: DateTime<Utc>,
    ) -> Result<Option<Student>, StudentPersistenceError>;

    /// Number of active students.
    async fn count_active(&self) -> Result<u64, StudentPersistenceError>;

    /// Active students ordered by creation time, newest first.
    async fn list_active(
        &self,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<Student>, StudentPersistenceError>;
}

