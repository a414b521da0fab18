//! Student use-cases backed by the student repository port.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{Page, PageRequest};

use super::ports::{StudentDirectory, StudentPersistenceError, StudentRepository};
use super::{
    DUPLICATE_DOCUMENT_MESSAGE, DUPLICATE_EMAIL_MESSAGE, Deadline, Error, NewStudent,
    STUDENT_NOT_FOUND_MESSAGE, Student, StudentChanges, StudentId, UnexpectedFailure,
};

/// Domain service implementing [`StudentDirectory`].
#[derive(Clone)]
pub struct StudentService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
    deadline: Deadline,
}

impl<R> StudentService<R> {
    /// Create a new service with the given repository, clock and deadline.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>, deadline: Deadline) -> Self {
        Self {
            repo,
            clock,
            deadline,
        }
    }
}

impl<R> StudentService<R>
where
    R: StudentRepository,
{
    async fn call<T, F>(&self, operation: &'static str, call: F) -> Result<T, Error>
    where
        F: Future<Output = Result<T, StudentPersistenceError>>,
    {
        self.deadline
            .run(operation, call)
            .await?
            .map_err(|err| self.map_persistence_error(operation, err))
    }

    fn map_persistence_error(&self, operation: &'static str, err: StudentPersistenceError) -> Error {
        match err {
            StudentPersistenceError::DuplicateDocument => Error::conflict(DUPLICATE_DOCUMENT_MESSAGE),
            StudentPersistenceError::DuplicateEmail => Error::conflict(DUPLICATE_EMAIL_MESSAGE),
            other => self.deadline.unexpected(
                operation,
                &UnexpectedFailure::new(other.kind(), other.detail()),
            ),
        }
    }

    async fn require_active(&self, id: &StudentId) -> Result<Student, Error> {
        self.call("find student", self.repo.find_active_by_id(id))
            .await?
            .ok_or_else(not_found)
    }
}

fn not_found() -> Error {
    Error::not_found(STUDENT_NOT_FOUND_MESSAGE)
}

#[async_trait]
impl<R> StudentDirectory for StudentService<R>
where
    R: StudentRepository,
{
    async fn create(&self, draft: NewStudent) -> Result<Student, Error> {
        let by_document = self.call(
            "find student by document",
            self.repo.find_active_by_document(&draft.document_identification),
        );
        if by_document.await?.is_some() {
            return Err(Error::conflict(DUPLICATE_DOCUMENT_MESSAGE));
        }
        let by_email = self.call(
            "find student by email",
            self.repo.find_active_by_email(&draft.email_address),
        );
        if by_email.await?.is_some() {
            return Err(Error::conflict(DUPLICATE_EMAIL_MESSAGE));
        }

        let student = draft.into_student(StudentId::random(), self.clock.utc());
        self.call("insert student", self.repo.insert(&student)).await?;
        Ok(student)
    }

    async fn get(&self, id: &StudentId) -> Result<Student, Error> {
        self.require_active(id).await
    }

    async fn list(&self, request: PageRequest) -> Result<Page<Student>, Error> {
        let count = self.call("count students", self.repo.count_active()).await?;
        if count == 0 {
            return Ok(Page::empty(request));
        }
        let students = self
            .call(
                "list students",
                self.repo.list_active(request.offset(), request.limit()),
            )
            .await?;
        Ok(Page::new(students, request, count))
    }

    async fn update(&self, id: &StudentId, changes: StudentChanges) -> Result<Student, Error> {
        let current = self.require_active(id).await?;
        if changes.is_empty() {
            return Ok(current);
        }
        self.call("update student", self.repo.update(id, &changes))
            .await?
            .ok_or_else(not_found)
    }

    async fn delete(&self, id: &StudentId) -> Result<Student, Error> {
        self.require_active(id).await?;
        let deleted_at = self.clock.utc();
        self.call("delete student", self.repo.soft_delete(id, deleted_at))
            .await?
            .ok_or_else(not_found)
    }
}

#[cfg(test)]
#[path = "student_service_tests.rs"]
mod tests;
