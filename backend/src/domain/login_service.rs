//! Credential check against the student repository.

use std::sync::Arc;

use async_trait::async_trait;

use super::ports::{LoginService, StudentRepository};
use super::{
    Deadline, Error, INVALID_CREDENTIALS_MESSAGE, LoginCredentials, StudentId, UnexpectedFailure,
};

/// [`LoginService`] matching credentials against active students.
///
/// Passwords are compared exactly as stored.
#[derive(Clone)]
pub struct StudentLoginService<R> {
    repo: Arc<R>,
    deadline: Deadline,
}

impl<R> StudentLoginService<R> {
    /// Create a login service over the student repository.
    pub fn new(repo: Arc<R>, deadline: Deadline) -> Self {
        Self { repo, deadline }
    }
}

#[async_trait]
impl<R> LoginService for StudentLoginService<R>
where
    R: StudentRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<StudentId, Error> {
        let operation = "find student by email";
        let found = self
            .deadline
            .run(operation, self.repo.find_active_by_email(credentials.email()))
            .await?
            .map_err(|err| {
                self.deadline
                    .unexpected(operation, &UnexpectedFailure::new(err.kind(), err.detail()))
            })?;
        match found {
            Some(student) if student.password == credentials.password() => Ok(student.id),
            _ => Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE)),
        }
    }
}
