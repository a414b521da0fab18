//! Session helpers and the authentication gate.
//!
//! The signed session cookie stores the authenticated student's id.
//! [`AuthenticatedStudent`] is the gate used by address routes: it resolves
//! the id or rejects the request with `401` before the handler runs.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, StudentId, UNAUTHORIZED_MESSAGE};

pub(crate) const STUDENT_ID_KEY: &str = "student_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated student's id in the session cookie.
    pub fn persist_student(&self, student_id: &StudentId) -> Result<(), Error> {
        self.0
            .insert(STUDENT_ID_KEY, student_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current student id, if the cookie carries a valid one.
    pub fn student_id(&self) -> Result<Option<StudentId>, Error> {
        let raw = self
            .0
            .get::<String>(STUDENT_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|value| match value.parse::<StudentId>() {
            Ok(id) => Some(id),
            Err(error) => {
                tracing::warn!("invalid student id in session cookie: {error}");
                None
            }
        }))
    }

    /// Require an authenticated student or return `401 Unauthorized`.
    pub fn require_student_id(&self) -> Result<StudentId, Error> {
        self.student_id()?
            .ok_or_else(|| Error::unauthorized(UNAUTHORIZED_MESSAGE))
    }

    /// Drop every session entry and expire the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

/// Identity of the student owning the current session.
///
/// Extracting this type is the authentication gate: requests without a valid
/// session never reach the handler body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedStudent(pub StudentId);

impl AuthenticatedStudent {
    /// Identifier of the authenticated student.
    pub fn id(&self) -> &StudentId {
        &self.0
    }
}

impl FromRequest for AuthenticatedStudent {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = SessionContext::from_request(req, payload);
        Box::pin(async move {
            let session = fut.await?;
            let id = session.require_student_id()?;
            Ok(Self(id))
        })
    }
}
