//! Domain primitives, services and ports.
//!
//! Purpose: hold the student and address model, the payload validation
//! pipeline and the use-case services. Nothing here depends on HTTP or
//! Diesel; adapters live under `inbound` and `outbound`.
//!
//! Public surface:
//! - Error / ErrorCode — transport-agnostic failure with field notifications.
//! - Student / Address — persisted records and their drafts and change sets.
//! - validation — rule sets and the three-stage pipeline.
//! - StudentService / AddressService / StudentLoginService — driving port
//!   implementations.

pub mod address;
pub mod address_service;
pub mod auth;
pub mod deadline;
pub mod error;
pub mod login_service;
pub mod ports;
pub mod student;
pub mod student_service;
pub mod trace_id;
pub mod validation;

pub use self::address::{
    ADDRESS_NOT_FOUND_MESSAGE, Address, AddressChanges, AddressId, DUPLICATE_ADDRESS_MESSAGE,
    NewAddress,
};
pub use self::address_service::AddressService;
pub use self::auth::{
    INVALID_CREDENTIALS_MESSAGE, LoginCredentials, LoginValidationError, UNAUTHORIZED_MESSAGE,
};
pub use self::deadline::{DEFAULT_PERSISTENCE_TIMEOUT, Deadline};
pub use self::error::{
    Error, ErrorCode, ErrorEnvelope, ErrorExposure, ErrorValidationError,
    INVALID_REQUEST_MESSAGE, UNEXPECTED_ERROR_MESSAGE, UnexpectedFailure,
};
pub use self::login_service::StudentLoginService;
pub use self::student::{
    DUPLICATE_DOCUMENT_MESSAGE, DUPLICATE_EMAIL_MESSAGE, NewStudent, STUDENT_NOT_FOUND_MESSAGE,
    Student, StudentChanges, StudentId,
};
pub use self::student_service::StudentService;
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use student_records::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("Acesso não autorizado"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
