//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses; the serialised form is the failure half of the response
//! envelope: `{ "ok": false, "message": ..., "errors": [...] }`.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::validation::ErrorNotification;

/// Message attached to every validation failure.
pub const INVALID_REQUEST_MESSAGE: &str = "Requisição inválida";

/// Prefix shared by every unexpected-failure message.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Ocorreu um erro inesperado.";

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// A uniqueness precondition failed.
    Conflict,
    /// Authentication failed or is missing.
    Unauthorized,
    /// The requested resource does not exist or was soft-deleted.
    NotFound,
    /// An unexpected error occurred inside the domain or its collaborators.
    InternalError,
}

/// How much of an unexpected failure is exposed to clients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorExposure {
    /// Clients only see the generic unexpected-error message.
    #[default]
    Redacted,
    /// Clients see the failure kind and detail appended to the message.
    Verbose,
}

impl ErrorExposure {
    /// Select the policy from a boolean toggle.
    pub fn from_verbose_flag(verbose: bool) -> Self {
        if verbose { Self::Verbose } else { Self::Redacted }
    }
}

/// Unexpected failure raised by a collaborator, kept apart from the public
/// message so it can be logged in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnexpectedFailure {
    kind: &'static str,
    detail: String,
}

impl UnexpectedFailure {
    /// Describe a failure by kind (for example `Connection`) and detail.
    pub fn new(kind: &'static str, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Failure category.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Failure detail as reported by the collaborator.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl fmt::Display for UnexpectedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.kind, self.detail)
    }
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
/// - `errors` is only populated for [`ErrorCode::InvalidRequest`].
///
/// # Examples
/// ```
/// use student_records::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("missing");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "ErrorEnvelope")]
pub struct Error {
    code: ErrorCode,
    message: String,
    errors: Vec<ErrorNotification>,
}

/// Validation errors emitted by the constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorValidationError {
    EmptyMessage,
}

impl fmt::Display for ErrorValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "error message must not be empty"),
        }
    }
}

impl std::error::Error for ErrorValidationError {}

impl Error {
    /// Create a new error, panicking if validation fails.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            errors: Vec::new(),
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Field-level notifications produced by the validation pipeline.
    pub fn errors(&self) -> &[ErrorNotification] {
        &self.errors
    }

    /// Validation failure carrying the notifications of one pipeline stage.
    ///
    /// # Examples
    /// ```
    /// use student_records::domain::validation::ErrorNotification;
    /// use student_records::domain::{Error, ErrorCode};
    ///
    /// let err = Error::validation(vec![ErrorNotification::new("uf", "Campo obrigatório")]);
    /// assert_eq!(err.code(), ErrorCode::InvalidRequest);
    /// assert_eq!(err.errors().len(), 1);
    /// ```
    pub fn validation(errors: Vec<ErrorNotification>) -> Self {
        Self {
            code: ErrorCode::InvalidRequest,
            message: INVALID_REQUEST_MESSAGE.to_owned(),
            errors,
        }
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Internal error for a collaborator failure, rendered per `exposure`.
    ///
    /// # Examples
    /// ```
    /// use student_records::domain::{Error, ErrorExposure, UnexpectedFailure};
    ///
    /// let failure = UnexpectedFailure::new("Connection", "database unavailable");
    /// let err = Error::unexpected(ErrorExposure::Verbose, &failure);
    /// assert_eq!(
    ///     err.message(),
    ///     "Ocorreu um erro inesperado. Erro: Connection - database unavailable"
    /// );
    /// ```
    pub fn unexpected(exposure: ErrorExposure, failure: &UnexpectedFailure) -> Self {
        let message = match exposure {
            ErrorExposure::Redacted => UNEXPECTED_ERROR_MESSAGE.to_owned(),
            ErrorExposure::Verbose => format!("{UNEXPECTED_ERROR_MESSAGE} Erro: {failure}"),
        };
        Self::internal(message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

/// Wire form of a failed response.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    /// Always `false` for failures.
    #[schema(example = false)]
    pub ok: bool,
    /// Human-readable summary.
    #[schema(example = "Requisição inválida")]
    pub message: String,
    /// Field-level notifications; omitted unless validation failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorNotification>>,
}

impl From<Error> for ErrorEnvelope {
    fn from(value: Error) -> Self {
        let Error {
            message, errors, ..
        } = value;
        Self {
            ok: false,
            message,
            errors: (!errors.is_empty()).then_some(errors),
        }
    }
}
