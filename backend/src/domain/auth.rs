//! Login credentials.
//!
//! Handlers build credentials only after the login payload passed the
//! validation pipeline; the constructor still refuses blank values so the
//! type cannot be built from unchecked input elsewhere.

use std::fmt;

use zeroize::Zeroizing;

/// Message returned when a request needs an authenticated student.
pub const UNAUTHORIZED_MESSAGE: &str = "Acesso não autorizado";

/// Message returned when e-mail and password do not match an active student.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "E-mail ou senha inválidos";

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// E-mail was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use student_records::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ana@example.com ", "segredo").unwrap();
/// assert_eq!(creds.email(), "ana@example.com");
/// assert_eq!(creds.password(), "segredo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw e-mail/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// E-mail used for the student lookup.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
