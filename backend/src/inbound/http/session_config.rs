//! Session cookie settings read from the process environment.
//!
//! Development builds fall back to permissive defaults with a warning;
//! production builds refuse to start unless every toggle is present and the
//! signing key file holds enough material.

use std::path::PathBuf;

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite, time::Duration};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroizing;

pub const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
pub const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
pub const SAMESITE_ENV: &str = "SESSION_SAMESITE";
pub const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "session";
const SESSION_TTL_HOURS: i64 = 2;

const DEFAULT_KEY_PATH: &str = "/var/run/secrets/student_records_session_key";
/// Minimum key file length accepted by production builds.
pub const MIN_KEY_LEN: usize = 64;
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// How strictly the environment is checked.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildProfile {
    /// Missing or malformed toggles fall back to defaults.
    Development,
    /// Every toggle is mandatory.
    Production,
}

impl BuildProfile {
    /// Profile matching the current compilation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use student_records::inbound::http::session_config::BuildProfile;
    ///
    /// let expected = if cfg!(debug_assertions) {
    ///     BuildProfile::Development
    /// } else {
    ///     BuildProfile::Production
    /// };
    /// assert_eq!(BuildProfile::current(), expected);
    /// ```
    #[must_use]
    pub fn current() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }

    fn lenient(self) -> bool {
        matches!(self, Self::Development)
    }

    /// Return `fallback` in development, `error` in production.
    fn fallback_or<T>(
        self,
        fallback: T,
        error: SessionConfigError,
    ) -> Result<T, SessionConfigError> {
        self.fallback_or_else(|| fallback, error)
    }

    fn fallback_or_else<T>(
        self,
        fallback: impl FnOnce() -> T,
        error: SessionConfigError,
    ) -> Result<T, SessionConfigError> {
        if self.lenient() {
            warn!(%error, "session setting fell back to its default");
            Ok(fallback())
        } else {
            Err(error)
        }
    }
}

/// Cookie session parameters handed to the server.
#[derive(Clone)]
pub struct SessionSettings {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

impl SessionSettings {
    /// Encrypted, HTTP-only cookie session that expires after two hours.
    pub fn middleware(&self) -> SessionMiddleware<CookieSessionStore> {
        SessionMiddleware::builder(CookieSessionStore::default(), self.key.clone())
            .cookie_name(SESSION_COOKIE_NAME.to_owned())
            .cookie_path("/".to_owned())
            .cookie_secure(self.cookie_secure)
            .cookie_http_only(true)
            .cookie_same_site(self.same_site)
            .cookie_content_security(CookieContentSecurity::Private)
            .session_lifecycle(
                PersistentSession::default().session_ttl(Duration::hours(SESSION_TTL_HOURS)),
            )
            .build()
    }
}

/// Reasons the session environment was rejected.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in production builds")]
    EphemeralNotAllowed,
}

/// Read the session settings from `env`.
///
/// # Examples
///
/// ```rust
/// use student_records::inbound::http::session_config::{
///     BuildProfile, session_settings_from_env,
/// };
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "SESSION_KEY_FILE" => Some("/nonexistent/student-key".to_owned()),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env, BuildProfile::Development)
///     .expect("development falls back to an ephemeral key");
/// assert!(settings.cookie_secure);
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    profile: BuildProfile,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = read_flag(env, profile, COOKIE_SECURE_ENV, true)?;
    let same_site = read_same_site(env, profile, cookie_secure)?;
    let allow_ephemeral = read_flag(env, profile, ALLOW_EPHEMERAL_ENV, false)?;
    if allow_ephemeral && !profile.lenient() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = read_key(env, profile, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

fn read_flag<E: Env>(
    env: &E,
    profile: BuildProfile,
    name: &'static str,
    default: bool,
) -> Result<bool, SessionConfigError> {
    let Some(value) = env.string(name) else {
        return profile.fallback_or(default, SessionConfigError::MissingEnv { name });
    };
    match parse_flag(&value) {
        Some(flag) => Ok(flag),
        None => profile.fallback_or(
            default,
            SessionConfigError::InvalidEnv {
                name,
                value,
                expected: BOOL_EXPECTED,
            },
        ),
    }
}

fn read_same_site<E: Env>(
    env: &E,
    profile: BuildProfile,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let default = if profile.lenient() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    let Some(value) = env.string(SAMESITE_ENV) else {
        return profile.fallback_or(default, SessionConfigError::MissingEnv { name: SAMESITE_ENV });
    };

    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => profile.fallback_or(SameSite::None, SessionConfigError::InsecureSameSiteNone),
        _ => profile.fallback_or(
            default,
            SessionConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value,
                expected: SAMESITE_EXPECTED,
            },
        ),
    }
}

fn read_key<E: Env>(
    env: &E,
    profile: BuildProfile,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| DEFAULT_KEY_PATH.to_owned()),
    );

    match std::fs::read(&path) {
        Ok(bytes) => {
            let bytes = Zeroizing::new(bytes);
            if bytes.len() < MIN_KEY_LEN {
                let error = SessionConfigError::KeyTooShort {
                    path,
                    length: bytes.len(),
                    min_len: MIN_KEY_LEN,
                };
                return profile.fallback_or_else(Key::generate, error);
            }
            Ok(Key::derive_from(&bytes))
        }
        Err(source) if profile.lenient() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %source,
                "using an ephemeral session key; sessions end on restart"
            );
            Ok(Key::generate())
        }
        Err(source) => Err(SessionConfigError::KeyRead { path, source }),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
