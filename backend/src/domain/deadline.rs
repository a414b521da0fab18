//! Bounded persistence calls.
//!
//! Domain services await every repository call through a [`Deadline`]. A call
//! that outlives the deadline is abandoned and reported as an unexpected
//! failure of kind `Timeout`, so a stuck database never pins a request.

use std::future::Future;
use std::time::Duration;

use tracing::error;

use super::{Error, ErrorExposure, TraceId, UnexpectedFailure};

/// Timeout applied when configuration does not override it.
pub const DEFAULT_PERSISTENCE_TIMEOUT: Duration = Duration::from_secs(5);

/// Per-call timeout plus the policy used to render unexpected failures.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use student_records::domain::{Deadline, ErrorCode, ErrorExposure};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let deadline = Deadline::new(Duration::from_millis(10), ErrorExposure::Verbose);
/// let err = deadline
///     .run("sleep", async {
///         tokio::time::sleep(Duration::from_secs(1)).await;
///         Ok::<(), ()>(())
///     })
///     .await
///     .expect_err("call outlives the deadline");
/// assert_eq!(err.code(), ErrorCode::InternalError);
/// assert!(err.message().contains("Timeout"));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    timeout: Duration,
    exposure: ErrorExposure,
}

impl Default for Deadline {
    fn default() -> Self {
        Self::new(DEFAULT_PERSISTENCE_TIMEOUT, ErrorExposure::default())
    }
}

impl Deadline {
    /// Build a deadline from a timeout and an exposure policy.
    pub const fn new(timeout: Duration, exposure: ErrorExposure) -> Self {
        Self { timeout, exposure }
    }

    /// Maximum time a single persistence call may take.
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Policy used when rendering unexpected failures.
    pub const fn exposure(&self) -> ErrorExposure {
        self.exposure
    }

    /// Await `call`, giving up once the timeout elapses.
    ///
    /// The inner result is returned untouched so callers can map their own
    /// port errors; only the timeout is converted here.
    pub async fn run<T, E, F>(&self, operation: &'static str, call: F) -> Result<Result<T, E>, Error>
    where
        F: Future<Output = Result<T, E>>,
    {
        tokio::time::timeout(self.timeout, call).await.map_err(|_| {
            let detail = format!(
                "{operation} did not complete within {} ms",
                self.timeout.as_millis()
            );
            self.unexpected(operation, &UnexpectedFailure::new("Timeout", detail))
        })
    }

    /// Log `failure` with the current trace id and render it for clients.
    pub fn unexpected(&self, operation: &'static str, failure: &UnexpectedFailure) -> Error {
        let trace_id = TraceId::current().map(|id| id.to_string());
        error!(
            trace_id = trace_id.as_deref().unwrap_or("-"),
            operation,
            kind = failure.kind(),
            detail = failure.detail(),
            "persistence call failed"
        );
        Error::unexpected(self.exposure, failure)
    }
}
