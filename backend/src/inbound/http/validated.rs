//! JSON extractor that runs the validation pipeline before deserialising.
//!
//! The body is first read as an untyped JSON value so every field can be
//! checked against its [`RuleSet`]; only a payload that passed all stages is
//! converted into the handler's request type.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::Error;
use crate::domain::validation::{
    BODY_FIELD, ErrorNotification, INVALID_DATA_MESSAGE, RuleSet, ValidationMode,
};

/// Notification message for a body that is not valid JSON.
pub const MALFORMED_JSON_MESSAGE: &str = "JSON malformado";

/// Request body bound to a rule set.
pub trait ValidatedPayload: DeserializeOwned {
    /// Rules applied to the raw payload.
    const RULES: RuleSet;
    /// Whether required fields must be present.
    const MODE: ValidationMode;
}

/// Extractor yielding a payload that passed its rule set.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    /// Unwrap the validated payload.
    pub fn into_inner(self) -> T {
        self.0
    }
}

fn body_error(message: &str) -> Error {
    Error::validation(vec![ErrorNotification::new(BODY_FIELD, message)])
}

/// Run `T`'s rules over `value` and deserialise it.
///
/// Values the rules accept but the target type cannot hold, such as an age
/// beyond the integer range, are reported as invalid body data.
pub fn validate_payload<T: ValidatedPayload>(value: Value) -> Result<T, Error> {
    T::RULES.validate(&value, T::MODE)?;
    serde_json::from_value(value).map_err(|err| {
        tracing::debug!(error = %err, "validated payload failed to deserialise");
        body_error(INVALID_DATA_MESSAGE)
    })
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: ValidatedPayload + 'static,
{
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = web::Json::<Value>::from_request(req, payload);
        Box::pin(async move {
            let value = fut.await.map_err(|err| {
                tracing::debug!(error = %err, "request body is not JSON");
                body_error(MALFORMED_JSON_MESSAGE)
            })?;
            let parsed = validate_payload::<T>(value.into_inner())?;
            Ok(Self(parsed))
        })
    }
}
