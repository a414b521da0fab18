//! Field validation pipeline for inbound payloads.
//!
//! A [`RuleSet`] declares, per field, whether it is required, which JSON
//! primitive it must carry, and an optional value-shape check. The pipeline
//! runs three stages in order and stops at the first stage that reports
//! anything:
//!
//! 1. presence: required keys must exist (create mode only);
//! 2. type: present values must match the declared primitive;
//! 3. shape: typed values must satisfy their semantic check.
//!
//! Stages only read the payload. Each stage reports every failing field, so
//! a client learns about all missing fields at once but never sees a type
//! error for a field that is also missing.

mod rule_sets;

pub use rule_sets::{
    ADDRESS_RULES, LOGIN_RULES, STUDENT_CREATE_RULES, STUDENT_UPDATE_RULES,
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::domain::Error;

/// Notification emitted when a required key is absent.
pub const REQUIRED_FIELD_MESSAGE: &str = "Campo obrigatório";
/// Notification emitted when a value has the wrong JSON type.
pub const INVALID_DATA_MESSAGE: &str = "Dado inválido";
/// Pseudo-field naming the payload itself.
pub const BODY_FIELD: &str = "body";

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorNotification {
    #[schema(example = "zipCode")]
    field: String,
    #[schema(example = "Campo obrigatório")]
    message: String,
}

impl ErrorNotification {
    /// Build a notification for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the offending field as it appears in the payload.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Human-readable failure description.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// JSON primitive a field must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// A JSON string.
    String,
    /// A JSON number without a fractional part.
    Integer,
}

impl FieldType {
    fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
        }
    }
}

/// Semantic check applied once a value has the right type.
///
/// Checks reject values of an unexpected type rather than assuming the type
/// stage already ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeCheck {
    /// Text with at least one non-whitespace character.
    NonEmpty,
    /// Text with exactly this many characters.
    ExactLength(usize),
    /// Integer greater than or equal to zero.
    NonNegative,
    /// Text shaped like `local@domain.tld`.
    Email,
}

impl ShapeCheck {
    /// Whether `value` satisfies the check.
    pub fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (Self::NonEmpty, Value::String(text)) => !text.trim().is_empty(),
            (Self::ExactLength(len), Value::String(text)) => text.chars().count() == len,
            (Self::NonNegative, Value::Number(number)) => number.is_u64(),
            (Self::Email, Value::String(text)) => is_email_shaped(text),
            _ => false,
        }
    }
}

fn is_email_shaped(text: &str) -> bool {
    if text.chars().any(char::is_whitespace) {
        return false;
    }
    match text.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

/// Declaration of one payload field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    name: &'static str,
    required: bool,
    field_type: FieldType,
    shape: Option<(ShapeCheck, &'static str)>,
}

impl FieldRule {
    /// A field that must be present on create.
    pub const fn required(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            required: true,
            field_type,
            shape: None,
        }
    }

    /// A field that may be omitted.
    pub const fn optional(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            required: false,
            field_type,
            shape: None,
        }
    }

    /// Attach a shape check and the message reported when it fails.
    pub const fn with_shape(mut self, check: ShapeCheck, message: &'static str) -> Self {
        self.shape = Some((check, message));
        self
    }

    /// Payload key for this field.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Resolve the value this rule should inspect.
    ///
    /// `null` counts as absent unless a create payload sends it for a
    /// required field, where it is present but of the wrong type.
    fn lookup<'a>(&self, payload: &'a Map<String, Value>, mode: ValidationMode) -> Option<&'a Value> {
        match payload.get(self.name) {
            Some(Value::Null) if !(self.required && mode == ValidationMode::Create) => None,
            other => other,
        }
    }
}

/// Whether a payload creates a record or partially updates one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Required fields must be present and every rule applies.
    Create,
    /// Only fields present in the payload are checked.
    Update,
}

/// Pipeline stage identifiers, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Required-field presence.
    Presence,
    /// JSON primitive type.
    Type,
    /// Semantic value shape.
    Shape,
}

impl Stage {
    /// Every stage in execution order.
    pub const ORDER: [Self; 3] = [Self::Presence, Self::Type, Self::Shape];
}

/// Declarative rule set for one resource payload.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use student_records::domain::validation::{
///     FieldRule, FieldType, RuleSet, ShapeCheck, ValidationMode,
/// };
///
/// const RULES: RuleSet = RuleSet::new(&[
///     FieldRule::required("uf", FieldType::String)
///         .with_shape(ShapeCheck::ExactLength(2), "UF inválida"),
/// ]);
///
/// let err = RULES
///     .validate(&json!({ "uf": "RSS" }), ValidationMode::Create)
///     .expect_err("three letters are rejected");
/// assert_eq!(err.errors()[0].field(), "uf");
/// assert!(RULES.validate(&json!({}), ValidationMode::Update).is_ok());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RuleSet {
    rules: &'static [FieldRule],
}

impl RuleSet {
    /// Wrap a static list of field rules.
    pub const fn new(rules: &'static [FieldRule]) -> Self {
        Self { rules }
    }

    /// Run every stage in order, stopping at the first stage that fails.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] with code `InvalidRequest` carrying the
    /// notifications of the failing stage, or a single `body` notification
    /// when the payload is not a JSON object.
    pub fn validate(&self, payload: &Value, mode: ValidationMode) -> Result<(), Error> {
        let Some(fields) = payload.as_object() else {
            return Err(Error::validation(vec![ErrorNotification::new(
                BODY_FIELD,
                INVALID_DATA_MESSAGE,
            )]));
        };
        for stage in Stage::ORDER {
            let notifications = self.run_stage(stage, fields, mode);
            if !notifications.is_empty() {
                return Err(Error::validation(notifications));
            }
        }
        Ok(())
    }

    /// Run a single stage and collect its notifications.
    pub fn run_stage(
        &self,
        stage: Stage,
        payload: &Map<String, Value>,
        mode: ValidationMode,
    ) -> Vec<ErrorNotification> {
        match stage {
            Stage::Presence => self.presence_stage(payload, mode),
            Stage::Type => self.type_stage(payload, mode),
            Stage::Shape => self.shape_stage(payload, mode),
        }
    }

    fn presence_stage(&self, payload: &Map<String, Value>, mode: ValidationMode) -> Vec<ErrorNotification> {
        if mode == ValidationMode::Update {
            return Vec::new();
        }
        self.rules
            .iter()
            .filter(|rule| rule.required && !payload.contains_key(rule.name))
            .map(|rule| ErrorNotification::new(rule.name, REQUIRED_FIELD_MESSAGE))
            .collect()
    }

    fn type_stage(&self, payload: &Map<String, Value>, mode: ValidationMode) -> Vec<ErrorNotification> {
        self.rules
            .iter()
            .filter(|rule| match rule.lookup(payload, mode) {
                Some(value) => !rule.field_type.matches(value),
                None => rule.required && mode == ValidationMode::Create,
            })
            .map(|rule| ErrorNotification::new(rule.name, INVALID_DATA_MESSAGE))
            .collect()
    }

    fn shape_stage(&self, payload: &Map<String, Value>, mode: ValidationMode) -> Vec<ErrorNotification> {
        self.rules
            .iter()
            .filter_map(|rule| {
                let (check, message) = rule.shape?;
                let value = rule.lookup(payload, mode)?;
                (!check.accepts(value)).then(|| ErrorNotification::new(rule.name, message))
            })
            .collect()
    }
}
