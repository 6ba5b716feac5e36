//! Field-addressable validation failures and the payload parsing entry point.
//!
//! Every request DTO implements [`ValidatedPayload`]. Parsing runs in two
//! stages: structural deserialization (types, enum membership, required
//! fields) and then the declarative `validator` rules (lengths, ranges,
//! formats). Either stage yields a [`ValidationFailure`] keyed by the
//! camelCase wire name of the offending field.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use validator::{Validate, ValidationError, ValidationErrors};

use fandreams_core::error::AppError;

/// Path used for failures that concern the whole payload.
pub const ROOT_PATH: &str = "";

/// A single constraint violated by a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Machine-readable constraint code, e.g. `max_length`.
    pub code: String,
    /// Human-readable description.
    pub message: String,
}

impl FieldViolation {
    /// Create a new violation.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Every violation found in a payload, grouped by field path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationFailure {
    fields: BTreeMap<String, Vec<FieldViolation>>,
}

impl ValidationFailure {
    /// Create an empty failure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a failure with one violation.
    pub fn single(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let mut failure = Self::new();
        failure.push(field, FieldViolation::new(code, message));
        failure
    }

    /// Record a violation against `field`.
    pub fn push(&mut self, field: impl Into<String>, violation: FieldViolation) {
        self.fields.entry(field.into()).or_default().push(violation);
    }

    /// Violations grouped by field path.
    pub fn fields(&self) -> &BTreeMap<String, Vec<FieldViolation>> {
        &self.fields
    }

    /// Violations recorded against one field.
    pub fn field(&self, path: &str) -> Option<&[FieldViolation]> {
        self.fields.get(path).map(Vec::as_slice)
    }

    /// Whether `path` violated the constraint identified by `code`.
    pub fn has_violation(&self, path: &str, code: &str) -> bool {
        self.field(path)
            .is_some_and(|violations| violations.iter().any(|v| v.code == code))
    }

    /// Total number of violations across all fields.
    pub fn violation_count(&self) -> usize {
        self.fields.values().map(Vec::len).sum()
    }

    /// Move every violation of `other` into this failure.
    pub fn merge(&mut self, other: ValidationFailure) {
        for (field, violations) in other.fields {
            self.fields.entry(field).or_default().extend(violations);
        }
    }

    /// Whether any recorded path starts at top-level field `key`.
    fn touches(&self, key: &str) -> bool {
        self.fields.keys().any(|path| top_level_key(path) == key)
    }

    /// Whether no violation has been recorded.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Client-facing details: field path to the list of messages.
    pub fn to_details(&self) -> Value {
        let map = self
            .fields
            .iter()
            .map(|(field, violations)| {
                let messages = violations
                    .iter()
                    .map(|v| Value::String(v.message.clone()))
                    .collect();
                (field.clone(), Value::Array(messages))
            })
            .collect();
        Value::Object(map)
    }

    /// Build a failure from a structural deserialization error.
    ///
    /// Serde stops at the first problem, so this holds one violation.
    pub fn from_deserialize(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let path = err.path().to_string();
        let message = err.inner().to_string();
        let parent = if path == "." { String::new() } else { path };

        if let Some(missing) = message
            .strip_prefix("missing field `")
            .and_then(|rest| rest.split('`').next())
        {
            let field = if parent.is_empty() {
                missing.to_string()
            } else {
                format!("{parent}.{missing}")
            };
            return Self::single(field, "required", "Required");
        }

        let code = if message.starts_with("unknown variant") {
            "invalid_enum_value"
        } else if message.starts_with("invalid type") || message.starts_with("invalid value") {
            "invalid_type"
        } else {
            "invalid_format"
        };
        Self::single(parent, code, message)
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self
            .fields
            .keys()
            .map(|k| if k.is_empty() { "<root>" } else { k.as_str() })
            .collect();
        write!(f, "{} invalid field(s): {}", fields.len(), fields.join(", "))
    }
}

impl std::error::Error for ValidationFailure {}

impl From<&ValidationErrors> for ValidationFailure {
    fn from(errors: &ValidationErrors) -> Self {
        let mut failure = Self::new();
        for (field, field_errors) in errors.field_errors() {
            let path = to_camel_case(&field);
            for error in field_errors.iter() {
                failure.push(path.clone(), describe(error));
            }
        }
        failure
    }
}

impl From<ValidationFailure> for AppError {
    fn from(failure: ValidationFailure) -> Self {
        let details = failure.to_details();
        AppError::validation("Invalid request body").with_details(details)
    }
}

/// A request body schema.
///
/// Implementors declare their constraints with `#[derive(Validate)]`; the
/// provided [`from_json`](ValidatedPayload::from_json) runs both stages.
/// `Default` supplies stand-in values for fields that fail the structural
/// stage, so the remaining fields are still checked.
pub trait ValidatedPayload: DeserializeOwned + Serialize + Validate + Default + Sized {
    /// Schema name used in logs and by the CLI.
    const SCHEMA: &'static str;

    /// Validate an untrusted JSON value into `Self`.
    ///
    /// Unknown fields are dropped; absent optional fields stay `None`.
    /// Every offending field is reported, not just the first.
    fn from_json(value: Value) -> Result<Self, ValidationFailure> {
        let mut object = match value {
            Value::Object(map) => map,
            other => {
                tracing::debug!(schema = Self::SCHEMA, "Payload is not an object");
                return Err(ValidationFailure::single(
                    ROOT_PATH,
                    "invalid_type",
                    format!("Expected object, received {}", json_type_name(&other)),
                ));
            }
        };

        let stand_ins = match serde_json::to_value(Self::default()) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };

        let mut failure = ValidationFailure::new();
        let parsed = loop {
            let attempt: Result<Self, _> =
                serde_path_to_error::deserialize(Value::Object(object.clone()));
            let structural = match attempt {
                Ok(parsed) => break parsed,
                Err(err) => ValidationFailure::from_deserialize(err),
            };

            let key = structural
                .fields
                .keys()
                .next()
                .map(|path| top_level_key(path).to_string())
                .unwrap_or_default();
            failure.merge(structural);

            // Swap the offending field for its stand-in, or drop it when it
            // has none, and retry. Stop when that changes nothing.
            let progressed = !key.is_empty()
                && match stand_ins.get(&key) {
                    Some(stand_in) if object.get(&key) != Some(stand_in) => {
                        object.insert(key, stand_in.clone());
                        true
                    }
                    Some(_) => false,
                    None => object.remove(&key).is_some(),
                };
            if !progressed {
                tracing::debug!(schema = Self::SCHEMA, error = %failure, "Payload has wrong shape");
                return Err(failure);
            }
        };

        if let Err(errors) = parsed.validate() {
            let rules = ValidationFailure::from(&errors);
            for (field, violations) in rules.fields {
                // Rule results for stand-in values are meaningless.
                if failure.touches(top_level_key(&field)) {
                    continue;
                }
                for violation in violations {
                    failure.push(field.clone(), violation);
                }
            }
        }

        if failure.is_empty() {
            return Ok(parsed);
        }
        tracing::debug!(
            schema = Self::SCHEMA,
            violations = failure.violation_count(),
            "Payload failed validation"
        );
        Err(failure)
    }
}

/// Deserialize an optional field that may be absent but not `null`.
///
/// Use with `#[serde(default, deserialize_with = "non_null")]`.
pub fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// First segment of a field path: `media[0].key` -> `media`.
fn top_level_key(path: &str) -> &str {
    path.split(['.', '[']).next().unwrap_or(path)
}

/// Translate a `validator` error into a violation with a stable code.
///
/// A message declared on the rule replaces the generated one.
fn describe(error: &ValidationError) -> FieldViolation {
    let params = &error.params;
    let mut violation = match error.code.as_ref() {
        "length" => describe_length(params),
        "range" => describe_range(params),
        "email" => FieldViolation::new("invalid_email", "Invalid email address"),
        code => FieldViolation::new(code, "Invalid value"),
    };
    if let Some(message) = &error.message {
        violation.message = message.to_string();
    }
    violation
}

fn describe_length(params: &HashMap<Cow<'static, str>, Value>) -> FieldViolation {
    let length = params.get("value").map(value_length);
    let bound = |name: &str| params.get(name).and_then(Value::as_u64);

    if let Some(equal) = bound("equal") {
        return FieldViolation::new(
            "exact_length",
            format!("Must contain exactly {equal} character(s)"),
        );
    }
    match (bound("min"), length) {
        (Some(min), Some(len)) if len < min => FieldViolation::new(
            "min_length",
            format!("Must contain at least {min} character(s)"),
        ),
        _ => {
            let max = bound("max").unwrap_or_default();
            FieldViolation::new(
                "max_length",
                format!("Must contain at most {max} character(s)"),
            )
        }
    }
}

fn describe_range(params: &HashMap<Cow<'static, str>, Value>) -> FieldViolation {
    let value = params.get("value").and_then(Value::as_f64);
    let min = params.get("min").and_then(Value::as_f64);

    match (min, value) {
        (Some(min), Some(v)) if v < min => FieldViolation::new(
            "too_small",
            format!("Must be greater than or equal to {min}"),
        ),
        _ => {
            let max = params.get("max").and_then(Value::as_f64).unwrap_or_default();
            FieldViolation::new("too_big", format!("Must be less than or equal to {max}"))
        }
    }
}

fn value_length(value: &Value) -> u64 {
    match value {
        Value::String(s) => s.chars().count() as u64,
        Value::Array(items) => items.len() as u64,
        _ => 0,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Map a Rust field name to its camelCase wire name.
fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("display_name"), "displayName");
        assert_eq!(to_camel_case("privacy_show_online"), "privacyShowOnline");
        assert_eq!(to_camel_case("bio"), "bio");
    }

    #[test]
    fn test_details_group_messages_by_field() {
        let mut failure = ValidationFailure::new();
        failure.push("bio", FieldViolation::new("max_length", "too long"));
        failure.push("bio", FieldViolation::new("other", "also bad"));
        failure.push("country", FieldViolation::new("exact_length", "two letters"));

        assert_eq!(failure.violation_count(), 3);
        assert_eq!(
            failure.to_details(),
            serde_json::json!({
                "bio": ["too long", "also bad"],
                "country": ["two letters"],
            })
        );
        assert_eq!(failure.to_string(), "2 invalid field(s): bio, country");
    }

    #[test]
    fn test_length_description_picks_violated_bound() {
        let mut error = ValidationError::new("length");
        error.add_param(Cow::Borrowed("min"), &1u64);
        error.add_param(Cow::Borrowed("max"), &100u64);
        error.add_param(Cow::Borrowed("value"), &"");
        assert_eq!(describe(&error).code, "min_length");

        let mut error = ValidationError::new("length");
        error.add_param(Cow::Borrowed("max"), &5u64);
        error.add_param(Cow::Borrowed("value"), &"pt-BR-x");
        assert_eq!(describe(&error).code, "max_length");
    }

    #[test]
    fn test_top_level_key() {
        assert_eq!(top_level_key("media[0].key"), "media");
        assert_eq!(top_level_key("bio"), "bio");
        assert_eq!(top_level_key(""), "");
    }

    #[test]
    fn test_merge_keeps_both_sides() {
        let mut failure = ValidationFailure::single("bio", "invalid_type", "not a string");
        failure.merge(ValidationFailure::single("media[0].key", "required", "Required"));
        assert_eq!(failure.violation_count(), 2);
        assert!(failure.touches("media"));
        assert!(!failure.touches("country"));
    }

    #[test]
    fn test_into_app_error_carries_details() {
        let failure = ValidationFailure::single("theme", "invalid_enum_value", "bad theme");
        let err = AppError::from(failure);
        assert_eq!(err.kind, fandreams_core::error::ErrorKind::Validation);
        assert_eq!(
            err.details,
            Some(serde_json::json!({ "theme": ["bad theme"] }))
        );
    }
}
