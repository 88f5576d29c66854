//! Plain-object classification for dynamically typed actions.
//!
//! Statically typed actions never need this: an enum variant always carries
//! its type. A `serde_json::Value` that arrived from outside the program is
//! different. It may be `null`, a scalar, an array, or an object, and only a
//! bare object is an acceptable action.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use unistore_core::plain::{is_plain_object, ValueKind};
//!
//! assert!(is_plain_object(&json!({ "type": "INCREMENT" })));
//! assert!(!is_plain_object(&json!([1, 2, 3])));
//! assert!(!is_plain_object(&json!(null)));
//! assert_eq!(ValueKind::of(&json!("hi")), ValueKind::String);
//! ```

use crate::error::InvalidActionError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Name of the field every action object must carry.
pub const TYPE_KEY: &str = "type";

/// The basic kind of a dynamic value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// `null`
    Null,
    /// `true` / `false`
    Bool,
    /// Any JSON number
    Number,
    /// A string
    String,
    /// An ordered sequence
    Array,
    /// A key/value object
    Object,
}

impl ValueKind {
    /// Classify a value by its basic kind.
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        };
        f.write_str(name)
    }
}

/// Returns `true` if `value` is a bare key/value object.
///
/// Arrays share the object representation in many dynamic languages, and
/// `null` is often reported as an object too; neither counts here.
#[must_use]
pub const fn is_plain_object(value: &Value) -> bool {
    matches!(ValueKind::of(value), ValueKind::Object)
}

/// Borrow `value` as an object map, or explain why it is not one.
///
/// # Errors
///
/// Returns [`InvalidActionError::NotPlainObject`] carrying the actual kind
/// when `value` is not a plain object.
pub fn require_plain_object(value: &Value) -> Result<&Map<String, Value>, InvalidActionError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(InvalidActionError::NotPlainObject(ValueKind::of(other))),
    }
}

/// Look up the `type` field of an action object.
///
/// A present key counts even when its value is `null`.
///
/// # Errors
///
/// Returns [`InvalidActionError::MissingType`] when the key is absent.
pub fn require_type(object: &Map<String, Value>) -> Result<&Value, InvalidActionError> {
    object.get(TYPE_KEY).ok_or(InvalidActionError::MissingType)
}

/// Run both dispatch-time checks on a dynamic action.
///
/// # Errors
///
/// Fails with the first check that does not hold: plain-object first, then
/// `type` presence.
pub fn validate_action(value: &Value) -> Result<(), InvalidActionError> {
    let object = require_plain_object(value)?;
    require_type(object)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_object_is_plain() {
        assert!(is_plain_object(&json!({})));
        assert!(is_plain_object(&json!({ "type": "ADD", "payload": [1] })));
    }

    #[test]
    fn test_non_objects_are_rejected() {
        for value in [json!(null), json!(true), json!(10), json!("a"), json!([])] {
            assert!(!is_plain_object(&value), "{value} should not be plain");
        }
    }

    #[test]
    fn test_validate_reports_kind() {
        assert_eq!(
            validate_action(&json!("INCREMENT")),
            Err(InvalidActionError::NotPlainObject(ValueKind::String))
        );
        assert_eq!(
            validate_action(&json!([{ "type": "X" }])),
            Err(InvalidActionError::NotPlainObject(ValueKind::Array))
        );
    }

    #[test]
    fn test_validate_requires_type() {
        assert_eq!(
            validate_action(&json!({ "payload": 1 })),
            Err(InvalidActionError::MissingType)
        );
        assert_eq!(validate_action(&json!({ "type": null })), Ok(()));
        assert_eq!(validate_action(&json!({ "type": 7 })), Ok(()));
    }

    proptest! {
        #[test]
        fn prop_strings_and_numbers_never_plain(s in ".*", n in any::<i64>()) {
            prop_assert!(!is_plain_object(&json!(s)));
            prop_assert!(!is_plain_object(&json!(n)));
        }

        #[test]
        fn prop_any_object_with_type_validates(kind in "[A-Z_]{1,16}", extra in any::<u32>()) {
            let action = json!({ "type": kind, "extra": extra });
            prop_assert!(validate_action(&action).is_ok());
        }
    }
}
