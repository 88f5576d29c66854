//! Actions: the messages that drive state transitions.
//!
//! A store accepts any type implementing [`Action`]. Typed actions (Rust
//! enums) are valid by construction and use the default
//! [`Action::validate`]. Dynamic actions (`serde_json::Value`) are checked at
//! dispatch time: they must be plain objects carrying a `type` field.
//!
//! [`ActionRecord`] bridges the two worlds: it is the typed form of a
//! dynamic action, with a mandatory `type` and free-form extra fields.
//!
//! # Examples
//!
//! ```
//! use unistore_core::action::{Action, ActionRecord};
//! use serde_json::json;
//!
//! #[derive(Debug, Clone)]
//! enum CounterAction {
//!     Increment,
//!     Decrement,
//! }
//!
//! impl Action for CounterAction {}
//!
//! assert!(CounterAction::Increment.validate().is_ok());
//! assert!(json!({ "payload": 1 }).validate().is_err());
//!
//! let record = ActionRecord::try_from(json!({ "type": "ADD", "amount": 2 })).unwrap();
//! assert_eq!(record.action_type, json!("ADD"));
//! assert_eq!(record.fields["amount"], json!(2));
//! ```

use crate::error::InvalidActionError;
use crate::plain::{self, TYPE_KEY};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A message that can be dispatched to a store.
pub trait Action: fmt::Debug + 'static {
    /// Check the action's shape before it reaches a reducer.
    ///
    /// Typed actions are valid by construction, so the default accepts
    /// everything.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidActionError`] describing the first violated rule.
    fn validate(&self) -> Result<(), InvalidActionError> {
        Ok(())
    }
}

impl Action for Value {
    fn validate(&self) -> Result<(), InvalidActionError> {
        plain::validate_action(self)
    }
}

/// A dynamic action in record form: a mandatory `type` plus any other fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The action's type tag; any JSON value is allowed
    #[serde(rename = "type")]
    pub action_type: Value,

    /// Every other field of the action object
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ActionRecord {
    /// Create a record with the given type and no extra fields.
    #[must_use]
    pub fn new(action_type: impl Into<Value>) -> Self {
        Self {
            action_type: action_type.into(),
            fields: Map::new(),
        }
    }

    /// Add a field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Look up an extra field.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns `true` if the type tag is the given string.
    #[must_use]
    pub fn is(&self, action_type: &str) -> bool {
        self.action_type.as_str() == Some(action_type)
    }
}

impl Action for ActionRecord {}

impl TryFrom<Value> for ActionRecord {
    type Error = InvalidActionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        plain::validate_action(&value)?;
        match value {
            Value::Object(mut fields) => {
                let action_type = fields
                    .remove(TYPE_KEY)
                    .ok_or(InvalidActionError::MissingType)?;
                Ok(Self {
                    action_type,
                    fields,
                })
            },
            other => Err(InvalidActionError::NotPlainObject(
                plain::ValueKind::of(&other),
            )),
        }
    }
}

impl From<ActionRecord> for Value {
    fn from(record: ActionRecord) -> Self {
        let mut object = record.fields;
        object.insert(TYPE_KEY.to_string(), record.action_type);
        Self::Object(object)
    }
}
