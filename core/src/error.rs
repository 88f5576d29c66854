//! Error taxonomy shared by every layer of the store.
//!
//! Two families of failure exist:
//!
//! - [`ConfigurationError`]: the store, reducer map, or middleware chain was
//!   assembled or driven in a way that cannot work. Raised synchronously at
//!   setup time (or when the dispatch pipeline is re-entered).
//! - [`InvalidActionError`]: a dynamically typed action failed validation at
//!   dispatch time. Raised before any state change or listener notification.

use crate::plain::ValueKind;
use thiserror::Error;

/// Errors raised while wiring up or driving the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Two sub-reducers were registered under the same key
    ///
    /// Detected eagerly by `combine_reducers`, never on first dispatch.
    #[error("reducer key `{0}` is registered more than once")]
    DuplicateReducerKey(String),

    /// `dispatch` was called while the reducer or listeners of another
    /// dispatch were still running
    #[error("dispatch called while a previous dispatch is still in progress")]
    NestedDispatch,

    /// A middleware called `dispatch` before the middleware chain was built
    #[error("dispatch called while the middleware chain is being constructed")]
    DispatchDuringConstruction,
}

/// Errors raised when a dynamically typed action fails validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidActionError {
    /// The action is not a plain object (null, scalar, or array)
    #[error("action is not a plain object (got {0})")]
    NotPlainObject(ValueKind),

    /// The action object has no `type` field
    #[error("action must have a type")]
    MissingType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            InvalidActionError::MissingType.to_string(),
            "action must have a type"
        );
        assert_eq!(
            InvalidActionError::NotPlainObject(ValueKind::Array).to_string(),
            "action is not a plain object (got array)"
        );
        assert_eq!(
            ConfigurationError::DuplicateReducerKey("todos".to_string()).to_string(),
            "reducer key `todos` is registered more than once"
        );
    }
}
