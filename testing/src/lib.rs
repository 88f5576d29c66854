//! # Unistore Testing
//!
//! Testing utilities and helpers for the Unistore state container.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness for reducers
//! - [`CallTrace`]: shared call log, with listeners and a middleware that
//!   record into it
//! - Property-based testing strategies for dynamic actions
//!
//! ## Example
//!
//! ```
//! use serde_json::{json, Value};
//! use unistore_runtime::{apply_middleware, create_store, Middleware};
//! use unistore_testing::CallTrace;
//!
//! let trace = CallTrace::new();
//! let chain: Vec<Box<dyn Middleware<i64, Value>>> = vec![Box::new(trace.middleware("log"))];
//! let store = create_store(
//!     |count: &i64, _: &Value| count + 1,
//!     0,
//!     Some(Box::new(apply_middleware(chain))),
//! )?;
//! store.subscribe(trace.listener("view"));
//!
//! store.dispatch(json!({ "type": "TICK" }))?;
//!
//! trace.assert_entries(&["log:before", "view", "log:after"]);
//! # Ok::<(), unistore_runtime::StoreError>(())
//! ```


/// Call recording for middleware and listener ordering tests
pub mod trace;

/// Property-based testing utilities
///
/// Strategies producing dynamic (`serde_json::Value`) actions, valid and
/// invalid, for use with `proptest!`.
pub mod properties {
    use proptest::prelude::*;
    use serde_json::{Map, Value, json};

    /// Action types understood by [`counter_reducer`]
    pub const ACTION_TYPES: [&str; 4] = ["INC", "DEC", "ADD", "NOOP"];

    /// One of [`ACTION_TYPES`]
    pub fn arb_action_type() -> impl Strategy<Value = &'static str> {
        prop::sample::select(ACTION_TYPES.to_vec())
    }

    /// A well-formed action: `{ "type": <type>, "amount": <small int> }`
    pub fn arb_json_action() -> impl Strategy<Value = Value> {
        (arb_action_type(), -100_i64..100).prop_map(|(kind, amount)| json!({ "type": kind, "amount": amount }))
    }

    /// A sequence of well-formed actions
    pub fn arb_json_actions(max_len: usize) -> impl Strategy<Value = Vec<Value>> {
        prop::collection::vec(arb_json_action(), 0..max_len)
    }

    fn arb_scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            any::<f64>().prop_map(Value::from),
            ".*".prop_map(Value::String),
        ]
    }

    /// Any JSON value that is not an object
    pub fn arb_non_object() -> impl Strategy<Value = Value> {
        prop_oneof![
            4 => arb_scalar(),
            1 => prop::collection::vec(arb_scalar(), 0..4).prop_map(Value::Array),
        ]
    }

    /// An object without a `type` key
    pub fn arb_untyped_object() -> impl Strategy<Value = Value> {
        prop::collection::btree_map("[a-s]{1,8}", any::<i64>(), 0..4).prop_map(|fields| {
            Value::Object(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect::<Map<String, Value>>(),
            )
        })
    }

    /// Reference reducer for the actions produced by [`arb_json_action`]
    #[must_use]
    pub fn counter_reducer(count: &i64, action: &Value) -> i64 {
        let amount = action["amount"].as_i64().unwrap_or_default();
        match action["type"].as_str() {
            Some("INC") => count + 1,
            Some("DEC") => count - 1,
            Some("ADD") => count + amount,
            _ => *count,
        }
    }
}

/// Install a `tracing` subscriber that writes through the test harness
///
/// Filtered by `RUST_LOG`. Safe to call from every test; only the first call
/// installs anything.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use reducer_test::ReducerTest;
pub use trace::{CallTrace, TraceMiddleware};
