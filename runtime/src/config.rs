//! Store configuration.
//!
//! `StoreConfig` is a plain value with builder-style setters. It derives
//! `serde` traits so applications can load it from whatever configuration
//! format they already use.

use serde::{Deserialize, Serialize};

/// What to do when `dispatch` is called while another dispatch is still
/// reducing or notifying listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReentrancyPolicy {
    /// Fail fast with `ConfigurationError::NestedDispatch`
    #[default]
    Reject,

    /// Let the nested dispatch run to completion inside the outer one
    ///
    /// The outer dispatch then commits the state its reducer computed from
    /// the pre-nested state, overwriting the nested result.
    Allow,
}

/// What to do when a listener panics during notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenerFailurePolicy {
    /// Catch the panic, keep notifying the remaining listeners, then return
    /// `StoreError::ListenersFailed`
    #[default]
    Collect,

    /// Let the first panic unwind out of `dispatch`; later listeners are not
    /// notified
    Propagate,
}

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use unistore_runtime::{ListenerFailurePolicy, ReentrancyPolicy, StoreConfig};
///
/// let config = StoreConfig::default()
///     .with_reentrancy(ReentrancyPolicy::Allow)
///     .with_listener_failures(ListenerFailurePolicy::Propagate);
///
/// let loaded: StoreConfig = serde_json::from_str(r#"{ "reentrancy": "allow", "listener_failures": "propagate" }"#)?;
/// assert_eq!(config, loaded);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Nested dispatch handling
    pub reentrancy: ReentrancyPolicy,
    /// Listener panic handling
    pub listener_failures: ListenerFailurePolicy,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(reentrancy: ReentrancyPolicy, listener_failures: ListenerFailurePolicy) -> Self {
        Self {
            reentrancy,
            listener_failures,
        }
    }

    /// Set the re-entrancy policy
    #[must_use]
    pub const fn with_reentrancy(mut self, policy: ReentrancyPolicy) -> Self {
        self.reentrancy = policy;
        self
    }

    /// Set the listener failure policy
    #[must_use]
    pub const fn with_listener_failures(mut self, policy: ListenerFailurePolicy) -> Self {
        self.listener_failures = policy;
        self
    }
}
