//! Reducer composition utilities
//!
//! This module provides two ways of building one reducer out of several:
//! - **`combine_reducers`**: Give each named sub-reducer its own slice of a
//!   keyed state
//! - **`scope_reducer`**: Focus a reducer on one field of a larger state
//!
//! # Examples
//!
//! ## Combining Reducers
//!
//! ```
//! use unistore_core::composition::{combine_reducers, CombinedState};
//! use unistore_core::reducer::{BoxedReducer, Reducer};
//!
//! #[derive(Debug)]
//! enum Action {
//!     Increment,
//!     Reset,
//! }
//!
//! let counter: BoxedReducer<i64, Action> = Box::new(|count: &i64, action: &Action| match action {
//!     Action::Increment => count + 1,
//!     Action::Reset => 0,
//! });
//! let dispatched: BoxedReducer<i64, Action> = Box::new(|n: &i64, _: &Action| n + 1);
//!
//! let root = combine_reducers([("counter", counter), ("dispatched", dispatched)]).unwrap();
//!
//! let state = root.reduce(&CombinedState::default(), &Action::Increment);
//! assert_eq!(state.get("counter"), Some(&1));
//!
//! let state = root.reduce(&state, &Action::Reset);
//! assert_eq!(state.get("counter"), Some(&0));
//! assert_eq!(state.get("dispatched"), Some(&2));
//! ```

use crate::error::ConfigurationError;
use crate::reducer::{BoxedReducer, Reducer};
use std::marker::PhantomData;

/// State produced by a [`CombinedReducer`]: one sub-state per key.
///
/// Keys keep their insertion order, which is also the order sub-reducers run
/// in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedState<S> {
    entries: Vec<(String, S)>,
}

impl<S> CombinedState<S> {
    /// Create an empty state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add or replace the sub-state under `key`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: S) -> Self {
        let key = key.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Look up the sub-state under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&S> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Iterate over `(key, sub-state)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &S)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Iterate over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S> Default for CombinedState<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, S> FromIterator<(K, S)> for CombinedState<S> {
    fn from_iter<I: IntoIterator<Item = (K, S)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |state, (key, value)| state.with(key, value))
    }
}

/// Combine named sub-reducers into one reducer over a [`CombinedState`].
///
/// Each sub-reducer receives only the sub-state stored under its own key
/// (or `S::default()` when the key is missing) and produces the new value for
/// that key. Keys of the incoming state that have no reducer are dropped.
///
/// # Errors
///
/// Returns [`ConfigurationError::DuplicateReducerKey`] if two reducers share a
/// key. The check happens here, not on first dispatch.
pub fn combine_reducers<S, A, K, I>(reducers: I) -> Result<CombinedReducer<S, A>, ConfigurationError>
where
    K: Into<String>,
    I: IntoIterator<Item = (K, BoxedReducer<S, A>)>,
{
    let mut entries: Vec<(String, BoxedReducer<S, A>)> = Vec::new();

    for (key, reducer) in reducers {
        let key = key.into();
        if entries.iter().any(|(existing, _)| *existing == key) {
            return Err(ConfigurationError::DuplicateReducerKey(key));
        }
        entries.push((key, reducer));
    }

    Ok(CombinedReducer { reducers: entries })
}

/// A reducer built from keyed sub-reducers.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A> {
    reducers: Vec<(String, BoxedReducer<S, A>)>,
}

impl<S, A> CombinedReducer<S, A> {
    /// Keys in the order their reducers run.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.reducers.iter().map(|(key, _)| key.as_str())
    }
}

impl<S: Default, A> Reducer<CombinedState<S>, A> for CombinedReducer<S, A> {
    fn reduce(&self, state: &CombinedState<S>, action: &A) -> CombinedState<S> {
        // Always a fresh state, even when no sub-state changed.
        let entries = self
            .reducers
            .iter()
            .map(|(key, reducer)| {
                let next = match state.get(key) {
                    Some(sub_state) => reducer.reduce(sub_state, action),
                    None => reducer.reduce(&S::default(), action),
                };
                (key.clone(), next)
            })
            .collect();

        CombinedState { entries }
    }
}

/// Scopes a reducer to operate on a subset of a larger state.
///
/// This allows you to reuse reducers designed for smaller state types
/// within a larger application state, including sub-states of different
/// types, which [`combine_reducers`] cannot mix.
///
/// # Examples
///
/// ```
/// use unistore_core::composition::scope_reducer;
/// use unistore_core::reducer::Reducer;
///
/// #[derive(Clone, Default)]
/// struct AppState {
///     count: i32,
///     title: String,
/// }
///
/// let scoped = scope_reducer(
///     |count: &i32, delta: &i32| count + delta,
///     |app: &AppState| &app.count,
///     |app: &AppState, count: i32| AppState { count, ..app.clone() },
/// );
///
/// let state = AppState { count: 1, title: "totals".to_string() };
/// let state = scoped.reduce(&state, &4);
/// assert_eq!(state.count, 5);
/// assert_eq!(state.title, "totals");
/// ```
pub fn scope_reducer<S, SubS, A, R>(
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&S, SubS) -> S,
) -> ScopedReducer<S, SubS, A, R>
where
    R: Reducer<SubS, A>,
{
    ScopedReducer {
        reducer,
        get_state,
        set_state,
        _phantom: PhantomData,
    }
}

/// A scoped reducer that operates on a subset of state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, A, R>
where
    R: Reducer<SubS, A>,
{
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&S, SubS) -> S,
    _phantom: PhantomData<fn(&A)>,
}

impl<S, SubS, A, R> Reducer<S, A> for ScopedReducer<S, SubS, A, R>
where
    R: Reducer<SubS, A>,
{
    fn reduce(&self, state: &S, action: &A) -> S {
        let sub_state = self.reducer.reduce((self.get_state)(state), action);
        (self.set_state)(state, sub_state)
    }
}
