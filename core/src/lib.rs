//! # Unistore Core
//!
//! Core traits and types for the Unistore state container.
//!
//! This crate provides the pure building blocks of a unidirectional state
//! container: actions, reducers, reducer composition, and the function
//! composition used to build middleware chains. The `Store` itself lives in
//! `unistore-runtime`.
//!
//! ## Core Concepts
//!
//! - **State**: A value owned by the store and replaced wholesale on every dispatch
//! - **Action**: A message describing an intended state transition
//! - **Reducer**: Pure function `(State, Action) → State`
//! - **Middleware link**: Endomorphism over the dispatch function, folded with [`compose::compose`]
//!
//! ## Architecture Principles
//!
//! - Unidirectional Data Flow
//! - Single writer: state changes only through dispatched actions
//! - Typed actions at compile time, validated actions at dynamic boundaries
//!
//! ## Example
//!
//! ```
//! use unistore_core::{Action, Reducer};
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct TodoState {
//!     items: Vec<String>,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum TodoAction {
//!     Add(String),
//!     Clear,
//! }
//!
//! impl Action for TodoAction {}
//!
//! struct TodoReducer;
//!
//! impl Reducer<TodoState, TodoAction> for TodoReducer {
//!     fn reduce(&self, state: &TodoState, action: &TodoAction) -> TodoState {
//!         match action {
//!             TodoAction::Add(item) => {
//!                 let mut items = state.items.clone();
//!                 items.push(item.clone());
//!                 TodoState { items }
//!             },
//!             TodoAction::Clear => TodoState::default(),
//!         }
//!     }
//! }
//!
//! let state = TodoReducer.reduce(&TodoState::default(), &TodoAction::Add("milk".into()));
//! assert_eq!(state.items, vec!["milk".to_string()]);
//! ```

/// Action trait and the dynamic action record
pub mod action;

/// Right-to-left function composition
pub mod compose;

/// Reducer composition (`combine_reducers`, `scope_reducer`)
pub mod composition;

/// Error taxonomy
pub mod error;

/// Plain-object classification for dynamic actions
pub mod plain;

/// Reducer module - The core trait for state transitions
///
/// Reducers are pure functions: `(State, Action) → State`.
///
/// They must be total: every action, including ones the reducer does not
/// recognise, yields a state (usually an unchanged copy).
pub mod reducer {
    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `S`: The state type this reducer operates on
    /// - `A`: The action type this reducer processes
    ///
    /// Any `Fn(&S, &A) -> S` is a reducer. Annotate closure parameters so the
    /// closure is general over the reference lifetimes:
    ///
    /// ```
    /// use unistore_core::Reducer;
    ///
    /// let add = |total: &i32, n: &i32| total + n;
    /// assert_eq!(add.reduce(&1, &2), 3);
    /// ```
    pub trait Reducer<S, A> {
        /// Compute the next state from the current state and an action
        ///
        /// This must not mutate anything and must not fail for actions the
        /// reducer is expected to handle.
        fn reduce(&self, state: &S, action: &A) -> S;
    }

    impl<S, A, F> Reducer<S, A> for F
    where
        F: Fn(&S, &A) -> S,
    {
        fn reduce(&self, state: &S, action: &A) -> S {
            self(state, action)
        }
    }

    /// A type-erased reducer, as stored by the runtime and by
    /// [`combine_reducers`](crate::composition::combine_reducers).
    pub type BoxedReducer<S, A> = Box<dyn Reducer<S, A>>;
}

// Re-export commonly used types
pub use action::{Action, ActionRecord};
pub use compose::{Endomorphism, compose};
pub use composition::{CombinedReducer, CombinedState, combine_reducers, scope_reducer};
pub use error::{ConfigurationError, InvalidActionError};
pub use plain::{ValueKind, is_plain_object};
pub use reducer::{BoxedReducer, Reducer};
