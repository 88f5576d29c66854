//! # Unistore Runtime
//!
//! Runtime implementation for the Unistore state container.
//!
//! This crate provides the Store that owns application state and the
//! pipeline every action travels through on its way to the reducer.
//!
//! ## Core Components
//!
//! - **Store**: Owns the state cell and listener registry; exposes
//!   `get_state`, `dispatch` and `subscribe`
//! - **Enhancers**: Wrap store construction to add cross-cutting capability
//! - **Middleware**: Interceptors composed around the raw dispatch
//! - **Binder**: Turns action creators into functions that dispatch
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use unistore_core::Action;
//! use unistore_runtime::{apply_middleware, create_store, LoggerMiddleware, Middleware};
//!
//! #[derive(Debug)]
//! enum CounterAction {
//!     Increment,
//!     Decrement,
//! }
//!
//! impl Action for CounterAction {}
//!
//! let reducer = |count: &i64, action: &CounterAction| match action {
//!     CounterAction::Increment => count + 1,
//!     CounterAction::Decrement => count - 1,
//! };
//!
//! let logger: Box<dyn Middleware<i64, CounterAction>> = Box::new(LoggerMiddleware::new());
//! let store = create_store(reducer, 0, Some(Box::new(apply_middleware(vec![logger]))))?;
//!
//! let notified = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&notified);
//! store.subscribe(move || counter.set(counter.get() + 1));
//!
//! store.dispatch(CounterAction::Increment)?;
//! store.dispatch(CounterAction::Increment)?;
//! store.dispatch(CounterAction::Decrement)?;
//!
//! assert_eq!(*store.get_state(), 1);
//! assert_eq!(notified.get(), 3);
//! # Ok::<(), unistore_runtime::StoreError>(())
//! ```

/// Action-creator binding
pub mod bind;

/// Store configuration
pub mod config;

/// Store enhancers and enhancer composition
pub mod enhancer;

/// Middleware pipeline and built-in middleware
pub mod middleware;

/// The Store
pub mod store;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;
    use unistore_core::{ConfigurationError, InvalidActionError};

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// The store or its pipeline was wired up or driven incorrectly
        #[error(transparent)]
        Configuration(#[from] ConfigurationError),

        /// A dynamic action failed validation
        ///
        /// Raised before the reducer runs; state and listeners are untouched.
        #[error(transparent)]
        InvalidAction(#[from] InvalidActionError),

        /// One or more listeners panicked during notification
        ///
        /// The state transition has already been committed and every other
        /// listener has been notified.
        #[error("{} listener(s) failed during notification", .0.len())]
        ListenersFailed(Vec<ListenerFailure>),

        /// A middleware refused the action
        #[error("middleware rejected the action: {0}")]
        Middleware(String),

        /// `BoundActionCreators::call` was given a key with no creator
        #[error("no action creator bound under `{0}`")]
        UnknownActionCreator(String),

        /// Every handle to the store's dispatch has been dropped
        #[error("store has been dropped")]
        StoreDropped,
    }

    /// A listener that panicked while being notified
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ListenerFailure {
        /// Position of the listener in registration order
        pub index: usize,

        /// The panic message, when it was a string
        pub message: String,
    }
}

pub use bind::{ActionCreator, BoundActionCreator, BoundActionCreators, bind_action_creators};
pub use config::{ListenerFailurePolicy, ReentrancyPolicy, StoreConfig};
pub use enhancer::{ComposedEnhancer, StoreEnhancer, StoreFactory, compose_enhancers, enhancer_fn};
pub use error::{ListenerFailure, StoreError};
pub use middleware::{
    ApplyMiddleware, Link, Middleware, MiddlewareApi, apply_middleware, curried, from_fn,
    logger::LoggerMiddleware,
    thunk::{Thunk, ThunkAction, ThunkMiddleware},
};
pub use store::{Dispatch, Store, create_store, create_store_with_config};
