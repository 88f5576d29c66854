//! # Counter Demo
//!
//! A simple counter demonstrating the Unistore state container.
//!
//! This demo showcases:
//! - Reducers combined under keys
//! - A store built with logger and thunk middleware
//! - Deferred actions that read state before dispatching
//! - Bound action creators
//!
//! ## Example
//!
//! ```
//! use counter::{create_counter_store, CounterAction};
//!
//! let store = create_counter_store()?;
//!
//! store.dispatch(CounterAction::Increment)?;
//! store.dispatch(counter::increment_if_odd())?;
//!
//! assert_eq!(counter::count(&store.get_state()), 2);
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::fmt;
use unistore_core::{Action, BoxedReducer, CombinedReducer, CombinedState, ConfigurationError, combine_reducers};
use unistore_runtime::{
    ActionCreator, BoundActionCreators, Dispatch, LoggerMiddleware, Middleware, MiddlewareApi, Store,
    StoreError, Thunk, ThunkAction, ThunkMiddleware, apply_middleware, bind_action_creators, create_store,
};

/// Key of the current count
pub const COUNT: &str = "count";

/// Key of the number of actions the reducers have seen
pub const APPLIED: &str = "applied";

/// Counter state
///
/// One integer per key: the count itself under [`COUNT`] and a running
/// total of reduced actions under [`APPLIED`].
pub type CounterState = CombinedState<i64>;

/// Counter actions
pub enum CounterAction {
    /// Increment the counter by 1
    Increment,
    /// Decrement the counter by 1
    Decrement,
    /// Add an arbitrary amount
    IncrementBy(i64),
    /// Reset the counter to 0
    Reset,
    /// Work run by the thunk middleware instead of the reducers
    Deferred(Thunk<CounterState, CounterAction>),
}

impl fmt::Debug for CounterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Increment => f.write_str("Increment"),
            Self::Decrement => f.write_str("Decrement"),
            Self::IncrementBy(amount) => f.debug_tuple("IncrementBy").field(amount).finish(),
            Self::Reset => f.write_str("Reset"),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl Action for CounterAction {}

impl ThunkAction<CounterState, Self> for CounterAction {
    fn into_thunk(self) -> Result<Thunk<CounterState, Self>, Self> {
        match self {
            Self::Deferred(thunk) => Ok(thunk),
            other => Err(other),
        }
    }
}

/// Reducer for the [`COUNT`] slice
#[must_use]
pub fn count_reducer(count: &i64, action: &CounterAction) -> i64 {
    match action {
        CounterAction::Increment => count + 1,
        CounterAction::Decrement => count - 1,
        CounterAction::IncrementBy(amount) => count + amount,
        CounterAction::Reset => 0,
        CounterAction::Deferred(_) => *count,
    }
}

/// Reducer for the [`APPLIED`] slice
#[must_use]
pub fn applied_reducer(applied: &i64, _action: &CounterAction) -> i64 {
    applied + 1
}

/// The root reducer
///
/// # Errors
///
/// Only if the slice keys collide, which they do not.
pub fn root_reducer() -> Result<CombinedReducer<i64, CounterAction>, ConfigurationError> {
    let count: BoxedReducer<i64, CounterAction> = Box::new(count_reducer);
    let applied: BoxedReducer<i64, CounterAction> = Box::new(applied_reducer);
    combine_reducers([(COUNT, count), (APPLIED, applied)])
}

/// Current count of a state snapshot
#[must_use]
pub fn count(state: &CounterState) -> i64 {
    state.get(COUNT).copied().unwrap_or_default()
}

/// A deferred action incrementing only when the count is odd
#[must_use]
pub fn increment_if_odd() -> CounterAction {
    CounterAction::Deferred(Box::new(|api: &MiddlewareApi<CounterState, CounterAction>| {
        if count(&api.get_state()) % 2 == 0 {
            tracing::debug!("Count is even, skipping increment");
            return Ok(());
        }
        api.dispatch(CounterAction::Increment)
    }))
}

/// A deferred action dispatching `Increment` `times` times
#[must_use]
pub fn increment_repeatedly(times: usize) -> CounterAction {
    CounterAction::Deferred(Box::new(move |api: &MiddlewareApi<CounterState, CounterAction>| {
        (0..times).try_for_each(|_| api.dispatch(CounterAction::Increment))
    }))
}

/// Build the demo store: logger outermost, then thunk, then the reducers
///
/// # Errors
///
/// Returns an error if the reducers or middleware cannot be wired up.
pub fn create_counter_store() -> Result<Store<CounterState, CounterAction>, StoreError> {
    let middleware: Vec<Box<dyn Middleware<CounterState, CounterAction>>> = vec![
        Box::new(LoggerMiddleware::new().with_state()),
        Box::new(ThunkMiddleware::new()),
    ];
    create_store(
        root_reducer()?,
        CounterState::new(),
        Some(Box::new(apply_middleware(middleware))),
    )
}

/// Action creators without arguments, bound to `dispatch`
///
/// Keys: `increment`, `decrement`, `reset`, `increment_if_odd`.
#[must_use]
pub fn bind_counter_actions(dispatch: Dispatch<CounterAction>) -> BoundActionCreators<()> {
    let creators: [(&str, ActionCreator<(), CounterAction>); 4] = [
        ("increment", Box::new(|()| CounterAction::Increment)),
        ("decrement", Box::new(|()| CounterAction::Decrement)),
        ("reset", Box::new(|()| CounterAction::Reset)),
        ("increment_if_odd", Box::new(|()| increment_if_odd())),
    ];
    bind_action_creators(creators, dispatch)
}
