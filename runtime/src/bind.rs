//! Action-creator binding
//!
//! An action creator is a function from arguments to an action. Binding it
//! to a dispatch produces a function with the same arguments that builds
//! the action and dispatches it in one step, so UI-facing code never needs
//! the store itself.
//!
//! Creators take a single argument type `P`: `()` for creators without
//! arguments, a tuple for several.

use crate::error::StoreError;
use crate::store::Dispatch;
use std::rc::Rc;

/// A function producing an action from its arguments
pub type ActionCreator<P, A> = Box<dyn Fn(P) -> A>;

/// An action creator bound to a dispatch
pub struct BoundActionCreator<P> {
    key: String,
    call: Rc<dyn Fn(P) -> Result<(), StoreError>>,
}

impl<P> Clone for BoundActionCreator<P> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            call: Rc::clone(&self.call),
        }
    }
}

impl<P> BoundActionCreator<P> {
    /// Bind a single creator
    #[must_use]
    pub fn new<A: 'static>(key: impl Into<String>, creator: ActionCreator<P, A>, dispatch: Dispatch<A>) -> Self
    where
        P: 'static,
    {
        let key = key.into();
        let creator_key = key.clone();
        Self {
            key,
            call: Rc::new(move |args: P| {
                let action = creator(args);
                tracing::trace!(creator = %creator_key, "Dispatching bound action");
                dispatch(action)
            }),
        }
    }

    /// The key this creator was bound under
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Create the action and dispatch it
    ///
    /// # Errors
    ///
    /// Whatever the dispatch returns.
    pub fn call(&self, args: P) -> Result<(), StoreError> {
        (self.call)(args)
    }
}

/// A keyed set of bound action creators, in insertion order
///
/// Binding a key that is already present replaces the earlier creator in
/// place.
pub struct BoundActionCreators<P> {
    creators: Vec<BoundActionCreator<P>>,
}

impl<P> Clone for BoundActionCreators<P> {
    fn clone(&self) -> Self {
        Self {
            creators: self.creators.clone(),
        }
    }
}

impl<P> BoundActionCreators<P> {
    /// Look up a bound creator by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&BoundActionCreator<P>> {
        self.creators.iter().find(|creator| creator.key == key)
    }

    /// Create and dispatch the action for `key`
    ///
    /// # Errors
    ///
    /// - [`StoreError::UnknownActionCreator`] if nothing is bound under `key`
    /// - whatever the dispatch returns
    pub fn call(&self, key: &str, args: P) -> Result<(), StoreError> {
        self.get(key)
            .ok_or_else(|| StoreError::UnknownActionCreator(key.to_string()))?
            .call(args)
    }

    /// Bound keys, in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.creators.iter().map(BoundActionCreator::key)
    }

    /// Number of bound creators
    #[must_use]
    pub fn len(&self) -> usize {
        self.creators.len()
    }

    /// Whether no creator is bound
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.creators.is_empty()
    }

    fn insert(&mut self, bound: BoundActionCreator<P>) {
        match self.creators.iter_mut().find(|existing| existing.key == bound.key) {
            Some(existing) => *existing = bound,
            None => self.creators.push(bound),
        }
    }
}

/// Bind every creator in `creators` to `dispatch`
///
/// For a single creator, use [`BoundActionCreator::new`] directly.
///
/// # Example
///
/// ```
/// use unistore_core::ActionRecord;
/// use unistore_runtime::{bind_action_creators, ActionCreator, Store};
///
/// let store = Store::new(
///     |count: &i64, action: &ActionRecord| match action.field("by").and_then(|by| by.as_i64()) {
///         Some(by) if action.is("ADD") => count + by,
///         _ => *count,
///     },
///     0,
/// );
///
/// let add: ActionCreator<i64, ActionRecord> = Box::new(|by: i64| ActionRecord::new("ADD").with_field("by", by));
/// let bound = bind_action_creators([("add", add)], store.dispatcher());
///
/// bound.call("add", 5)?;
/// assert_eq!(*store.get_state(), 5);
/// assert!(bound.call("remove", 1).is_err());
/// # Ok::<(), unistore_runtime::StoreError>(())
/// ```
pub fn bind_action_creators<P, A, K, I>(creators: I, dispatch: Dispatch<A>) -> BoundActionCreators<P>
where
    P: 'static,
    A: 'static,
    K: Into<String>,
    I: IntoIterator<Item = (K, ActionCreator<P, A>)>,
{
    let mut bound = BoundActionCreators {
        creators: Vec::new(),
    };
    for (key, creator) in creators {
        bound.insert(BoundActionCreator::new(key, creator, Rc::clone(&dispatch)));
    }
    tracing::debug!(creators = bound.len(), "Bound action creators");
    bound
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::store::Store;
    use std::cell::RefCell;
    use unistore_core::Action;

    #[derive(Debug, Clone, PartialEq)]
    enum CounterAction {
        Increment,
        Decrement,
        Add(i64),
    }

    impl Action for CounterAction {}

    fn reducer(count: &i64, action: &CounterAction) -> i64 {
        match action {
            CounterAction::Increment => count + 1,
            CounterAction::Decrement => count - 1,
            CounterAction::Add(n) => count + n,
        }
    }

    fn recording_dispatch() -> (Dispatch<CounterAction>, Rc<RefCell<Vec<CounterAction>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        let dispatch: Dispatch<CounterAction> = Rc::new(move |action: CounterAction| {
            log.borrow_mut().push(action);
            Ok(())
        });
        (dispatch, seen)
    }

    #[test]
    fn test_bound_creator_dispatches_exactly_once() {
        let (dispatch, seen) = recording_dispatch();
        let inc: ActionCreator<(), CounterAction> = Box::new(|()| CounterAction::Increment);
        let dec: ActionCreator<(), CounterAction> = Box::new(|()| CounterAction::Decrement);

        let bound = bind_action_creators([("inc", inc), ("dec", dec)], dispatch);
        bound.call("inc", ()).unwrap();

        assert_eq!(*seen.borrow(), vec![CounterAction::Increment]);
    }

    #[test]
    fn test_bound_creator_receives_arguments() {
        let store = Store::new(reducer, 10);
        let add: ActionCreator<i64, CounterAction> = Box::new(CounterAction::Add);
        let bound = bind_action_creators([("add", add)], store.dispatcher());

        bound.get("add").unwrap().call(-4).unwrap();
        assert_eq!(*store.get_state(), 6);
    }

    #[test]
    fn test_unknown_key() {
        let (dispatch, seen) = recording_dispatch();
        let bound = bind_action_creators(Vec::<(String, ActionCreator<(), CounterAction>)>::new(), dispatch);

        assert!(bound.is_empty());
        assert_eq!(
            bound.call("missing", ()),
            Err(StoreError::UnknownActionCreator("missing".to_string()))
        );
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_later_duplicate_replaces_earlier() {
        let (dispatch, seen) = recording_dispatch();
        let first: ActionCreator<(), CounterAction> = Box::new(|()| CounterAction::Increment);
        let second: ActionCreator<(), CounterAction> = Box::new(|()| CounterAction::Decrement);
        let other: ActionCreator<(), CounterAction> = Box::new(|()| CounterAction::Add(0));

        let bound = bind_action_creators([("step", first), ("other", other), ("step", second)], dispatch);

        assert_eq!(bound.keys().collect::<Vec<_>>(), vec!["step", "other"]);
        bound.call("step", ()).unwrap();
        assert_eq!(*seen.borrow(), vec![CounterAction::Decrement]);
    }

    #[test]
    fn test_dispatch_errors_are_returned() {
        let failing: Dispatch<CounterAction> =
            Rc::new(|_action: CounterAction| Err(StoreError::Middleware("closed".to_string())));
        let inc: ActionCreator<(), CounterAction> = Box::new(|()| CounterAction::Increment);
        let bound = BoundActionCreator::new("inc", inc, failing);

        assert_eq!(bound.key(), "inc");
        assert_eq!(
            bound.call(()),
            Err(StoreError::Middleware("closed".to_string()))
        );
    }
}
