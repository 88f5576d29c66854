//! Store enhancers
//!
//! An enhancer wraps the store-construction capability: it receives a
//! [`StoreFactory`] and returns another one. The returned factory usually
//! calls the one it wrapped and then decorates the resulting store, the way
//! [`apply_middleware`](crate::apply_middleware) replaces `dispatch`.
//!
//! Enhancers compose like ordinary functions with [`compose_enhancers`]: the
//! first enhancer in the list is the outermost wrapper.

use crate::error::StoreError;
use crate::store::Store;
use unistore_core::BoxedReducer;

/// The store-construction capability: `(reducer, preloaded_state) -> Store`.
pub type StoreFactory<S, A> =
    Box<dyn FnOnce(BoxedReducer<S, A>, S) -> Result<Store<S, A>, StoreError>>;

/// Wraps store construction to add a cross-cutting capability
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use unistore_core::{ActionRecord, BoxedReducer};
/// use unistore_runtime::{create_store, enhancer_fn, Store, StoreError, StoreFactory};
///
/// let created = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&created);
///
/// // Counts how many stores were built through it.
/// let counting = enhancer_fn(move |create: StoreFactory<i32, ActionRecord>| -> StoreFactory<i32, ActionRecord> {
///     let counter = Rc::clone(&counter);
///     Box::new(move |reducer: BoxedReducer<i32, ActionRecord>, state: i32| -> Result<Store<i32, ActionRecord>, StoreError> {
///         counter.set(counter.get() + 1);
///         create(reducer, state)
///     })
/// });
///
/// let store = create_store(|n: &i32, _: &ActionRecord| n + 1, 0, Some(Box::new(counting)))?;
/// store.dispatch(ActionRecord::new("TICK"))?;
///
/// assert_eq!(created.get(), 1);
/// assert_eq!(*store.get_state(), 1);
/// # Ok::<(), StoreError>(())
/// ```
pub trait StoreEnhancer<S, A> {
    /// Wrap `create`, returning the enhanced factory
    fn enhance(self: Box<Self>, create: StoreFactory<S, A>) -> StoreFactory<S, A>;
}

/// An enhancer built from a closure. Created by [`enhancer_fn`].
pub struct FnEnhancer<F> {
    enhance: F,
}

/// Build an enhancer from a `StoreFactory -> StoreFactory` closure
#[must_use]
pub fn enhancer_fn<S, A, F>(enhance: F) -> FnEnhancer<F>
where
    F: FnOnce(StoreFactory<S, A>) -> StoreFactory<S, A>,
{
    FnEnhancer { enhance }
}

impl<S, A, F> StoreEnhancer<S, A> for FnEnhancer<F>
where
    F: FnOnce(StoreFactory<S, A>) -> StoreFactory<S, A>,
{
    fn enhance(self: Box<Self>, create: StoreFactory<S, A>) -> StoreFactory<S, A> {
        (self.enhance)(create)
    }
}

/// Several enhancers applied as one. Created by [`compose_enhancers`].
pub struct ComposedEnhancer<S, A> {
    enhancers: Vec<Box<dyn StoreEnhancer<S, A>>>,
}

/// Compose enhancers right to left
///
/// `compose_enhancers(vec![e1, e2, e3])` enhances a factory `f` as
/// `e1(e2(e3(f)))`, so `e1` sees construction first and decorates the store
/// last. An empty list leaves the factory unchanged.
#[must_use]
pub fn compose_enhancers<S, A>(enhancers: Vec<Box<dyn StoreEnhancer<S, A>>>) -> ComposedEnhancer<S, A> {
    ComposedEnhancer { enhancers }
}

impl<S, A> StoreEnhancer<S, A> for ComposedEnhancer<S, A> {
    fn enhance(self: Box<Self>, create: StoreFactory<S, A>) -> StoreFactory<S, A> {
        self.enhancers
            .into_iter()
            .rev()
            .fold(create, |factory, enhancer| enhancer.enhance(factory))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::store::create_store;
    use std::cell::RefCell;
    use std::rc::Rc;
    use unistore_core::ActionRecord;

    type Trace = Rc<RefCell<Vec<String>>>;

    /// Records "<name>:build" before construction and "<name>:done" after.
    fn tracing_enhancer(name: &'static str, trace: &Trace) -> Box<dyn StoreEnhancer<i32, ActionRecord>> {
        let trace = Rc::clone(trace);
        Box::new(enhancer_fn(
            move |create: StoreFactory<i32, ActionRecord>| -> StoreFactory<i32, ActionRecord> {
                Box::new(
                    move |reducer: BoxedReducer<i32, ActionRecord>,
                          state: i32|
                          -> Result<Store<i32, ActionRecord>, StoreError> {
                        trace.borrow_mut().push(format!("{name}:build"));
                        let store = create(reducer, state)?;
                        trace.borrow_mut().push(format!("{name}:done"));
                        Ok(store)
                    },
                )
            },
        ))
    }

    fn reducer(n: &i32, _: &ActionRecord) -> i32 {
        n + 1
    }

    #[test]
    fn test_first_enhancer_is_outermost() {
        let trace: Trace = Rc::default();
        let composed = compose_enhancers(vec![
            tracing_enhancer("outer", &trace),
            tracing_enhancer("inner", &trace),
        ]);

        let store = create_store(reducer, 0, Some(Box::new(composed))).unwrap();
        store.dispatch(ActionRecord::new("GO")).unwrap();

        assert_eq!(
            *trace.borrow(),
            vec!["outer:build", "inner:build", "inner:done", "outer:done"]
        );
        assert_eq!(*store.get_state(), 1);
    }

    #[test]
    fn test_empty_composition_is_identity() {
        let composed = compose_enhancers::<i32, ActionRecord>(vec![]);
        let store = create_store(reducer, 41, Some(Box::new(composed))).unwrap();
        store.dispatch(ActionRecord::new("GO")).unwrap();
        assert_eq!(*store.get_state(), 42);
    }

    #[test]
    fn test_enhancer_errors_propagate() {
        let failing = enhancer_fn(
            |_create: StoreFactory<i32, ActionRecord>| -> StoreFactory<i32, ActionRecord> {
                Box::new(
                    |_reducer: BoxedReducer<i32, ActionRecord>,
                     _state: i32|
                     -> Result<Store<i32, ActionRecord>, StoreError> {
                        Err(StoreError::Middleware("refused".to_string()))
                    },
                )
            },
        );

        let result = create_store(reducer, 0, Some(Box::new(failing)));
        assert!(matches!(result, Err(StoreError::Middleware(reason)) if reason == "refused"));
    }
}
