//! Middleware system
//!
//! Middleware sits between the caller of `dispatch` and the reducer,
//! allowing side effects, logging, validation, and action rewriting to be
//! handled in a composable way.
//!
//! ## Design
//!
//! ```text
//! dispatch(action) → m1 → m2 → … → raw dispatch → reducer → listeners
//! ```
//!
//! A middleware works in two stages:
//!
//! 1. [`Middleware::bind`] receives a [`MiddlewareApi`] (only `get_state` and
//!    `dispatch`) and returns a [`Link`];
//! 2. the link receives `next`, the dispatch of the rest of the chain, and
//!    returns the dispatch that runs this middleware.
//!
//! [`apply_middleware`] composes the links right to left around the store's
//! raw dispatch, so the first middleware listed is the first to see each
//! action. Each interceptor may:
//! - Inspect the action and current state
//! - Forward the action (or a different one) to `next`
//! - Dispatch new actions from the start of the chain
//! - Swallow the action by not calling `next`
//!
//! ## Example
//!
//! ```
//! use serde_json::{json, Value};
//! use unistore_runtime::{apply_middleware, create_store, from_fn, Dispatch, Middleware, MiddlewareApi, StoreError};
//!
//! // Turns bare strings into `{ "type": <string> }` and re-dispatches them.
//! let normalize = from_fn(|api: &MiddlewareApi<i64, Value>, next: &Dispatch<Value>, action: Value| {
//!     match action {
//!         Value::String(kind) => api.dispatch(json!({ "type": kind })),
//!         other => next(other),
//!     }
//! });
//!
//! let chain: Vec<Box<dyn Middleware<i64, Value>>> = vec![Box::new(normalize)];
//! let store = create_store(
//!     |count: &i64, action: &Value| if action["type"] == "INC" { count + 1 } else { *count },
//!     0,
//!     Some(Box::new(apply_middleware(chain))),
//! )?;
//!
//! store.dispatch(json!("INC"))?;
//! store.dispatch(json!({ "type": "INC" }))?;
//! assert_eq!(*store.get_state(), 2);
//! # Ok::<(), StoreError>(())
//! ```

use crate::enhancer::{StoreEnhancer, StoreFactory};
use crate::error::StoreError;
use crate::store::{Dispatch, Shared, Store};
use std::cell::OnceCell;
use std::rc::{Rc, Weak};
use unistore_core::{Action, BoxedReducer, ConfigurationError, compose};

/// Built-in tracing logger
pub mod logger;

/// Deferred actions
pub mod thunk;

/// The second stage of a middleware: wraps `next` into a new dispatch.
pub type Link<A> = Box<dyn Fn(Dispatch<A>) -> Dispatch<A>>;

type DispatchSlot<A> = Rc<OnceCell<Weak<dyn Fn(A) -> Result<(), StoreError>>>>;

/// The store capabilities handed to middleware
///
/// Only reading state and dispatching are exposed; middleware cannot
/// subscribe or touch the state cell.
pub struct MiddlewareApi<S, A> {
    shared: Rc<Shared<S, A>>,
    dispatch: DispatchSlot<A>,
}

impl<S, A> Clone for MiddlewareApi<S, A> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
            dispatch: Rc::clone(&self.dispatch),
        }
    }
}

impl<S: 'static, A: Action> MiddlewareApi<S, A> {
    const fn new(shared: Rc<Shared<S, A>>, dispatch: DispatchSlot<A>) -> Self {
        Self { shared, dispatch }
    }

    /// Current state snapshot
    #[must_use]
    pub fn get_state(&self) -> Rc<S> {
        self.shared.get_state()
    }

    /// Dispatch through the complete middleware chain
    ///
    /// The chain is looked up at call time, so links can hold on to the api
    /// before the chain exists.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::DispatchDuringConstruction`] when called from
    ///   [`Middleware::bind`] or a link, before `apply_middleware` finished
    /// - [`StoreError::StoreDropped`] once every store handle and dispatch
    ///   clone is gone
    /// - anything the dispatched action itself fails with
    pub fn dispatch(&self, action: A) -> Result<(), StoreError> {
        let Some(slot) = self.dispatch.get() else {
            tracing::warn!(?action, "Dispatch attempted while building the middleware chain");
            return Err(ConfigurationError::DispatchDuringConstruction.into());
        };
        let dispatch = slot.upgrade().ok_or(StoreError::StoreDropped)?;
        dispatch(action)
    }
}

/// Middleware trait - intercepts actions before they reach the reducer
///
/// Implementations usually build their link out of closures:
///
/// ```
/// use std::rc::Rc;
/// use unistore_core::ActionRecord;
/// use unistore_runtime::{Dispatch, Link, Middleware, MiddlewareApi};
///
/// /// Drops every action whose type is "IGNORED".
/// struct Filter;
///
/// impl<S: 'static> Middleware<S, ActionRecord> for Filter {
///     fn bind(&self, _api: MiddlewareApi<S, ActionRecord>) -> Link<ActionRecord> {
///         Box::new(|next: Dispatch<ActionRecord>| {
///             let dispatch: Dispatch<ActionRecord> = Rc::new(move |action: ActionRecord| {
///                 if action.is("IGNORED") { Ok(()) } else { next(action) }
///             });
///             dispatch
///         })
///     }
/// }
/// ```
pub trait Middleware<S, A> {
    /// First stage: bind to the store capabilities and return the link
    fn bind(&self, api: MiddlewareApi<S, A>) -> Link<A>;

    /// Name used in logs
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A middleware built from a single interceptor closure. Created by [`from_fn`].
pub struct FnMiddleware<F> {
    handler: Rc<F>,
}

/// Build a middleware from `|api, next, action| -> Result<(), StoreError>`
///
/// Annotate the closure's parameter types; see the module example.
#[must_use]
pub fn from_fn<S, A, F>(handler: F) -> FnMiddleware<F>
where
    F: Fn(&MiddlewareApi<S, A>, &Dispatch<A>, A) -> Result<(), StoreError> + 'static,
{
    FnMiddleware {
        handler: Rc::new(handler),
    }
}

impl<S, A, F> Middleware<S, A> for FnMiddleware<F>
where
    S: 'static,
    A: Action,
    F: Fn(&MiddlewareApi<S, A>, &Dispatch<A>, A) -> Result<(), StoreError> + 'static,
{
    fn bind(&self, api: MiddlewareApi<S, A>) -> Link<A> {
        let handler = Rc::clone(&self.handler);
        Box::new(move |next: Dispatch<A>| {
            let handler = Rc::clone(&handler);
            let api = api.clone();
            let dispatch: Dispatch<A> = Rc::new(move |action: A| handler(&api, &next, action));
            dispatch
        })
    }

    fn name(&self) -> &'static str {
        std::any::type_name::<F>()
    }
}

/// A middleware given directly in its curried closure form. Created by [`curried`].
pub struct CurriedMiddleware<F> {
    bind: F,
}

/// Adapt a `api -> next -> dispatch` closure into a [`Middleware`]
#[must_use]
pub fn curried<S, A, F>(bind: F) -> CurriedMiddleware<F>
where
    F: Fn(MiddlewareApi<S, A>) -> Link<A>,
{
    CurriedMiddleware { bind }
}

impl<S, A, F> Middleware<S, A> for CurriedMiddleware<F>
where
    F: Fn(MiddlewareApi<S, A>) -> Link<A>,
{
    fn bind(&self, api: MiddlewareApi<S, A>) -> Link<A> {
        (self.bind)(api)
    }

    fn name(&self) -> &'static str {
        std::any::type_name::<F>()
    }
}

/// The enhancer produced by [`apply_middleware`]
pub struct ApplyMiddleware<S, A> {
    middlewares: Vec<Box<dyn Middleware<S, A>>>,
}

/// Build an enhancer that routes `dispatch` through `middlewares`
///
/// The first middleware is the outermost: it sees every action first and
/// its `next` is the second middleware's dispatch. The last middleware's
/// `next` is the store's raw dispatch.
#[must_use]
pub fn apply_middleware<S, A>(middlewares: Vec<Box<dyn Middleware<S, A>>>) -> ApplyMiddleware<S, A> {
    ApplyMiddleware { middlewares }
}

impl<S: 'static, A: Action> StoreEnhancer<S, A> for ApplyMiddleware<S, A> {
    fn enhance(self: Box<Self>, create: StoreFactory<S, A>) -> StoreFactory<S, A> {
        Box::new(
            move |reducer: BoxedReducer<S, A>, preloaded_state: S| -> Result<Store<S, A>, StoreError> {
                let store = create(reducer, preloaded_state)?;

                // Filled once the chain exists; until then api.dispatch fails.
                let slot: DispatchSlot<A> = Rc::new(OnceCell::new());
                let api = MiddlewareApi::new(Rc::clone(store.shared()), Rc::clone(&slot));

                let chain: Vec<Link<A>> = self
                    .middlewares
                    .iter()
                    .map(|middleware| {
                        tracing::trace!(middleware = middleware.name(), "Binding middleware");
                        middleware.bind(api.clone())
                    })
                    .collect();

                let dispatch = compose(chain)(store.dispatcher());
                if slot.set(Rc::downgrade(&dispatch)).is_err() {
                    tracing::error!("Middleware dispatch slot was already filled");
                }

                tracing::debug!(
                    middlewares = self.middlewares.len(),
                    "Middleware chain installed"
                );
                Ok(store.with_dispatch(dispatch))
            },
        )
    }
}
