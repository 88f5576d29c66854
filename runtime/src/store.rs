//! The Store - owner of application state
//!
//! A [`Store`] holds exactly one state value, an ordered listener registry,
//! and the reducer that computes every state transition. The only way to
//! change the state is to [`dispatch`](Store::dispatch) an action.
//!
//! ```text
//! dispatch(action)
//!   → middleware chain (optional, see `apply_middleware`)
//!   → validate → reduce → replace state → notify listeners
//! ```
//!
//! The store is single-threaded: handles are cheap `Rc` clones and are not
//! `Send`.

use crate::config::{ListenerFailurePolicy, ReentrancyPolicy, StoreConfig};
use crate::enhancer::{StoreEnhancer, StoreFactory};
use crate::error::{ListenerFailure, StoreError};
use smallvec::SmallVec;
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use unistore_core::{Action, BoxedReducer, ConfigurationError, Reducer};

/// A dispatch function: the raw store dispatch, or one wrapped by middleware.
pub type Dispatch<A> = Rc<dyn Fn(A) -> Result<(), StoreError>>;

type Listener = Rc<dyn Fn()>;

/// State, registry, and reducer shared by every handle of one store.
pub(crate) struct Shared<S, A> {
    reducer: BoxedReducer<S, A>,
    state: RefCell<Rc<S>>,
    listeners: RefCell<Vec<Listener>>,
    dispatching: Cell<bool>,
    config: StoreConfig,
}

impl<S: 'static, A: Action> Shared<S, A> {
    pub(crate) fn get_state(&self) -> Rc<S> {
        Rc::clone(&self.state.borrow())
    }

    /// The raw dispatch: validate, reduce, replace, notify.
    ///
    /// No borrow of the state cell or the registry is held while the reducer
    /// or a listener runs.
    #[tracing::instrument(skip(self, action), name = "store_dispatch")]
    fn dispatch(&self, action: A) -> Result<(), StoreError> {
        metrics::counter!("store.dispatch.total").increment(1);

        if let Err(error) = action.validate() {
            metrics::counter!("store.dispatch.rejected").increment(1);
            tracing::warn!(%error, ?action, "Rejected invalid action");
            return Err(error.into());
        }

        let _guard = DispatchGuard::enter(&self.dispatching, self.config.reentrancy)
            .inspect_err(|_| {
                metrics::counter!("store.dispatch.rejected").increment(1);
                tracing::warn!(?action, "Rejected nested dispatch");
            })?;

        tracing::debug!(?action, "Processing action");

        let current = self.get_state();
        let next = {
            let _span = tracing::debug_span!("reducer_execution").entered();
            self.reducer.reduce(&current, &action)
        };
        *self.state.borrow_mut() = Rc::new(next);

        self.notify()
    }

    fn notify(&self) -> Result<(), StoreError> {
        // Listeners subscribed from inside a listener wait for the next cycle.
        let snapshot: SmallVec<[Listener; 8]> = self.listeners.borrow().iter().cloned().collect();
        tracing::trace!(listeners = snapshot.len(), "Notifying listeners");

        let mut failures = Vec::new();
        for (index, listener) in snapshot.iter().enumerate() {
            match self.config.listener_failures {
                ListenerFailurePolicy::Propagate => listener(),
                ListenerFailurePolicy::Collect => {
                    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| listener())) {
                        let message = panic_message(payload.as_ref());
                        metrics::counter!("store.listeners.failed").increment(1);
                        tracing::warn!(index, %message, "Listener failed");
                        failures.push(ListenerFailure { index, message });
                    }
                },
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(StoreError::ListenersFailed(failures))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "listener panicked".to_string())
}

/// Marks a dispatch as in flight; restores the previous mark on drop,
/// including when the reducer panics.
struct DispatchGuard<'a> {
    flag: &'a Cell<bool>,
    previous: bool,
}

impl<'a> DispatchGuard<'a> {
    fn enter(flag: &'a Cell<bool>, policy: ReentrancyPolicy) -> Result<Self, ConfigurationError> {
        let previous = flag.get();
        if previous && policy == ReentrancyPolicy::Reject {
            return Err(ConfigurationError::NestedDispatch);
        }
        flag.set(true);
        Ok(Self { flag, previous })
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(self.previous);
    }
}

/// The Store - owner of state, listeners, and the dispatch pipeline
///
/// # Type Parameters
///
/// - `S`: State type
/// - `A`: Action type
///
/// Cloning a `Store` yields another handle to the same state.
///
/// # Example
///
/// ```
/// use unistore_core::ActionRecord;
/// use unistore_runtime::Store;
///
/// let store = Store::new(
///     |count: &i64, action: &ActionRecord| if action.is("ADD") { count + 1 } else { *count },
///     0,
/// );
///
/// store.dispatch(ActionRecord::new("ADD"))?;
/// store.dispatch(ActionRecord::new("UNKNOWN"))?;
/// assert_eq!(store.state(|count| *count), 1);
/// # Ok::<(), unistore_runtime::StoreError>(())
/// ```
pub struct Store<S, A> {
    shared: Rc<Shared<S, A>>,
    dispatch: Dispatch<A>,
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
            dispatch: Rc::clone(&self.dispatch),
        }
    }
}

impl<S: 'static, A: Action> Store<S, A> {
    /// Create a new store with a reducer and an initial state
    ///
    /// Uses the default [`StoreConfig`].
    #[must_use]
    pub fn new<R>(reducer: R, preloaded_state: S) -> Self
    where
        R: Reducer<S, A> + 'static,
    {
        Self::with_config(reducer, preloaded_state, StoreConfig::default())
    }

    /// Create a new store with custom configuration
    #[must_use]
    pub fn with_config<R>(reducer: R, preloaded_state: S, config: StoreConfig) -> Self
    where
        R: Reducer<S, A> + 'static,
    {
        Self::from_boxed(Box::new(reducer), preloaded_state, config)
    }

    fn from_boxed(reducer: BoxedReducer<S, A>, preloaded_state: S, config: StoreConfig) -> Self {
        let shared = Rc::new(Shared {
            reducer,
            state: RefCell::new(Rc::new(preloaded_state)),
            listeners: RefCell::new(Vec::new()),
            dispatching: Cell::new(false),
            config,
        });

        let raw = Rc::clone(&shared);
        let dispatch: Dispatch<A> = Rc::new(move |action: A| raw.dispatch(action));

        Self { shared, dispatch }
    }

    /// The base store-construction capability handed to enhancers
    ///
    /// Calling it builds a plain store with the given configuration and no
    /// middleware.
    #[must_use]
    pub fn factory(config: StoreConfig) -> StoreFactory<S, A> {
        Box::new(
            move |reducer: BoxedReducer<S, A>, preloaded_state: S| -> Result<Self, StoreError> {
                Ok(Self::from_boxed(reducer, preloaded_state, config))
            },
        )
    }

    /// Current state snapshot
    ///
    /// The returned `Rc` keeps this snapshot alive; later dispatches replace
    /// the store's state without affecting it.
    #[must_use]
    pub fn get_state(&self) -> Rc<S> {
        self.shared.get_state()
    }

    /// Read the current state through a closure
    pub fn state<T>(&self, f: impl FnOnce(&S) -> T) -> T {
        f(&self.shared.get_state())
    }

    /// Dispatch an action
    ///
    /// Goes through the middleware chain if one was installed, then through
    /// the raw dispatch: validation, reduction, and synchronous notification
    /// of every listener in registration order.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidAction`] if the action fails validation; state
    ///   and listeners are untouched
    /// - [`StoreError::Configuration`] with
    ///   [`ConfigurationError::NestedDispatch`] when called from inside a
    ///   reducer or listener under [`ReentrancyPolicy::Reject`]
    /// - [`StoreError::ListenersFailed`] if listeners panicked under
    ///   [`ListenerFailurePolicy::Collect`]
    /// - any error a middleware chooses to return
    pub fn dispatch(&self, action: A) -> Result<(), StoreError> {
        (self.dispatch)(action)
    }

    /// Register a listener, called after every successful state transition
    ///
    /// Listeners are called in registration order. Registering the same
    /// closure twice calls it twice.
    pub fn subscribe(&self, listener: impl Fn() + 'static) {
        let mut listeners = self.shared.listeners.borrow_mut();
        listeners.push(Rc::new(listener));
        tracing::trace!(listeners = listeners.len(), "Listener subscribed");
    }

    /// Number of registered listeners
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.shared.listeners.borrow().len()
    }

    /// The store's current dispatch function
    ///
    /// Useful for handing to [`bind_action_creators`](crate::bind_action_creators)
    /// or to code that should dispatch without holding the whole store.
    #[must_use]
    pub fn dispatcher(&self) -> Dispatch<A> {
        Rc::clone(&self.dispatch)
    }

    /// Configuration this store was built with
    #[must_use]
    pub fn config(&self) -> StoreConfig {
        self.shared.config
    }

    /// The same store with its dispatch replaced
    ///
    /// State and listeners stay shared with `self`.
    #[must_use]
    pub fn with_dispatch(self, dispatch: Dispatch<A>) -> Self {
        Self {
            shared: self.shared,
            dispatch,
        }
    }

    pub(crate) const fn shared(&self) -> &Rc<Shared<S, A>> {
        &self.shared
    }
}

/// Create a store, optionally delegating construction to an enhancer
///
/// With an enhancer, the enhancer receives the base store factory and is
/// responsible for producing the store (see
/// [`apply_middleware`](crate::apply_middleware)).
///
/// Reducers and enhancers are typed parameters, so a value that is not one
/// is rejected by the compiler rather than at runtime:
///
/// ```compile_fail
/// use unistore_runtime::create_store;
///
/// let store = create_store(42, 0_i64, None);
/// ```
///
/// # Errors
///
/// Returns whatever error the enhancer's construction produces. Without an
/// enhancer this cannot fail.
pub fn create_store<S, A, R>(
    reducer: R,
    preloaded_state: S,
    enhancer: Option<Box<dyn StoreEnhancer<S, A>>>,
) -> Result<Store<S, A>, StoreError>
where
    S: 'static,
    A: Action,
    R: Reducer<S, A> + 'static,
{
    create_store_with_config(reducer, preloaded_state, enhancer, StoreConfig::default())
}

/// [`create_store`] with a custom [`StoreConfig`]
///
/// # Errors
///
/// Same as [`create_store`].
pub fn create_store_with_config<S, A, R>(
    reducer: R,
    preloaded_state: S,
    enhancer: Option<Box<dyn StoreEnhancer<S, A>>>,
    config: StoreConfig,
) -> Result<Store<S, A>, StoreError>
where
    S: 'static,
    A: Action,
    R: Reducer<S, A> + 'static,
{
    let factory = Store::factory(config);

    match enhancer {
        Some(enhancer) => {
            tracing::debug!("Delegating store construction to enhancer");
            enhancer.enhance(factory)(Box::new(reducer), preloaded_state)
        },
        None => factory(Box::new(reducer), preloaded_state),
    }
}
