use super::{Link, Middleware, MiddlewareApi};
use crate::error::StoreError;
use crate::store::Dispatch;
use std::rc::Rc;
use unistore_core::Action;

/// Deferred work run by [`ThunkMiddleware`] in place of reducing an action
///
/// The thunk receives the middleware api, so it can read state and dispatch
/// any number of further actions through the full chain.
pub type Thunk<S, A> = Box<dyn FnOnce(&MiddlewareApi<S, A>) -> Result<(), StoreError>>;

/// Action types that may carry a [`Thunk`]
///
/// # Example
///
/// ```
/// use std::fmt;
/// use unistore_core::Action;
/// use unistore_runtime::{Thunk, ThunkAction};
///
/// enum Msg {
///     Add(i64),
///     Later(Thunk<i64, Msg>),
/// }
///
/// impl fmt::Debug for Msg {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         match self {
///             Self::Add(n) => f.debug_tuple("Add").field(n).finish(),
///             Self::Later(_) => f.write_str("Later(..)"),
///         }
///     }
/// }
///
/// impl Action for Msg {}
///
/// impl ThunkAction<i64, Msg> for Msg {
///     fn into_thunk(self) -> Result<Thunk<i64, Msg>, Self> {
///         match self {
///             Self::Later(thunk) => Ok(thunk),
///             other => Err(other),
///         }
///     }
/// }
/// ```
pub trait ThunkAction<S, A>: Sized {
    /// Take the thunk out of this action, or give the action back unchanged
    ///
    /// # Errors
    ///
    /// Returns `Err(self)` when the action is an ordinary action.
    fn into_thunk(self) -> Result<Thunk<S, A>, Self>;
}

/// Runs thunk actions instead of forwarding them
///
/// Ordinary actions pass through to `next` untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThunkMiddleware;

impl ThunkMiddleware {
    /// Create the middleware
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl<S, A> Middleware<S, A> for ThunkMiddleware
where
    S: 'static,
    A: Action + ThunkAction<S, A>,
{
    fn bind(&self, api: MiddlewareApi<S, A>) -> Link<A> {
        Box::new(move |next: Dispatch<A>| {
            let api = api.clone();
            let dispatch: Dispatch<A> = Rc::new(move |action: A| match action.into_thunk() {
                Ok(thunk) => {
                    tracing::trace!("Running thunk");
                    thunk(&api)
                },
                Err(action) => next(action),
            });
            dispatch
        })
    }

    fn name(&self) -> &'static str {
        "thunk"
    }
}
