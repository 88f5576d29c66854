use super::{Link, Middleware, MiddlewareApi};
use crate::store::Dispatch;
use std::fmt::Debug;
use std::rc::Rc;
use unistore_core::Action;

/// Logs every action passing through the chain with `tracing`
///
/// Actions are logged at `DEBUG` before being forwarded; failures coming
/// back from the rest of the chain are logged at `WARN` and returned
/// unchanged. With [`with_state`](Self::with_state) the state after the
/// action is logged as well.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggerMiddleware {
    log_state: bool,
}

impl LoggerMiddleware {
    /// Log actions only
    #[must_use]
    pub const fn new() -> Self {
        Self { log_state: false }
    }

    /// Also log the resulting state after each action
    #[must_use]
    pub const fn with_state(mut self) -> Self {
        self.log_state = true;
        self
    }
}

impl<S, A> Middleware<S, A> for LoggerMiddleware
where
    S: Debug + 'static,
    A: Action,
{
    fn bind(&self, api: MiddlewareApi<S, A>) -> Link<A> {
        let log_state = self.log_state;
        Box::new(move |next: Dispatch<A>| {
            let api = api.clone();
            let dispatch: Dispatch<A> = Rc::new(move |action: A| {
                tracing::debug!(?action, "Dispatching");
                let result = next(action);
                match &result {
                    Ok(()) if log_state => {
                        tracing::debug!(state = ?api.get_state(), "Next state");
                    },
                    Ok(()) => {},
                    Err(error) => tracing::warn!(%error, "Dispatch failed"),
                }
                result
            });
            dispatch
        })
    }

    fn name(&self) -> &'static str {
        "logger"
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::{StoreError, apply_middleware, create_store};
    use serde_json::{Value, json};

    fn count_reducer(count: &i64, action: &Value) -> i64 {
        if action["type"] == "INC" { count + 1 } else { *count }
    }

    #[test]
    fn test_logger_is_transparent() {
        let chain: Vec<Box<dyn Middleware<i64, Value>>> =
            vec![Box::new(LoggerMiddleware::new().with_state())];
        let store = create_store(count_reducer, 0, Some(Box::new(apply_middleware(chain)))).unwrap();

        store.dispatch(json!({ "type": "INC" })).unwrap();
        assert_eq!(*store.get_state(), 1);

        assert!(matches!(
            store.dispatch(json!(7)),
            Err(StoreError::InvalidAction(_))
        ));
        assert_eq!(*store.get_state(), 1);
    }

    #[test]
    fn test_builder() {
        assert!(!LoggerMiddleware::new().log_state);
        assert!(LoggerMiddleware::new().with_state().log_state);
        assert_eq!(
            Middleware::<i64, Value>::name(&LoggerMiddleware::default()),
            "logger"
        );
    }
}
