//! Call recording
//!
//! A [`CallTrace`] is a shared, append-only log of string entries. Listeners
//! and middleware created from it write into the same log, so a test can
//! assert the exact interleaving of the dispatch pipeline.

use std::cell::RefCell;
use std::rc::Rc;
use unistore_core::Action;
use unistore_runtime::{Dispatch, Link, Middleware, MiddlewareApi};

/// Shared call log
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct CallTrace {
    entries: Rc<RefCell<Vec<String>>>,
}

impl CallTrace {
    /// Create an empty trace
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry
    pub fn record(&self, entry: impl Into<String>) {
        self.entries.borrow_mut().push(entry.into());
    }

    /// Snapshot of all entries so far
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Drop all entries
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    /// A store listener recording `name` on every call
    pub fn listener(&self, name: &'static str) -> impl Fn() + 'static {
        let trace = self.clone();
        move || trace.record(name)
    }

    /// A middleware recording `<name>:before` and `<name>:after` around `next`
    #[must_use]
    pub fn middleware(&self, name: &'static str) -> TraceMiddleware {
        TraceMiddleware {
            name,
            trace: self.clone(),
            record_actions: false,
        }
    }

    /// Assert the log equals `expected`
    ///
    /// # Panics
    ///
    /// Panics if the entries differ.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_entries(&self, expected: &[&str]) {
        assert_eq!(self.entries(), expected, "Unexpected call trace");
    }
}

/// Middleware that records into a [`CallTrace`]. Created by [`CallTrace::middleware`].
#[derive(Debug, Clone)]
pub struct TraceMiddleware {
    name: &'static str,
    trace: CallTrace,
    record_actions: bool,
}

impl TraceMiddleware {
    /// Record `<name>:<action:?>` instead of `<name>:before`
    #[must_use]
    pub fn with_actions(mut self) -> Self {
        self.record_actions = true;
        self
    }
}

impl<S: 'static, A: Action> Middleware<S, A> for TraceMiddleware {
    fn bind(&self, _api: MiddlewareApi<S, A>) -> Link<A> {
        let this = self.clone();
        Box::new(move |next: Dispatch<A>| {
            let this = this.clone();
            let dispatch: Dispatch<A> = Rc::new(move |action: A| {
                let name = this.name;
                if this.record_actions {
                    this.trace.record(format!("{name}:{action:?}"));
                } else {
                    this.trace.record(format!("{name}:before"));
                }
                let result = next(action);
                this.trace.record(format!("{name}:after"));
                result
            });
            dispatch
        })
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
