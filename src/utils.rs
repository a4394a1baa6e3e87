//! Rate-limiting helpers driven by the page's event loop.
//!
//! Neither helper is used by the built-in behaviours; they are exported for
//! page code that reacts to high-frequency input.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::runtime::{Page, TimerId};

type Callback<A> = Box<dyn Fn(&mut Page, A)>;

struct DebounceInner<A> {
    wait: Duration,
    callback: Callback<A>,
    pending: Cell<Option<TimerId>>,
}

/// A debounced function. Clones share the same pending call.
pub struct Debounced<A> {
    inner: Rc<DebounceInner<A>>,
}

impl<A> Clone for Debounced<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A> fmt::Debug for Debounced<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounced")
            .field("wait", &self.inner.wait)
            .field("pending", &self.inner.pending.get())
            .finish()
    }
}

/// Delay `callback` until `wait` has passed without another call. Only the
/// last call in a burst fires, with that call's arguments.
pub fn debounce<A, F>(wait: Duration, callback: F) -> Debounced<A>
where
    A: 'static,
    F: Fn(&mut Page, A) + 'static,
{
    Debounced {
        inner: Rc::new(DebounceInner {
            wait,
            callback: Box::new(callback),
            pending: Cell::new(None),
        }),
    }
}

impl<A: 'static> Debounced<A> {
    /// Cancel any pending call and schedule this one `wait` from now.
    pub fn call(&self, page: &mut Page, args: A) {
        self.cancel(page);
        let inner = Rc::clone(&self.inner);
        let id = page.set_timeout(self.inner.wait, move |page| {
            inner.pending.set(None);
            (inner.callback)(page, args);
        });
        self.inner.pending.set(Some(id));
    }

    /// Drop the pending call, if any. Returns true if one was dropped.
    pub fn cancel(&self, page: &mut Page) -> bool {
        match self.inner.pending.take() {
            Some(id) => page.clear_timeout(id),
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.inner.pending.get().is_some()
    }
}

struct ThrottleInner<A> {
    limit: Duration,
    callback: Callback<A>,
    cooling: Cell<bool>,
}

/// A throttled function. Clones share the same cooldown.
pub struct Throttled<A> {
    inner: Rc<ThrottleInner<A>>,
}

impl<A> Clone for Throttled<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A> fmt::Debug for Throttled<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttled")
            .field("limit", &self.inner.limit)
            .field("cooling", &self.inner.cooling.get())
            .finish()
    }
}

/// Run `callback` at most once per `limit`. The first call fires
/// immediately; calls during the cooldown are dropped.
pub fn throttle<A, F>(limit: Duration, callback: F) -> Throttled<A>
where
    A: 'static,
    F: Fn(&mut Page, A) + 'static,
{
    Throttled {
        inner: Rc::new(ThrottleInner {
            limit,
            callback: Box::new(callback),
            cooling: Cell::new(false),
        }),
    }
}

impl<A: 'static> Throttled<A> {
    /// Fire now unless cooling down. Returns whether the callback ran.
    pub fn call(&self, page: &mut Page, args: A) -> bool {
        if self.inner.cooling.get() {
            return false;
        }
        (self.inner.callback)(page, args);
        self.inner.cooling.set(true);
        let inner = Rc::clone(&self.inner);
        page.set_timeout(self.inner.limit, move |_| inner.cooling.set(false));
        true
    }

    pub fn is_cooling(&self) -> bool {
        self.inner.cooling.get()
    }
}
