use crate::clock::{Scheduler, TimerId};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

// ---------------- Debounce ----------------

struct DebounceInner<A> {
    scheduler: Rc<dyn Scheduler>,
    wait_ms: f64,
    pending: Cell<Option<TimerId>>,
    handler: RefCell<Box<dyn FnMut(A)>>,
}

impl<A> Drop for DebounceInner<A> {
    fn drop(&mut self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.clear_timeout(id);
        }
    }
}

/// Collapses a burst of calls into one trailing call, `wait_ms` after the
/// last call of the burst, carrying that call's arguments.
///
/// At most one timer is pending per instance. The timer only holds a weak
/// reference, so it does nothing if the debouncer was dropped in between.
pub struct Debounce<A> {
    inner: Rc<DebounceInner<A>>,
}

impl<A: 'static> Debounce<A> {
    pub fn new(scheduler: Rc<dyn Scheduler>, wait_ms: f64, handler: impl FnMut(A) + 'static) -> Self {
        Self {
            inner: Rc::new(DebounceInner {
                scheduler,
                wait_ms,
                pending: Cell::new(None),
                handler: RefCell::new(Box::new(handler)),
            }),
        }
    }

    pub fn call(&self, args: A) {
        self.cancel();
        let weak: Weak<DebounceInner<A>> = Rc::downgrade(&self.inner);
        // negative or NaN windows degrade to a zero delay
        let delay = self.inner.wait_ms.max(0.0);
        let id = self.inner.scheduler.set_timeout(
            delay,
            Box::new(move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                inner.pending.set(None);
                let mut handler = inner.handler.borrow_mut();
                (*handler)(args);
            }),
        );
        self.inner.pending.set(Some(id));
    }

    /// Drop the pending call, if any, without running it.
    pub fn cancel(&self) {
        if let Some(id) = self.inner.pending.take() {
            self.inner.scheduler.clear_timeout(id);
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.inner.pending.get().is_some()
    }
}

// ---------------- Throttle ----------------

/// Runs the handler at most once per `limit_ms`, on the leading edge.
///
/// Calls landing inside an open window are dropped, not queued.
pub struct Throttle<A> {
    clock: Rc<dyn Scheduler>,
    limit_ms: f64,
    window_start: Cell<Option<f64>>,
    handler: RefCell<Box<dyn FnMut(A)>>,
}

impl<A> Throttle<A> {
    pub fn new(clock: Rc<dyn Scheduler>, limit_ms: f64, handler: impl FnMut(A) + 'static) -> Self {
        Self {
            clock,
            limit_ms,
            window_start: Cell::new(None),
            handler: RefCell::new(Box::new(handler)),
        }
    }

    /// Returns whether the handler ran.
    pub fn call(&self, args: A) -> bool {
        let now = self.clock.now_ms();
        if let Some(start) = self.window_start.get() {
            if now - start < self.limit_ms {
                return false;
            }
        }
        self.window_start.set(Some(now));
        let mut handler = self.handler.borrow_mut();
        (*handler)(args);
        true
    }

    /// Forget the open window so the next call runs immediately.
    #[inline]
    pub fn reset(&self) {
        self.window_start.set(None);
    }
}
