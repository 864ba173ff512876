// Time and timer capabilities used by every deferred action on the page.
//
// The browser implementation lives in `dom.rs`; host tests drive a virtual
// clock through the same traits.

/// Handle for a scheduled callback, valid until it fires or is cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(pub u32);

/// Monotonic millisecond clock.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// One-shot timer facility on a single-threaded event loop.
///
/// Callbacks run on their own turn of the loop, never re-entrantly from
/// inside `set_timeout`. Clearing an id that already fired is a no-op.
pub trait Scheduler: Clock {
    fn set_timeout(&self, delay_ms: f64, callback: Box<dyn FnOnce()>) -> TimerId;
    fn clear_timeout(&self, id: TimerId);
}
