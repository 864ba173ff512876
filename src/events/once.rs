use std::sync::atomic::{AtomicBool, Ordering};

/// Run `bind` unless an earlier call already bound successfully.
///
/// The flag is set only after `bind` returns `Ok`, so a bind that fails
/// before registering anything is retried on the next call. Returns whether
/// this call did the binding.
pub fn bind_once(flag: &AtomicBool, bind: impl FnOnce() -> anyhow::Result<()>) -> anyhow::Result<bool> {
    if flag.load(Ordering::SeqCst) {
        return Ok(false);
    }
    bind()?;
    flag.store(true, Ordering::SeqCst);
    Ok(true)
}
