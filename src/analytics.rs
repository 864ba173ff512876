/// Best-effort sink for interaction events.
///
/// Implementations must swallow their own failures; a missing or broken
/// tracker never affects page behavior.
pub trait Analytics {
    fn track(&self, event: &str, label: &str);
}
