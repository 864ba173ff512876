use glam::Vec2;

/// Live interaction state for one page view.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct InteractionState {
    pub pointer: Vec2,
    pub scroll_offset: f64,
    pub is_scrolling: bool,
    pub language: Option<String>,
}

/// Detached copy of [`InteractionState`] for external diagnostics.
pub type InteractionSnapshot = InteractionState;

impl InteractionState {
    #[inline]
    pub fn record_pointer(&mut self, pos: Vec2) {
        self.pointer = pos;
    }

    /// Overscroll can report negative offsets; they are clamped to the top.
    #[inline]
    pub fn record_scroll(&mut self, offset: f64) {
        self.scroll_offset = if offset.is_finite() { offset.max(0.0) } else { 0.0 };
        self.is_scrolling = true;
    }

    #[inline]
    pub fn settle(&mut self) {
        self.is_scrolling = false;
    }

    #[inline]
    pub fn snapshot(&self) -> InteractionSnapshot {
        self.clone()
    }
}
