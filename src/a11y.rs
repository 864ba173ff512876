use crate::constants::*;
use crate::page::Page;
use crate::surface::Surface;
use anyhow::anyhow;

/// User preferences read from media queries once at setup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Preferences {
    pub reduced_motion: bool,
    pub high_contrast: bool,
}

impl Preferences {
    pub fn detect<S: Surface>(surface: &S) -> Self {
        Self {
            reduced_motion: surface.media_matches(MQ_REDUCED_MOTION),
            high_contrast: surface.media_matches(MQ_HIGH_CONTRAST),
        }
    }
}

impl<S: Surface + 'static> Page<S> {
    pub(crate) fn setup_accessibility(&self) -> anyhow::Result<()> {
        let prefs = self.prefs.get();
        let s = &*self.surface;
        let (root, body, email, has_region) = {
            let els = self.elements.borrow();
            (
                els.root.clone(),
                els.body.clone(),
                els.email.clone(),
                els.live_region.is_some(),
            )
        };

        if let Some(root) = &root {
            s.toggle_class(root, CLASS_REDUCED_MOTION, prefs.reduced_motion);
            s.toggle_class(root, CLASS_HIGH_CONTRAST, prefs.high_contrast);
        }

        // the email action is a plain element on some pages; make it reachable
        if let Some(email) = &email {
            if s.attribute(email, "tabindex").is_none() {
                s.set_attribute(email, "tabindex", "0");
            }
            if s.attribute(email, "role").is_none() {
                s.set_attribute(email, "role", "button");
            }
        }

        if !has_region {
            let body = body.ok_or_else(|| anyhow!("no body bound"))?;
            let region = s
                .create_child(&body, "div", CLASS_LIVE_REGION)
                .ok_or_else(|| anyhow!("could not create live region"))?;
            s.set_attribute(&region, "role", "status");
            s.set_attribute(&region, "aria-live", "polite");
            s.set_attribute(&region, "aria-atomic", "true");
            self.elements.borrow_mut().live_region = Some(region);
        }

        log::info!(
            "[a11y] reduced_motion={} high_contrast={}",
            prefs.reduced_motion,
            prefs.high_contrast
        );
        Ok(())
    }

    /// Push a short status message to assistive technology. The region is
    /// emptied shortly after the latest message.
    pub fn announce(&self, message: &str) {
        let region = self.elements.borrow().live_region.clone();
        let Some(region) = region else {
            return;
        };
        self.surface.set_text(&region, message);
        self.limiters.announce_clear.call(());
    }

    pub(crate) fn clear_announcement(&self) {
        let region = self.elements.borrow().live_region.clone();
        if let Some(region) = region {
            self.surface.set_text(&region, "");
        }
    }

    // ---------------- Focus visibility ----------------

    /// Document-level keydown. Tab switches to keyboard navigation mode.
    pub fn on_keydown(&self, key: &str) {
        if key == "Tab" {
            self.limiters.focus_clear.cancel();
            self.pointer_clearing.set(false);
            self.set_keyboard_nav(true);
        }
    }

    /// Pointer interaction leaves keyboard mode after a short delay. Focus
    /// moves caused by the same press do not hold the mode open.
    pub fn on_pointer_down(&self) {
        if self.keyboard_nav.get() {
            self.pointer_clearing.set(true);
            self.limiters.focus_clear.call(());
        }
    }

    /// Focus left an element. Keyboard mode ends unless focus lands on
    /// another element within the clear delay.
    pub fn on_focus_out(&self) {
        if self.keyboard_nav.get() && !self.pointer_clearing.get() {
            self.limiters.focus_clear.call(());
        }
    }

    /// Focus arrived on an element; a clear scheduled by the previous
    /// `focusout` is dropped so the ring does not flicker.
    pub fn on_focus_in(&self) {
        if !self.pointer_clearing.get() {
            self.limiters.focus_clear.cancel();
        }
    }

    #[inline]
    pub fn is_keyboard_nav(&self) -> bool {
        self.keyboard_nav.get()
    }

    pub(crate) fn set_keyboard_nav(&self, on: bool) {
        if !on {
            self.pointer_clearing.set(false);
        }
        if self.keyboard_nav.replace(on) == on {
            return;
        }
        let body = self.elements.borrow().body.clone();
        if let Some(body) = body {
            self.surface.toggle_class(&body, CLASS_KEYBOARD_NAV, on);
        }
    }
}
