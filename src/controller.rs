use crate::constants::*;
use crate::effects;
use crate::page::Page;
use crate::surface::Surface;
use glam::Vec2;

/// Keys that activate a focused button-like element.
#[inline]
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " " | "Spacebar")
}

impl<S: Surface + 'static> Page<S> {
    // ---------------- Pointer ----------------

    /// Unthrottled: the light and particles track every pointer move.
    pub fn on_pointer_move(&self, pos: Vec2) {
        self.state.borrow_mut().record_pointer(pos);
        let light = self.elements.borrow().light.clone();
        if let Some(light) = &light {
            effects::apply_light(&*self.surface, light, pos);
        }
        if self.prefs.get().reduced_motion {
            return;
        }
        let viewport = self.surface.viewport_size();
        let particles = self.particles.borrow();
        effects::apply_pointer_drift(&*self.surface, &particles, pos, viewport);
    }

    // ---------------- Scroll ----------------

    /// Every scroll event updates the state and refreshes the settle timer;
    /// the visual work is throttled to about one frame.
    pub fn on_scroll(&self, offset: f64) {
        let offset = {
            let mut st = self.state.borrow_mut();
            st.record_scroll(offset);
            st.scroll_offset
        };
        let body = self.elements.borrow().body.clone();
        if let Some(body) = &body {
            self.surface.toggle_class(body, CLASS_SCROLLING, true);
        }
        self.limiters.scroll_settle.call(());
        self.limiters.scroll_fx.call(offset);
    }

    pub(crate) fn apply_scroll_effects(&self, offset: f64) {
        let (navbar, grid, layer) = {
            let els = self.elements.borrow();
            (
                els.navbar.clone(),
                els.grid.clone(),
                els.particle_container.clone(),
            )
        };
        if let Some(nav) = &navbar {
            self.surface
                .toggle_class(nav, CLASS_SCROLLED, offset > NAV_SCROLLED_THRESHOLD_PX);
        }
        if !self.prefs.get().reduced_motion {
            effects::apply_parallax(&*self.surface, grid.as_ref(), layer.as_ref(), offset);
        }
    }

    pub(crate) fn on_scroll_settled(&self) {
        self.state.borrow_mut().settle();
        let body = self.elements.borrow().body.clone();
        if let Some(body) = &body {
            self.surface.toggle_class(body, CLASS_SCROLLING, false);
        }
    }

    // ---------------- Resize ----------------

    pub fn on_resize(&self) {
        self.limiters.resize.call(self.surface.viewport_size());
    }

    pub(crate) fn handle_resize(&self, viewport: Vec2) {
        if !self.is_initialized() || self.prefs.get().reduced_motion {
            return;
        }
        let container = self.elements.borrow().particle_container.clone();
        let Some(container) = container else {
            return;
        };
        let n = self.regenerate_particles(&container, viewport.x as f64);
        log::debug!("[resize] {:.0}x{:.0} particles={}", viewport.x, viewport.y, n);
        // place the fresh particles where the pointer already is
        let pointer = self.state.borrow().pointer;
        let particles = self.particles.borrow();
        effects::apply_pointer_drift(&*self.surface, &particles, pointer, viewport);
    }

    // ---------------- Email action ----------------

    /// Open a mail draft, flash the feedback state and announce it.
    pub fn activate_email(&self) {
        let email_el = self.elements.borrow().email.clone();
        let address = email_el
            .as_ref()
            .and_then(|el| self.surface.attribute(el, "data-email"))
            .map(|a| a.trim().to_string())
            .filter(|a| a.contains('@'))
            .unwrap_or_else(|| self.config.contact_email.clone());

        self.surface.open_url(&format!("mailto:{}", address));
        if let Some(el) = &email_el {
            self.surface.toggle_class(el, CLASS_ACTIVATED, true);
            self.limiters.email_feedback.call(());
        }
        self.announce(&format!("Opening your email client to write to {}", address));
        self.track("email_click", &address);
        log::info!("[email] mailto:{}", address);
    }

    pub(crate) fn clear_email_feedback(&self) {
        let email_el = self.elements.borrow().email.clone();
        if let Some(el) = &email_el {
            self.surface.toggle_class(el, CLASS_ACTIVATED, false);
        }
    }

    // ---------------- Language selector ----------------

    /// Mark the `index`th language button active and switch the document
    /// language. Returns `false` for an unknown button or one without
    /// `data-lang`.
    pub fn select_language(&self, index: usize) -> bool {
        let (buttons, root) = {
            let els = self.elements.borrow();
            (els.languages.clone(), els.root.clone())
        };
        let Some(chosen) = buttons.get(index) else {
            return false;
        };
        let lang = match self.surface.attribute(chosen, "data-lang") {
            Some(l) if !l.trim().is_empty() => l.trim().to_string(),
            _ => {
                log::warn!("[lang] button {} has no data-lang", index);
                return false;
            }
        };

        for (i, button) in buttons.iter().enumerate() {
            let on = i == index;
            self.surface.toggle_class(button, CLASS_ACTIVE, on);
            self.surface
                .set_attribute(button, "aria-pressed", if on { "true" } else { "false" });
        }
        if let Some(root) = &root {
            self.surface.set_attribute(root, "lang", &lang);
        }
        self.state.borrow_mut().language = Some(lang.clone());
        self.announce(&format!("Language switched to {}", lang.to_uppercase()));
        self.track("language_switch", &lang);
        log::info!("[lang] {}", lang);
        true
    }
}
