use crate::a11y::Preferences;
use crate::analytics::Analytics;
use crate::clock::Scheduler;
use crate::config::FxConfig;
use crate::constants::*;
use crate::effects::{self, ParticleList};
use crate::rate_limit::{Debounce, Throttle};
use crate::state::{InteractionSnapshot, InteractionState};
use crate::surface::Surface;
use anyhow::anyhow;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Page regions bound at init. Any of them may be missing; the features
/// that depend on a missing region are skipped.
pub struct Elements<N> {
    pub root: Option<N>,
    pub body: Option<N>,
    pub navbar: Option<N>,
    pub email: Option<N>,
    pub languages: SmallVec<[N; 4]>,
    pub particle_container: Option<N>,
    pub grid: Option<N>,
    // created by the page
    pub light: Option<N>,
    pub live_region: Option<N>,
}

impl<N> Default for Elements<N> {
    fn default() -> Self {
        Self {
            root: None,
            body: None,
            navbar: None,
            email: None,
            languages: SmallVec::new(),
            particle_container: None,
            grid: None,
            light: None,
            live_region: None,
        }
    }
}

pub(crate) struct Limiters {
    pub scroll_fx: Throttle<f64>,
    pub scroll_settle: Debounce<()>,
    pub resize: Debounce<Vec2>,
    pub focus_clear: Debounce<()>,
    pub announce_clear: Debounce<()>,
    pub email_feedback: Debounce<()>,
}

impl Limiters {
    fn new<S: Surface + 'static>(page: &Weak<Page<S>>, scheduler: &Rc<dyn Scheduler>) -> Self {
        let w = page.clone();
        let scroll_fx = Throttle::new(scheduler.clone(), SCROLL_THROTTLE_MS, move |offset: f64| {
            if let Some(page) = w.upgrade() {
                page.apply_scroll_effects(offset);
            }
        });
        let w = page.clone();
        let scroll_settle = Debounce::new(scheduler.clone(), SCROLL_SETTLE_MS, move |()| {
            if let Some(page) = w.upgrade() {
                page.on_scroll_settled();
            }
        });
        let w = page.clone();
        let resize = Debounce::new(scheduler.clone(), RESIZE_DEBOUNCE_MS, move |viewport: Vec2| {
            if let Some(page) = w.upgrade() {
                page.handle_resize(viewport);
            }
        });
        let w = page.clone();
        let focus_clear = Debounce::new(scheduler.clone(), FOCUS_CLEAR_MS, move |()| {
            if let Some(page) = w.upgrade() {
                page.set_keyboard_nav(false);
            }
        });
        let w = page.clone();
        let announce_clear = Debounce::new(scheduler.clone(), ANNOUNCE_CLEAR_MS, move |()| {
            if let Some(page) = w.upgrade() {
                page.clear_announcement();
            }
        });
        let w = page.clone();
        let email_feedback = Debounce::new(scheduler.clone(), EMAIL_FEEDBACK_MS, move |()| {
            if let Some(page) = w.upgrade() {
                page.clear_email_feedback();
            }
        });
        Self {
            scroll_fx,
            scroll_settle,
            resize,
            focus_clear,
            announce_clear,
            email_feedback,
        }
    }

    fn cancel_all(&self) {
        self.scroll_fx.reset();
        self.scroll_settle.cancel();
        self.resize.cancel();
        self.focus_clear.cancel();
        self.announce_clear.cancel();
        self.email_feedback.cancel();
    }
}

/// Everything one page view needs: capabilities, state, bound elements and
/// the rate limiters wrapping the high-frequency handlers. Handlers live in
/// `controller.rs` and `a11y.rs`.
pub struct Page<S: Surface> {
    pub(crate) surface: Rc<S>,
    pub(crate) analytics: Option<Rc<dyn Analytics>>,
    pub(crate) config: FxConfig,
    pub(crate) state: RefCell<InteractionState>,
    pub(crate) elements: RefCell<Elements<S::Node>>,
    pub(crate) particles: RefCell<ParticleList<S::Node>>,
    pub(crate) prefs: Cell<Preferences>,
    pub(crate) keyboard_nav: Cell<bool>,
    // set while a pointer-triggered clear is pending
    pub(crate) pointer_clearing: Cell<bool>,
    pub(crate) limiters: Limiters,
    initialized: Cell<bool>,
    rng: RefCell<StdRng>,
}

impl<S: Surface + 'static> Page<S> {
    pub fn new(
        surface: Rc<S>,
        scheduler: Rc<dyn Scheduler>,
        analytics: Option<Rc<dyn Analytics>>,
        config: FxConfig,
    ) -> Rc<Self> {
        let rng = match config.particle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Rc::new_cyclic(|weak| Self {
            limiters: Limiters::new(weak, &scheduler),
            surface,
            analytics,
            config,
            state: RefCell::new(InteractionState::default()),
            elements: RefCell::new(Elements::default()),
            particles: RefCell::new(ParticleList::new()),
            prefs: Cell::new(Preferences::default()),
            keyboard_nav: Cell::new(false),
            pointer_clearing: Cell::new(false),
            initialized: Cell::new(false),
            rng: RefCell::new(rng),
        })
    }

    /// Run the one-time setup. `bind_listeners` registers event listeners and
    /// runs only when setup actually happens.
    ///
    /// Returns `false` (doing nothing) when already initialized. A failing
    /// step is logged and the remaining steps still run.
    pub fn init(self: &Rc<Self>, bind_listeners: impl FnOnce(&Rc<Self>) -> anyhow::Result<()>) -> bool {
        if self.initialized.replace(true) {
            log::debug!("[init] already initialized");
            return false;
        }
        self.run_step("elements", || self.bind_elements());
        self.run_step("listeners", || bind_listeners(self));
        self.run_step("animations", || self.setup_animations());
        self.run_step("accessibility", || self.setup_accessibility());
        self.run_step("particles", || self.create_particles());
        log::info!(
            "[init] ready particles={} reduced_motion={}",
            self.particle_count(),
            self.prefs.get().reduced_motion
        );
        true
    }

    /// Cancel pending timers and remove the elements the page created.
    /// Listeners stay registered; the document is going away.
    pub fn teardown(&self) {
        if !self.initialized.replace(false) {
            return;
        }
        self.limiters.cancel_all();
        self.clear_particles();
        let created = {
            let mut els = self.elements.borrow_mut();
            [els.live_region.take(), els.light.take()]
        };
        for node in created.into_iter().flatten() {
            self.surface.remove(&node);
        }
        self.set_keyboard_nav(false);
        log::info!("[teardown] page effects removed");
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized.get()
    }

    #[inline]
    pub fn snapshot(&self) -> InteractionSnapshot {
        self.state.borrow().snapshot()
    }

    #[inline]
    pub fn particle_count(&self) -> usize {
        self.particles.borrow().len()
    }

    #[inline]
    pub fn preferences(&self) -> Preferences {
        self.prefs.get()
    }

    /// Forward an event to the analytics sink, if any.
    pub fn track(&self, event: &str, label: &str) {
        log::debug!("[analytics] {} {}", event, label);
        if let Some(analytics) = &self.analytics {
            analytics.track(event, label);
        }
    }

    fn run_step(&self, name: &str, step: impl FnOnce() -> anyhow::Result<()>) {
        if let Err(e) = step() {
            log::warn!("[init] {} step failed: {:#}", name, e);
        }
    }

    // ---------------- Setup steps ----------------

    fn bind_elements(&self) -> anyhow::Result<()> {
        let s = &*self.surface;
        // environment preferences are read once, before anything depends on them
        self.prefs.set(Preferences::detect(s));

        let body = s.query(SEL_BODY).ok_or_else(|| anyhow!("missing <body>"))?;
        let mut els = self.elements.borrow_mut();
        els.root = s.query(SEL_ROOT);
        els.body = Some(body);
        els.navbar = s.query(SEL_NAVBAR);
        els.email = s.query(SEL_EMAIL);
        els.languages = s.query_all(SEL_LANG_BUTTONS).into_iter().collect();
        els.particle_container = s.query(SEL_PARTICLES);
        els.grid = s.query(SEL_GRID);

        for (sel, missing) in [
            (SEL_NAVBAR, els.navbar.is_none()),
            (SEL_EMAIL, els.email.is_none()),
            (SEL_LANG_BUTTONS, els.languages.is_empty()),
            (SEL_PARTICLES, els.particle_container.is_none()),
            (SEL_GRID, els.grid.is_none()),
        ] {
            if missing {
                log::debug!("[init] no {} on page; dependent effects disabled", sel);
            }
        }
        Ok(())
    }

    fn setup_animations(&self) -> anyhow::Result<()> {
        let body = self
            .elements
            .borrow()
            .body
            .clone()
            .ok_or_else(|| anyhow!("no body bound"))?;
        let s = &*self.surface;

        let reveal = s.query_all(SEL_REVEAL);
        if self.prefs.get().reduced_motion {
            for node in &reveal {
                s.toggle_class(node, CLASS_VISIBLE, true);
            }
        } else {
            if !reveal.is_empty() && !s.reveal_on_intersect(&reveal, CLASS_VISIBLE) {
                log::debug!("[init] no intersection observer; revealing {} nodes", reveal.len());
                for node in &reveal {
                    s.toggle_class(node, CLASS_VISIBLE, true);
                }
            }
            let light = s
                .create_child(&body, "div", CLASS_LIGHT)
                .ok_or_else(|| anyhow!("could not create cursor light"))?;
            s.set_attribute(&light, "aria-hidden", "true");
            self.elements.borrow_mut().light = Some(light);
        }
        s.toggle_class(&body, CLASS_LOADED, true);
        Ok(())
    }

    fn create_particles(&self) -> anyhow::Result<()> {
        if self.prefs.get().reduced_motion {
            log::debug!("[init] reduced motion; no particles");
            return Ok(());
        }
        let Some(container) = self.elements.borrow().particle_container.clone() else {
            return Ok(());
        };
        let width = self.surface.viewport_size().x as f64;
        self.regenerate_particles(&container, width);
        Ok(())
    }

    // ---------------- Particles ----------------

    /// Replace every particle with a fresh set sized for `width`.
    pub(crate) fn regenerate_particles(&self, container: &S::Node, width: f64) -> usize {
        self.clear_particles();
        let count = effects::particle_count_for_width(width, &self.config);
        let spawned = {
            let mut rng = self.rng.borrow_mut();
            effects::spawn_particles(&*self.surface, container, count, &mut *rng)
        };
        let n = spawned.len();
        *self.particles.borrow_mut() = spawned;
        n
    }

    fn clear_particles(&self) {
        let old = std::mem::take(&mut *self.particles.borrow_mut());
        for node in &old {
            self.surface.remove(node);
        }
    }
}
