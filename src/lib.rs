#![cfg(target_arch = "wasm32")]
use crate::analytics::Analytics;
use crate::clock::Scheduler;
use crate::config::FxConfig;
use crate::constants::{SEL_BODY, VERSION};
use crate::dom::{BrowserScheduler, DomSurface, WindowAnalytics};
use crate::page::Page;
use crate::surface::Surface;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

mod a11y;
mod analytics;
mod clock;
mod config;
mod constants;
mod controller;
mod dom;
mod effects;
mod events;
mod page;
mod rate_limit;
mod state;
mod surface;

thread_local! {
    // the one page context of this document, reachable from the JS exports
    static PAGE: RefCell<Option<Rc<Page<DomSurface>>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("landing-fx {} starting", VERSION);

    let document = dom::window_document().ok_or_else(|| JsValue::from_str("no document"))?;
    if document.ready_state() == "loading" {
        dom::add_listener(&document, "DOMContentLoaded", |_| {
            init_effects();
        });
    } else {
        init_effects();
    }
    Ok(())
}

/// Idempotent entry point; returns `true` when this call performed setup.
#[wasm_bindgen(js_name = initEffects)]
pub fn init_effects() -> bool {
    match try_init() {
        Ok(fresh) => fresh,
        Err(e) => {
            log::error!("init error: {:?}", e);
            false
        }
    }
}

fn try_init() -> anyhow::Result<bool> {
    let page = match current_page() {
        Some(page) => page,
        None => {
            let page = build_page()?;
            PAGE.with(|slot| *slot.borrow_mut() = Some(page.clone()));
            page
        }
    };
    Ok(page.init(events::wire_page_listeners))
}

fn build_page() -> anyhow::Result<Rc<Page<DomSurface>>> {
    let surface = Rc::new(DomSurface::new()?);
    let config = match surface.query(SEL_BODY) {
        Some(body) => FxConfig::from_lookup(|name| body.get_attribute(name)),
        None => FxConfig::default(),
    };
    let window = surface.window().clone();
    let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler::new(window.clone()));
    let analytics: Rc<dyn Analytics> = Rc::new(WindowAnalytics::new(window));
    Ok(Page::new(surface, scheduler, Some(analytics), config))
}

fn current_page() -> Option<Rc<Page<DomSurface>>> {
    PAGE.with(|slot| slot.borrow().clone())
}

/// Read-only copy of the interaction state for diagnostics.
#[wasm_bindgen]
pub struct InteractionStateView {
    pointer_x: f32,
    pointer_y: f32,
    scroll_offset: f64,
    is_scrolling: bool,
    language: Option<String>,
}

#[wasm_bindgen]
impl InteractionStateView {
    #[wasm_bindgen(getter, js_name = pointerX)]
    pub fn pointer_x(&self) -> f32 {
        self.pointer_x
    }

    #[wasm_bindgen(getter, js_name = pointerY)]
    pub fn pointer_y(&self) -> f32 {
        self.pointer_y
    }

    #[wasm_bindgen(getter, js_name = scrollOffset)]
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    #[wasm_bindgen(getter, js_name = isScrolling)]
    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    #[wasm_bindgen(getter)]
    pub fn language(&self) -> Option<String> {
        self.language.clone()
    }
}

#[wasm_bindgen(js_name = interactionState)]
pub fn interaction_state() -> InteractionStateView {
    let snap = current_page().map(|p| p.snapshot()).unwrap_or_default();
    InteractionStateView {
        pointer_x: snap.pointer.x,
        pointer_y: snap.pointer.y,
        scroll_offset: snap.scroll_offset,
        is_scrolling: snap.is_scrolling,
        language: snap.language,
    }
}

/// Pass-through to the analytics sink; a no-op before init.
#[wasm_bindgen(js_name = trackEvent)]
pub fn track_event(name: &str, label: Option<String>) {
    if let Some(page) = current_page() {
        page.track(name, label.as_deref().unwrap_or(""));
    }
}

#[wasm_bindgen]
pub fn version() -> String {
    VERSION.to_string()
}
