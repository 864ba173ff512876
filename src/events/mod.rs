pub mod keyboard;
mod once;
pub mod pointer;

use crate::dom::{self, DomSurface};
use crate::page::Page;
use anyhow::anyhow;
use once::bind_once;
use std::rc::Rc;
use std::sync::atomic::AtomicBool;
use web_sys as web;

pub use keyboard::{wire_activation_keys, wire_focus_tracking, wire_global_keydown};
pub use pointer::{wire_pointer_handlers, wire_viewport_handlers};

/// Register every browser listener the page reacts to.
///
/// Listeners outlive a teardown/re-init cycle (bfcache restore), so they are
/// bound at most once per document.
pub fn wire_page_listeners(page: &Rc<Page<DomSurface>>) -> anyhow::Result<()> {
    static BOUND: AtomicBool = AtomicBool::new(false);
    bind_once(&BOUND, || {
        let window = web::window().ok_or_else(|| anyhow!("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow!("no document"))?;

        wire_pointer_handlers(&window, &document, page);
        wire_viewport_handlers(&window, page);
        wire_global_keydown(&document, page);
        wire_focus_tracking(&document, page);
        wire_activation_keys(page);
        wire_lifecycle(&window, page);
        Ok(())
    })?;
    Ok(())
}

fn wire_lifecycle(window: &web::Window, page: &Rc<Page<DomSurface>>) {
    let p = page.clone();
    dom::add_listener(window, "pagehide", move |_| p.teardown());

    // back/forward cache restores the document without re-running start
    let p = page.clone();
    dom::add_listener(window, "pageshow", move |_| {
        if p.init(wire_page_listeners) {
            log::info!("[init] restored from page cache");
        }
    });
}
