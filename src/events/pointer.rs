use crate::dom::{self, DomSurface};
use crate::page::Page;
use glam::Vec2;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_pointer_handlers(
    window: &web::Window,
    document: &web::Document,
    page: &Rc<Page<DomSurface>>,
) {
    let p = page.clone();
    dom::add_listener(window, "pointermove", move |ev: web::Event| {
        if let Some(ev) = ev.dyn_ref::<web::PointerEvent>() {
            p.on_pointer_move(Vec2::new(ev.client_x() as f32, ev.client_y() as f32));
        }
    });

    let p = page.clone();
    dom::add_listener(document, "pointerdown", move |_| p.on_pointer_down());
}

pub fn wire_viewport_handlers(window: &web::Window, page: &Rc<Page<DomSurface>>) {
    let p = page.clone();
    let w = window.clone();
    dom::add_listener(window, "scroll", move |_| {
        let offset = w.scroll_y().unwrap_or(0.0);
        p.on_scroll(offset);
    });

    let p = page.clone();
    dom::add_listener(window, "resize", move |_| p.on_resize());
}
