use crate::controller::is_activation_key;
use crate::dom::{self, DomSurface};
use crate::page::Page;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
fn key_of(ev: &web::Event) -> Option<String> {
    ev.dyn_ref::<web::KeyboardEvent>().map(|k| k.key())
}

// Tab anywhere switches the focus ring to keyboard mode
pub fn wire_global_keydown(document: &web::Document, page: &Rc<Page<DomSurface>>) {
    let p = page.clone();
    dom::add_listener(document, "keydown", move |ev: web::Event| {
        if let Some(key) = key_of(&ev) {
            p.on_keydown(&key);
        }
    });
}

// focusin/focusout bubble, so one pair on the document sees every element
pub fn wire_focus_tracking(document: &web::Document, page: &Rc<Page<DomSurface>>) {
    let p = page.clone();
    dom::add_listener(document, "focusin", move |_| p.on_focus_in());
    let p = page.clone();
    dom::add_listener(document, "focusout", move |_| p.on_focus_out());
}

/// Click and Enter/Space on the email action and the language buttons.
pub fn wire_activation_keys(page: &Rc<Page<DomSurface>>) {
    let (email, languages) = {
        let els = page.elements.borrow();
        (els.email.clone(), els.languages.clone())
    };

    if let Some(email) = email {
        let p = page.clone();
        dom::add_listener(&email, "click", move |ev: web::Event| {
            ev.prevent_default();
            p.activate_email();
        });
        let p = page.clone();
        dom::add_listener(&email, "keydown", move |ev: web::Event| {
            if key_of(&ev).is_some_and(|k| is_activation_key(&k)) {
                ev.prevent_default();
                p.activate_email();
            }
        });
    }

    for (index, button) in languages.iter().enumerate() {
        let p = page.clone();
        dom::add_listener(button, "click", move |_| {
            p.select_language(index);
        });
        let p = page.clone();
        dom::add_listener(button, "keydown", move |ev: web::Event| {
            if key_of(&ev).is_some_and(|k| is_activation_key(&k)) {
                ev.prevent_default();
                p.select_language(index);
            }
        });
    }
    log::debug!("[init] {} language buttons wired", languages.len());
}
