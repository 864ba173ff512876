use crate::analytics::Analytics;
use crate::clock::{Clock, Scheduler, TimerId};
use crate::surface::Surface;
use anyhow::anyhow;
use fnv::FnvHashMap;
use glam::Vec2;
use instant::Instant;
use js_sys::{Function, Object, Reflect};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Register `handler` for `event` on `target` for the lifetime of the page.
#[inline]
pub fn add_listener(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(web::Event) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

// ---------------- Surface ----------------

pub struct DomSurface {
    window: web::Window,
    document: web::Document,
}

impl DomSurface {
    pub fn new() -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow!("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow!("no document"))?;
        Ok(Self { window, document })
    }

    #[inline]
    pub fn window(&self) -> &web::Window {
        &self.window
    }
}

impl Surface for DomSurface {
    type Node = web::Element;

    fn query(&self, selector: &str) -> Option<web::Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<web::Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|n| n.dyn_into::<web::Element>().ok())
            .collect()
    }

    fn create_child(&self, parent: &web::Element, tag: &str, class: &str) -> Option<web::Element> {
        let el = self.document.create_element(tag).ok()?;
        el.set_class_name(class);
        parent.append_child(&el).ok()?;
        Some(el)
    }

    fn remove(&self, node: &web::Element) {
        node.remove();
    }

    fn set_transform(&self, node: &web::Element, css: &str) {
        self.set_style(node, "transform", css);
    }

    fn set_style(&self, node: &web::Element, property: &str, value: &str) {
        if let Some(el) = node.dyn_ref::<web::HtmlElement>() {
            _ = el.style().set_property(property, value);
        }
    }

    fn set_text(&self, node: &web::Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn attribute(&self, node: &web::Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &web::Element, name: &str, value: &str) {
        _ = node.set_attribute(name, value);
    }

    fn toggle_class(&self, node: &web::Element, class: &str, on: bool) {
        _ = node.class_list().toggle_with_force(class, on);
    }

    fn viewport_size(&self) -> Vec2 {
        let px = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
        Vec2::new(px(self.window.inner_width()), px(self.window.inner_height()))
    }

    fn media_matches(&self, query: &str) -> bool {
        self.window
            .match_media(query)
            .ok()
            .flatten()
            .map(|mq| mq.matches())
            .unwrap_or(false)
    }

    fn open_url(&self, url: &str) {
        if let Err(e) = self.window.location().set_href(url) {
            log::warn!("[dom] navigation to {} failed: {:?}", url, e);
        }
    }

    fn reveal_on_intersect(&self, nodes: &[web::Element], class: &str) -> bool {
        let class = class.to_string();
        let callback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: web::IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                        continue;
                    };
                    if entry.is_intersecting() {
                        let target = entry.target();
                        _ = target.class_list().add_1(&class);
                        observer.unobserve(&target);
                    }
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);
        let observer = match web::IntersectionObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(o) => o,
            Err(e) => {
                log::debug!("[dom] IntersectionObserver unavailable: {:?}", e);
                return false;
            }
        };
        for node in nodes {
            observer.observe(node);
        }
        callback.forget();
        true
    }
}

// ---------------- Timers ----------------

type Tasks = FnvHashMap<u32, (i32, Box<dyn FnOnce()>)>;

/// `setTimeout`-backed scheduler. One long-lived dispatch closure receives a
/// token per timer and runs the matching task, so cancelled timers leave no
/// closures behind.
pub struct BrowserScheduler {
    window: web::Window,
    origin: Instant,
    next_token: Cell<u32>,
    tasks: Rc<RefCell<Tasks>>,
    dispatch: Closure<dyn FnMut(JsValue)>,
}

impl BrowserScheduler {
    pub fn new(window: web::Window) -> Self {
        let tasks: Rc<RefCell<Tasks>> = Rc::default();
        let weak = Rc::downgrade(&tasks);
        let dispatch = Closure::wrap(Box::new(move |token: JsValue| {
            let (Some(tasks), Some(token)) = (weak.upgrade(), token.as_f64()) else {
                return;
            };
            let task = tasks.borrow_mut().remove(&(token as u32));
            if let Some((_, task)) = task {
                task();
            }
        }) as Box<dyn FnMut(JsValue)>);
        Self {
            window,
            origin: Instant::now(),
            next_token: Cell::new(1),
            tasks,
            dispatch,
        }
    }
}

impl Clock for BrowserScheduler {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

impl Scheduler for BrowserScheduler {
    fn set_timeout(&self, delay_ms: f64, callback: Box<dyn FnOnce()>) -> TimerId {
        let token = self.next_token.get();
        self.next_token.set(token.wrapping_add(1));
        match self.window.set_timeout_with_callback_and_timeout_and_arguments_1(
            self.dispatch.as_ref().unchecked_ref(),
            delay_ms.max(0.0).round() as i32,
            &JsValue::from(token),
        ) {
            Ok(handle) => {
                self.tasks.borrow_mut().insert(token, (handle, callback));
            }
            Err(e) => log::warn!("[timer] setTimeout failed: {:?}", e),
        }
        TimerId(token)
    }

    fn clear_timeout(&self, id: TimerId) {
        let removed = self.tasks.borrow_mut().remove(&id.0);
        if let Some((handle, _)) = removed {
            self.window.clear_timeout_with_handle(handle);
        }
    }
}

impl Drop for BrowserScheduler {
    fn drop(&mut self) {
        // the dispatch closure dies with us; pending timers must not call it
        let pending = std::mem::take(&mut *self.tasks.borrow_mut());
        for (handle, _) in pending.into_values() {
            self.window.clear_timeout_with_handle(handle);
        }
    }
}

// ---------------- Analytics ----------------

/// Forwards events to a global `gtag(...)` when the page loaded one.
pub struct WindowAnalytics {
    window: web::Window,
}

impl WindowAnalytics {
    pub fn new(window: web::Window) -> Self {
        Self { window }
    }
}

impl Analytics for WindowAnalytics {
    fn track(&self, event: &str, label: &str) {
        let Ok(gtag) = Reflect::get(&self.window, &"gtag".into()) else {
            return;
        };
        let Ok(gtag) = gtag.dyn_into::<Function>() else {
            return;
        };
        let params = Object::new();
        _ = Reflect::set(&params, &"event_label".into(), &label.into());
        if let Err(e) = gtag.call3(&JsValue::NULL, &"event".into(), &event.into(), &params) {
            log::debug!("[analytics] gtag failed: {:?}", e);
        }
    }
}
