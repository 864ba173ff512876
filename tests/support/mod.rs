// Test doubles shared by the host-side tests: a virtual-time scheduler, an
// in-memory document and a recording analytics sink.

use crate::analytics::Analytics;
use crate::clock::{Clock, Scheduler, TimerId};
use crate::surface::Surface;
use glam::Vec2;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

// ---------------- Scheduler ----------------

type Task = (TimerId, f64, Box<dyn FnOnce()>);

/// Timers fire only when the test advances the clock, in due order.
pub struct ManualScheduler {
    now: Cell<f64>,
    next_id: Cell<u32>,
    tasks: RefCell<Vec<Task>>,
}

impl ManualScheduler {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            now: Cell::new(0.0),
            next_id: Cell::new(1),
            tasks: RefCell::new(Vec::new()),
        })
    }

    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Run every timer due at or before `t`, then park the clock at `t`.
    pub fn advance_to(&self, t: f64) {
        loop {
            let next = {
                let tasks = self.tasks.borrow();
                tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, (_, due, _))| *due <= t)
                    .min_by(|(_, a), (_, b)| {
                        a.1.partial_cmp(&b.1)
                            .unwrap_or(std::cmp::Ordering::Equal)
                            .then(a.0 .0.cmp(&b.0 .0))
                    })
                    .map(|(i, _)| i)
            };
            let Some(i) = next else {
                break;
            };
            let (_, due, task) = self.tasks.borrow_mut().remove(i);
            self.now.set(self.now.get().max(due));
            task();
        }
        self.now.set(self.now.get().max(t));
    }

    pub fn advance_by(&self, dt: f64) {
        self.advance_to(self.now.get() + dt);
    }
}

impl Clock for ManualScheduler {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

impl Scheduler for ManualScheduler {
    fn set_timeout(&self, delay_ms: f64, callback: Box<dyn FnOnce()>) -> TimerId {
        let id = TimerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let due = self.now.get() + delay_ms.max(0.0);
        self.tasks.borrow_mut().push((id, due, callback));
        id
    }

    fn clear_timeout(&self, id: TimerId) {
        let removed: Vec<Task> = {
            let mut tasks = self.tasks.borrow_mut();
            let (gone, keep): (Vec<Task>, Vec<Task>) =
                std::mem::take(&mut *tasks).into_iter().partition(|t| t.0 == id);
            *tasks = keep;
            gone
        };
        drop(removed);
    }
}

// ---------------- Document ----------------

#[derive(Default, Clone, Debug)]
pub struct NodeData {
    pub tag: String,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    pub styles: BTreeMap<String, String>,
    pub text: String,
    pub parent: Option<usize>,
    pub connected: bool,
}

/// In-memory document; nodes are indices and never reused.
pub struct FakeSurface {
    nodes: RefCell<Vec<NodeData>>,
    selectors: RefCell<Vec<(String, usize)>>,
    pub viewport: Cell<Vec2>,
    media: RefCell<Vec<String>>,
    pub opened: RefCell<Vec<String>>,
    pub observer_supported: Cell<bool>,
    pub observed: RefCell<Vec<usize>>,
}

impl FakeSurface {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            nodes: RefCell::new(Vec::new()),
            selectors: RefCell::new(Vec::new()),
            viewport: Cell::new(viewport),
            media: RefCell::new(Vec::new()),
            opened: RefCell::new(Vec::new()),
            observer_supported: Cell::new(true),
            observed: RefCell::new(Vec::new()),
        }
    }

    /// The regions a full landing page provides.
    pub fn landing_page(viewport: Vec2) -> Self {
        let s = Self::new(viewport);
        let html = s.add("html", None);
        let body = s.add("body", Some(html));
        let nav = s.add(".navbar", Some(body));
        for lang in ["en", "fr"] {
            let b = s.add(".lang-btn", Some(nav));
            s.set_attribute(&b, "data-lang", lang);
        }
        let hero = s.add(".hero", Some(body));
        s.add(".grid-overlay", Some(hero));
        s.add(".particles", Some(hero));
        let card = s.add(".contact-card", Some(body));
        let email = s.add("#email-action", Some(card));
        s.set_attribute(&email, "data-email", "team@landing.test");
        s.add(".animate-on-scroll", Some(body));
        s.add(".animate-on-scroll", Some(body));
        s
    }

    /// Add a connected node reachable through `selector`.
    pub fn add(&self, selector: &str, parent: Option<usize>) -> usize {
        let mut data = NodeData {
            connected: true,
            parent,
            ..NodeData::default()
        };
        if let Some(class) = selector.strip_prefix('.') {
            data.tag = "div".into();
            data.classes.push(class.into());
        } else if let Some(id) = selector.strip_prefix('#') {
            data.tag = "a".into();
            data.attrs.insert("id".into(), id.into());
        } else {
            data.tag = selector.into();
        }
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(data);
        let id = nodes.len() - 1;
        self.selectors.borrow_mut().push((selector.to_string(), id));
        id
    }

    pub fn set_media(&self, query: &str) {
        self.media.borrow_mut().push(query.to_string());
    }

    pub fn node(&self, id: usize) -> NodeData {
        self.nodes.borrow()[id].clone()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn has_class(&self, id: usize, class: &str) -> bool {
        self.nodes.borrow()[id].classes.iter().any(|c| c == class)
    }

    pub fn transform(&self, id: usize) -> Option<String> {
        self.nodes.borrow()[id].styles.get("transform").cloned()
    }

    pub fn text(&self, id: usize) -> String {
        self.nodes.borrow()[id].text.clone()
    }

    pub fn first(&self, selector: &str) -> usize {
        self.query(selector)
            .unwrap_or_else(|| panic!("no node for {}", selector))
    }

    /// Connected nodes carrying `class`.
    pub fn live_with_class(&self, class: &str) -> Vec<usize> {
        self.nodes
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, n)| n.connected && n.classes.iter().any(|c| c == class))
            .map(|(i, _)| i)
            .collect()
    }

    /// Every node ever created with `class`, connected or not.
    pub fn created_with_class(&self, class: &str) -> usize {
        self.nodes
            .borrow()
            .iter()
            .filter(|n| n.classes.iter().any(|c| c == class))
            .count()
    }
}

impl Surface for FakeSurface {
    type Node = usize;

    fn query(&self, selector: &str) -> Option<usize> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<usize> {
        let nodes = self.nodes.borrow();
        let mut out: Vec<usize> = self
            .selectors
            .borrow()
            .iter()
            .filter(|(s, _)| s == selector)
            .map(|(_, id)| *id)
            .collect();
        if let Some(class) = selector.strip_prefix('.') {
            for (id, n) in nodes.iter().enumerate() {
                if n.classes.iter().any(|c| c == class) && !out.contains(&id) {
                    out.push(id);
                }
            }
        }
        out.retain(|id| nodes[*id].connected);
        out.sort_unstable();
        out
    }

    fn create_child(&self, parent: &usize, tag: &str, class: &str) -> Option<usize> {
        let mut nodes = self.nodes.borrow_mut();
        if !nodes.get(*parent).is_some_and(|p| p.connected) {
            return None;
        }
        nodes.push(NodeData {
            tag: tag.into(),
            classes: class.split_whitespace().map(String::from).collect(),
            parent: Some(*parent),
            connected: true,
            ..NodeData::default()
        });
        Some(nodes.len() - 1)
    }

    fn remove(&self, node: &usize) {
        self.nodes.borrow_mut()[*node].connected = false;
    }

    fn set_transform(&self, node: &usize, css: &str) {
        self.set_style(node, "transform", css);
    }

    fn set_style(&self, node: &usize, property: &str, value: &str) {
        self.nodes.borrow_mut()[*node]
            .styles
            .insert(property.into(), value.into());
    }

    fn set_text(&self, node: &usize, text: &str) {
        self.nodes.borrow_mut()[*node].text = text.into();
    }

    fn attribute(&self, node: &usize, name: &str) -> Option<String> {
        self.nodes.borrow()[*node].attrs.get(name).cloned()
    }

    fn set_attribute(&self, node: &usize, name: &str, value: &str) {
        self.nodes.borrow_mut()[*node]
            .attrs
            .insert(name.into(), value.into());
    }

    fn toggle_class(&self, node: &usize, class: &str, on: bool) {
        let mut nodes = self.nodes.borrow_mut();
        let classes = &mut nodes[*node].classes;
        let present = classes.iter().any(|c| c == class);
        if on && !present {
            classes.push(class.into());
        } else if !on && present {
            classes.retain(|c| c != class);
        }
    }

    fn viewport_size(&self) -> Vec2 {
        self.viewport.get()
    }

    fn media_matches(&self, query: &str) -> bool {
        self.media.borrow().iter().any(|q| q == query)
    }

    fn open_url(&self, url: &str) {
        self.opened.borrow_mut().push(url.to_string());
    }

    fn reveal_on_intersect(&self, nodes: &[usize], _class: &str) -> bool {
        if !self.observer_supported.get() {
            return false;
        }
        self.observed.borrow_mut().extend_from_slice(nodes);
        true
    }
}

// ---------------- Analytics ----------------

#[derive(Default)]
pub struct RecordingAnalytics {
    pub events: RefCell<Vec<(String, String)>>,
}

impl Analytics for RecordingAnalytics {
    fn track(&self, event: &str, label: &str) {
        self.events
            .borrow_mut()
            .push((event.to_string(), label.to_string()));
    }
}
