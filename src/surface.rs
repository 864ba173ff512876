use glam::Vec2;

/// The slice of the document the page needs.
///
/// `dom::DomSurface` implements it over `web-sys`; keeping handlers generic
/// over it lets the effects and lifecycle run without a browser. Writes are
/// best-effort: a failing DOM call is ignored rather than reported.
pub trait Surface {
    type Node: Clone + PartialEq;

    fn query(&self, selector: &str) -> Option<Self::Node>;
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    /// Create `<tag class="class">` as the last child of `parent`.
    fn create_child(&self, parent: &Self::Node, tag: &str, class: &str) -> Option<Self::Node>;
    fn remove(&self, node: &Self::Node);

    fn set_transform(&self, node: &Self::Node, css: &str);
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);
    fn set_text(&self, node: &Self::Node, text: &str);
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    fn toggle_class(&self, node: &Self::Node, class: &str, on: bool);

    /// Layout viewport size in CSS pixels.
    fn viewport_size(&self) -> Vec2;
    fn media_matches(&self, query: &str) -> bool;
    fn open_url(&self, url: &str);

    /// Add `class` to each node the first time it scrolls into view.
    /// Returns `false` when the environment cannot observe intersections.
    fn reveal_on_intersect(&self, nodes: &[Self::Node], class: &str) -> bool;
}
