//! In-memory page.
//!
//! [`MemoryHost`] implements [`Dom`] and [`Framework`] over plain arenas:
//! elements with layout rectangles, tree links, and component instances.
//! It is handy for headless replays of captured pages, demos and tests.
//!
//! # Example
//!
//! ```rust
//! use lensing::{Rect, memory::{ComponentSpec, MemoryHost}};
//!
//! let mut host = MemoryHost::new();
//! let container = host.element("div", Rect::new(0.0, 0.0, 800.0, 600.0), None);
//! let app = host.add_component(ComponentSpec::named("App"));
//! let app_root = host.element("main", Rect::new(0.0, 0.0, 800.0, 600.0), Some(container));
//! let tree = host.fragment();
//! host.bind(tree, app_root);
//! host.render(app, tree);
//! let root = host.link_of(app);
//! host.mount(container, root);
//! ```

mod component_spec;

pub use component_spec::ComponentSpec;

use std::collections::HashMap;

use serde_json::Value;

use crate::{DependencyRecord, Dom, Framework, Live, OverlayKind, OverlayStyle, Point, Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(usize);

/// An event fired through a component's emitter.
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedEvent {
    pub event: String,
    pub payload: Option<Value>,
}

/// An overlay as currently drawn in the page.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayState {
    pub rect: Rect,
    pub style: OverlayStyle,
    pub visible: bool,
    pub opacity: f32,
}

struct ElementNode {
    tag: String,
    parent: Option<ElementId>,
    /// Page-relative layout box.
    rect: Rect,
    link: Option<LinkId>,
}

#[derive(Default)]
struct LinkNode {
    parent: Option<LinkId>,
    component: Option<InstanceId>,
    children: Option<Vec<LinkId>>,
    element: Option<ElementId>,
}

struct Instance {
    spec: ComponentSpec,
    link: LinkId,
    sub_tree: Option<LinkId>,
    records: Vec<DependencyRecord>,
    emitted: Vec<EmittedEvent>,
}

#[derive(Default)]
pub struct MemoryHost {
    elements: Vec<ElementNode>,
    links: Vec<LinkNode>,
    instances: Vec<Instance>,
    mount: Option<ElementId>,
    stores: Option<Vec<(String, Live)>>,
    scroll: Point,
    overlays: HashMap<OverlayKind, OverlayState>,
    scrolled_into_view: Vec<ElementId>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element with a page-relative layout box.
    pub fn element(&mut self, tag: &str, rect: Rect, parent: Option<ElementId>) -> ElementId {
        self.elements.push(ElementNode {
            tag: tag.to_string(),
            parent,
            rect,
            link: None,
        });
        ElementId(self.elements.len() - 1)
    }

    /// Add a structural (non-component) link with an empty child list.
    pub fn fragment(&mut self) -> LinkId {
        self.push_link(LinkNode {
            children: Some(Vec::new()),
            ..LinkNode::default()
        })
    }

    /// Add a structural link without any child sequence.
    pub fn leaf(&mut self) -> LinkId {
        self.push_link(LinkNode::default())
    }

    /// Add a component instance together with the link that hosts it.
    pub fn add_component(&mut self, spec: ComponentSpec) -> InstanceId {
        let id = InstanceId(self.instances.len());
        let link = self.push_link(LinkNode {
            component: Some(id),
            ..LinkNode::default()
        });
        self.instances.push(Instance {
            spec,
            link,
            sub_tree: None,
            records: Vec::new(),
            emitted: Vec::new(),
        });
        id
    }

    pub fn link_of(&self, instance: InstanceId) -> LinkId {
        self.instances[instance.0].link
    }

    /// Set the tree a component rendered.
    pub fn render(&mut self, instance: InstanceId, sub_tree: LinkId) {
        let owner = self.instances[instance.0].link;
        self.instances[instance.0].sub_tree = Some(sub_tree);
        self.links[sub_tree.0].parent = Some(owner);
    }

    /// Append `child` to the child sequence of `parent`.
    pub fn append(&mut self, parent: LinkId, child: LinkId) {
        self.links[parent.0]
            .children
            .get_or_insert_with(Vec::new)
            .push(child);
        self.links[child.0].parent = Some(parent);
    }

    /// Detach `child` from `parent`, as a re-render that drops it would.
    pub fn remove_child(&mut self, parent: LinkId, child: LinkId) {
        if let Some(children) = self.links[parent.0].children.as_mut() {
            children.retain(|c| *c != child);
        }
        self.links[child.0].parent = None;
    }

    /// Attach a link to the element it rendered, marking the element.
    pub fn bind(&mut self, link: LinkId, element: ElementId) {
        self.links[link.0].element = Some(element);
        self.elements[element.0].link = Some(link);
    }

    /// Mount the application's root link on a container element.
    pub fn mount(&mut self, container: ElementId, root: LinkId) {
        self.elements[container.0].link = Some(root);
        self.mount = Some(container);
    }

    pub fn add_record(&mut self, instance: InstanceId, record: DependencyRecord) {
        self.instances[instance.0].records.push(record);
    }

    pub fn set_props(&mut self, instance: InstanceId, props: Live) {
        self.instances[instance.0].spec.props = Some(props);
    }

    pub fn add_store(&mut self, key: impl Into<String>, state: Live) {
        self.stores.get_or_insert_with(Vec::new).push((key.into(), state));
    }

    pub fn set_rect(&mut self, element: ElementId, rect: Rect) {
        self.elements[element.0].rect = rect;
    }

    pub fn set_scroll(&mut self, scroll: Point) {
        self.scroll = scroll;
    }

    pub fn tag(&self, element: ElementId) -> &str {
        &self.elements[element.0].tag
    }

    pub fn overlay(&self, kind: OverlayKind) -> Option<&OverlayState> {
        self.overlays.get(&kind)
    }

    pub fn emitted(&self, instance: InstanceId) -> &[EmittedEvent] {
        &self.instances[instance.0].emitted
    }

    pub fn scrolled_into_view(&self) -> &[ElementId] {
        &self.scrolled_into_view
    }

    fn push_link(&mut self, link: LinkNode) -> LinkId {
        self.links.push(link);
        LinkId(self.links.len() - 1)
    }

    fn depth(&self, element: ElementId) -> usize {
        std::iter::successors(self.elements[element.0].parent, |p| self.elements[p.0].parent).count()
    }
}

impl Dom for MemoryHost {
    type Element = ElementId;

    fn parent_element(&self, element: &ElementId) -> Option<ElementId> {
        self.elements[element.0].parent
    }

    fn contains(&self, ancestor: &ElementId, element: &ElementId) -> bool {
        std::iter::successors(Some(*element), |e| self.elements[e.0].parent).any(|e| e == *ancestor)
    }

    fn offset_size(&self, element: &ElementId) -> Size {
        self.elements[element.0].rect.size()
    }

    fn client_rect(&self, element: &ElementId) -> Rect {
        self.elements[element.0]
            .rect
            .offset(Point::new(-self.scroll.x, -self.scroll.y))
    }

    fn scroll_offset(&self) -> Point {
        self.scroll
    }

    fn element_at(&self, point: Point) -> Option<ElementId> {
        (0..self.elements.len())
            .map(ElementId)
            .filter(|e| self.client_rect(e).contains_point(point))
            .max_by_key(|e| (self.depth(*e), *e))
    }

    fn scroll_into_view(&mut self, element: &ElementId) {
        self.scrolled_into_view.push(*element);
    }

    fn show_overlay(&mut self, kind: OverlayKind, rect: Rect, style: &OverlayStyle) {
        self.overlays.insert(
            kind,
            OverlayState {
                rect,
                style: style.clone(),
                visible: true,
                opacity: 1.0,
            },
        );
    }

    fn set_overlay_opacity(&mut self, kind: OverlayKind, opacity: f32) {
        if let Some(overlay) = self.overlays.get_mut(&kind) {
            overlay.opacity = opacity;
        }
    }

    fn hide_overlay(&mut self, kind: OverlayKind) {
        if let Some(overlay) = self.overlays.get_mut(&kind) {
            overlay.visible = false;
        }
    }

    fn remove_overlay(&mut self, kind: OverlayKind) {
        self.overlays.remove(&kind);
    }
}

impl Framework for MemoryHost {
    type Link = LinkId;
    type Component = InstanceId;

    fn root_link(&self) -> Option<LinkId> {
        self.mount
            .and_then(|container| self.elements[container.0].link)
            .or_else(|| self.elements.iter().find_map(|e| e.link))
    }

    fn element_link(&self, element: &ElementId) -> Option<LinkId> {
        self.elements[element.0].link
    }

    fn component(&self, link: &LinkId) -> Option<InstanceId> {
        self.links[link.0].component
    }

    fn sub_tree(&self, component: &InstanceId) -> Option<LinkId> {
        self.instances[component.0].sub_tree
    }

    fn children(&self, link: &LinkId) -> Option<Vec<LinkId>> {
        self.links[link.0].children.clone()
    }

    fn parent_link(&self, link: &LinkId) -> Option<LinkId> {
        self.links[link.0].parent
    }

    fn same_component(&self, a: &InstanceId, b: &InstanceId) -> bool {
        a == b
    }

    fn internal_name(&self, component: &InstanceId) -> Option<String> {
        self.instances[component.0].spec.internal_name.clone()
    }

    fn type_name(&self, component: &InstanceId) -> Option<String> {
        self.instances[component.0].spec.type_name.clone()
    }

    fn rendered_element(&self, component: &InstanceId) -> Option<ElementId> {
        let instance = &self.instances[component.0];
        self.links[instance.link.0]
            .element
            .or_else(|| instance.sub_tree.and_then(|tree| self.links[tree.0].element))
    }

    fn declared_inputs(&self, component: &InstanceId) -> Option<Live> {
        self.instances[component.0].spec.props.clone()
    }

    fn dependency_records(&self, component: &InstanceId) -> Vec<DependencyRecord> {
        self.instances[component.0].records.clone()
    }

    fn emit(&mut self, component: &InstanceId, event: &str, payload: Option<&Value>) -> bool {
        let instance = &mut self.instances[component.0];
        if !instance.spec.emitter {
            return false;
        }
        instance.emitted.push(EmittedEvent {
            event: event.to_string(),
            payload: payload.cloned(),
        });
        true
    }

    fn store_keys(&self) -> Option<Vec<String>> {
        self.stores
            .as_ref()
            .map(|stores| stores.iter().map(|(key, _)| key.clone()).collect())
    }

    fn store_state(&self, key: &str) -> Option<Live> {
        self.stores
            .as_ref()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, state)| state.clone())
    }
}
