//! Capability traits over the inspected page.
//!
//! All host-specific knowledge lives behind two traits:
//!
//! - [`Dom`]: the document side. Element ancestry, containment, geometry,
//!   scrolling and the overlays the inspector draws.
//! - [`Framework`]: the reactive framework's internal object graph. Tree
//!   links, component boundaries, declared inputs, dependency records and the
//!   store registry.
//!
//! The core never owns anything it reads through these traits. Handles
//! (`Element`, `Link`, `Component`) are observed during one call and dropped
//! at its end, so an implementation is free to hand out cheap references into
//! a graph that the page keeps mutating between calls.
//!
//! [`MemoryHost`](crate::memory::MemoryHost) is a complete in-memory
//! implementation.

mod geometry;
mod overlay;

pub use geometry::{Point, Rect, Size};
pub use overlay::{OverlayKind, OverlayStyle};

use serde_json::Value;

use crate::{DependencyRecord, Live};

pub trait Dom {
    type Element: Clone + PartialEq + std::fmt::Debug;

    fn parent_element(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Inclusive containment: an element contains itself.
    fn contains(&self, ancestor: &Self::Element, element: &Self::Element) -> bool;

    fn offset_size(&self, element: &Self::Element) -> Size;

    /// Bounding rectangle relative to the viewport.
    fn client_rect(&self, element: &Self::Element) -> Rect;

    fn scroll_offset(&self) -> Point;

    /// Topmost element under a viewport point.
    fn element_at(&self, point: Point) -> Option<Self::Element>;

    fn scroll_into_view(&mut self, element: &Self::Element);

    /// Create the overlay if needed, make it visible (fully opaque) and place
    /// it over `rect` (page coordinates).
    fn show_overlay(&mut self, kind: OverlayKind, rect: Rect, style: &OverlayStyle);

    fn set_overlay_opacity(&mut self, kind: OverlayKind, opacity: f32);

    /// Keep the overlay in the page but stop displaying it.
    fn hide_overlay(&mut self, kind: OverlayKind);

    /// Remove the overlay from the page. Removing a missing overlay is a no-op.
    fn remove_overlay(&mut self, kind: OverlayKind);

    /// Bounding rectangle relative to the page (viewport rect plus scroll).
    fn page_rect(&self, element: &Self::Element) -> Rect {
        self.client_rect(element).offset(self.scroll_offset())
    }
}

/// Read access to the framework's live component graph.
///
/// A *link* is one node of the framework's internal tree (a virtual node).
/// Some links are component boundaries and resolve to a *component*
/// instance; the rest are structural and only matter for their children.
pub trait Framework: Dom {
    type Link: Clone;
    type Component: Clone;

    /// Tree link held by the first element in the document that carries the
    /// framework's internal marker.
    fn root_link(&self) -> Option<Self::Link>;

    /// Tree link attached to this particular element, if any.
    fn element_link(&self, element: &Self::Element) -> Option<Self::Link>;

    /// Component instance behind a link, when the link is a component boundary.
    fn component(&self, link: &Self::Link) -> Option<Self::Component>;

    /// Root link of the tree a component rendered.
    fn sub_tree(&self, component: &Self::Component) -> Option<Self::Link>;

    /// Child links in order; `None` when the link has no child sequence.
    /// Non-object children (plain text) are not links and are skipped.
    fn children(&self, link: &Self::Link) -> Option<Vec<Self::Link>>;

    fn parent_link(&self, link: &Self::Link) -> Option<Self::Link>;

    /// Reference equality of component instances.
    fn same_component(&self, a: &Self::Component, b: &Self::Component) -> bool;

    /// Compiler-assigned name (from the component's source file).
    fn internal_name(&self, component: &Self::Component) -> Option<String>;

    /// Name declared on the component type.
    fn type_name(&self, component: &Self::Component) -> Option<String>;

    /// Element the component rendered: its own link's element, falling back
    /// to the element of its rendered sub tree.
    fn rendered_element(&self, component: &Self::Component) -> Option<Self::Element>;

    fn declared_inputs(&self, component: &Self::Component) -> Option<Live>;

    fn dependency_records(&self, component: &Self::Component) -> Vec<DependencyRecord>;

    /// Fire a component event. Returns `false` when the component has no
    /// emitter.
    fn emit(&mut self, component: &Self::Component, event: &str, payload: Option<&Value>)
    -> bool;

    /// Keys of the store registry in registration order, `None` when the
    /// application has no registry.
    fn store_keys(&self) -> Option<Vec<String>>;

    fn store_state(&self, key: &str) -> Option<Live>;
}
