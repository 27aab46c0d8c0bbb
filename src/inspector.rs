use serde_json::Value;
use tokio::time::Instant;

use crate::extractor::extract_state;
use crate::picker::{EventDisposition, PageEvent, PickerHandle, PickerSelection, PickerSession, PickerStatus, SessionId};
use crate::{ComponentId, ComponentNode, Config, ExtractedState, Framework, Highlighter, Point, Walker, locator, stores};

/// Result of the final step of a pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerResolution {
    /// An element was captured; the component it resolves to, if any.
    Selected(Option<ComponentId>),
    Cancelled,
    Pending,
}

/// Synchronous inspection operations over a host page.
///
/// Every query walks the live tree afresh; identities returned by one call
/// are only valid until the page re-renders. The inspector itself keeps just
/// the picker session and the reveal highlight.
///
/// # Example
///
/// ```ignore
/// let mut inspector = Inspector::new(host, Config::default());
/// for node in inspector.list_components() {
///     println!("{}{} {}", "  ".repeat(node.depth), node.identity, node.display_name);
/// }
/// let state = inspector.get_component_state(ComponentId::new(0));
/// ```
pub struct Inspector<H: Framework> {
    host: H,
    picker: PickerSession<H::Element>,
    highlighter: Highlighter,
}

impl<H: Framework> Inspector<H> {
    pub fn new(host: H, config: Config) -> Self {
        Self {
            host,
            picker: PickerSession::new(config.picker_overlay.clone()),
            highlighter: Highlighter::new(
                config.reveal_duration,
                config.reveal_fade,
                config.reveal_overlay.clone(),
            ),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the page, for hosts that are mutated in place.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn list_components(&self) -> Vec<ComponentNode> {
        Walker::new(&self.host).walk()
    }

    pub fn get_component_state(&self, id: ComponentId) -> Option<ExtractedState> {
        let visit = Walker::new(&self.host).find_by_id(id)?;
        Some(extract_state(&self.host, &visit.component))
    }

    pub fn locate_component(&self, element: &H::Element) -> Option<ComponentId> {
        locator::locate(&self.host, element)
    }

    pub fn locate_at(&self, point: Point) -> Option<ComponentId> {
        locator::locate_at(&self.host, point)
    }

    pub fn arm_picker(&mut self) -> PickerHandle {
        self.picker.arm(&mut self.host)
    }

    pub fn disable_picker(&mut self, session: SessionId) {
        self.picker.disable(&mut self.host, session);
    }

    pub fn poll_picker(&self, session: SessionId) -> PickerStatus {
        self.picker.status(session)
    }

    pub fn is_picking(&self) -> bool {
        self.picker.is_listening()
    }

    /// Deliver a DOM event to the inspector's listeners.
    pub fn dispatch(&mut self, event: &PageEvent<H::Element>) -> EventDisposition {
        self.picker.handle(&mut self.host, event)
    }

    /// Consume a decided pick, mapping the captured element to a component.
    pub fn resolve_picker(&mut self, session: SessionId) -> PickerResolution {
        match self.picker.finish(session) {
            PickerSelection::Selected(element) => {
                PickerResolution::Selected(locator::locate(&self.host, &element))
            }
            PickerSelection::Cancelled => PickerResolution::Cancelled,
            PickerSelection::Pending => PickerResolution::Pending,
        }
    }

    /// Scroll a component into view and highlight it briefly.
    pub fn reveal(&mut self, id: ComponentId) -> bool {
        let Some(visit) = Walker::new(&self.host).find_by_id(id) else {
            return false;
        };
        let Some(element) = self.host.rendered_element(&visit.component) else {
            tracing::debug!(identity = %id, "Component has no rendered element to reveal");
            return false;
        };
        self.highlighter.show(&mut self.host, &element, Instant::now());
        true
    }

    /// When the reveal highlight next needs attention.
    pub fn highlight_deadline(&self) -> Option<Instant> {
        self.highlighter.deadline()
    }

    pub fn advance_highlight(&mut self, now: Instant) {
        self.highlighter.advance(&mut self.host, now);
    }

    pub fn emit_event(&mut self, id: ComponentId, event: &str, payload: Option<&Value>) -> bool {
        let Some(visit) = Walker::new(&self.host).find_by_id(id) else {
            return false;
        };
        let emitted = self.host.emit(&visit.component, event, payload);
        tracing::debug!(identity = %id, event, emitted, "Emitted component event");
        emitted
    }

    pub fn list_stores(&self) -> Vec<String> {
        stores::list_stores(&self.host)
    }

    pub fn get_store_state(&self, key: &str) -> Option<Value> {
        stores::store_state(&self.host, key)
    }
}
