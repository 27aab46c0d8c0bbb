use crate::Live;

/// Description of a component instance to add to a [`MemoryHost`](super::MemoryHost).
///
/// ```rust
/// use lensing::{Live, memory::ComponentSpec};
///
/// let spec = ComponentSpec::named("TodoList")
///     .with_props(Live::object([("title", Live::from("Groceries"))]))
///     .with_emitter();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ComponentSpec {
    pub(crate) internal_name: Option<String>,
    pub(crate) type_name: Option<String>,
    pub(crate) props: Option<Live>,
    pub(crate) emitter: bool,
}

impl ComponentSpec {
    /// Component with a compiler-assigned internal name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            internal_name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Component whose only name is the one declared on its type.
    pub fn typed(name: impl Into<String>) -> Self {
        Self {
            type_name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_type_name(mut self, name: impl Into<String>) -> Self {
        self.type_name = Some(name.into());
        self
    }

    pub fn with_props(mut self, props: Live) -> Self {
        self.props = Some(props);
        self
    }

    pub fn with_emitter(mut self) -> Self {
        self.emitter = true;
        self
    }
}
