/// A DOM event observed on the inspected document (capture phase).
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent<E> {
    PointerMove { target: E },
    Click { target: E },
    KeyDown { key: String },
}

impl<E> PageEvent<E> {
    pub fn key(key: impl Into<String>) -> Self {
        PageEvent::KeyDown { key: key.into() }
    }

    pub fn escape() -> Self {
        Self::key("Escape")
    }
}

/// What the listeners did with an event. The page applies it before the
/// event continues to its own handlers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventDisposition {
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

impl EventDisposition {
    pub(crate) fn swallowed() -> Self {
        Self {
            default_prevented: true,
            propagation_stopped: true,
        }
    }

    /// True when the page never learns about the event.
    pub fn is_swallowed(&self) -> bool {
        self.default_prevented && self.propagation_stopped
    }
}
