use tokio::sync::watch;

use crate::{Dom, OverlayKind, OverlayStyle};

use super::{EventDisposition, PageEvent, PickerHandle, PickerOutcome, PickerSelection, PickerStatus, SessionId};

/// Lifecycle of the picker:
///
/// ```text
/// Idle → Armed → Selected | Cancelled → Idle
/// ```
///
/// Listeners are attached only while `Armed`; in every other state page
/// events pass through untouched.
#[derive(Debug)]
enum State<E> {
    Idle,
    Armed {
        session: SessionId,
        hovered: Option<E>,
    },
    Selected {
        session: SessionId,
        element: E,
    },
    Cancelled {
        session: SessionId,
    },
}

/// Single-instance interactive picker living in the inspected page.
pub struct PickerSession<E> {
    state: State<E>,
    notifier: Option<watch::Sender<PickerOutcome>>,
    style: OverlayStyle,
}

impl<E: Clone + PartialEq + std::fmt::Debug> PickerSession<E> {
    pub fn new(style: OverlayStyle) -> Self {
        Self {
            state: State::Idle,
            notifier: None,
            style,
        }
    }

    /// Start a new session, tearing down one that is still armed.
    pub fn arm<D: Dom<Element = E>>(&mut self, host: &mut D) -> PickerHandle {
        if let State::Armed { session, .. } = &self.state {
            tracing::debug!(%session, "Replacing armed picker session");
            let session = *session;
            self.disable(host, session);
        }

        let session = SessionId::new();
        let (tx, rx) = watch::channel(PickerOutcome::Pending);
        self.notifier = Some(tx);
        self.state = State::Armed {
            session,
            hovered: None,
        };
        tracing::debug!(%session, "Picker armed");
        PickerHandle::new(session, rx)
    }

    pub fn is_listening(&self) -> bool {
        matches!(self.state, State::Armed { .. })
    }

    pub fn current_session(&self) -> Option<SessionId> {
        match &self.state {
            State::Idle => None,
            State::Armed { session, .. }
            | State::Selected { session, .. }
            | State::Cancelled { session } => Some(*session),
        }
    }

    /// Feed one page event to the listeners.
    pub fn handle<D: Dom<Element = E>>(&mut self, host: &mut D, event: &PageEvent<E>) -> EventDisposition {
        let State::Armed { session, hovered } = &mut self.state else {
            return EventDisposition::default();
        };
        let session = *session;

        match event {
            PageEvent::PointerMove { target } => {
                let rect = host.page_rect(target);
                host.show_overlay(OverlayKind::Picker, rect, &self.style);
                *hovered = Some(target.clone());
                EventDisposition::default()
            }
            PageEvent::Click { target } => {
                let element = hovered.take().unwrap_or_else(|| target.clone());
                host.hide_overlay(OverlayKind::Picker);
                tracing::debug!(%session, ?element, "Picker selected element");
                self.state = State::Selected { session, element };
                self.notify(PickerOutcome::Selected);
                EventDisposition::swallowed()
            }
            PageEvent::KeyDown { key } if key == "Escape" => {
                host.hide_overlay(OverlayKind::Picker);
                tracing::debug!(%session, "Picker cancelled");
                self.state = State::Cancelled { session };
                self.notify(PickerOutcome::Cancelled);
                EventDisposition::swallowed()
            }
            PageEvent::KeyDown { .. } => EventDisposition::default(),
        }
    }

    pub fn status(&self, session: SessionId) -> PickerStatus {
        match &self.state {
            State::Selected { session: s, .. } if *s == session => PickerOutcome::Selected.into(),
            State::Cancelled { session: s } if *s == session => PickerOutcome::Cancelled.into(),
            _ => PickerStatus::default(),
        }
    }

    /// Consume a decided session, returning to `Idle`. An armed session stays
    /// armed and reports `Pending`; an unknown one reports `Cancelled`.
    pub fn finish(&mut self, session: SessionId) -> PickerSelection<E> {
        if self.current_session() != Some(session) {
            return PickerSelection::Cancelled;
        }
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Selected { element, .. } => {
                self.notifier = None;
                PickerSelection::Selected(element)
            }
            State::Cancelled { .. } => {
                self.notifier = None;
                PickerSelection::Cancelled
            }
            armed @ State::Armed { .. } => {
                self.state = armed;
                PickerSelection::Pending
            }
            State::Idle => PickerSelection::Cancelled,
        }
    }

    /// Force the session back to `Idle`: detach listeners, drop any pending
    /// selection and remove the overlay. Idempotent, and a no-op for a session
    /// that is no longer current.
    pub fn disable<D: Dom<Element = E>>(&mut self, host: &mut D, session: SessionId) {
        if self.current_session() != Some(session) {
            return;
        }
        if self.is_listening() {
            self.notify(PickerOutcome::Cancelled);
        }
        self.state = State::Idle;
        self.notifier = None;
        host.remove_overlay(OverlayKind::Picker);
        tracing::debug!(%session, "Picker disabled");
    }

    fn notify(&self, outcome: PickerOutcome) {
        if let Some(notifier) = &self.notifier {
            notifier.send_replace(outcome);
        }
    }
}
