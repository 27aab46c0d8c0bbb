use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use uuid::Uuid;

/// Opaque identifier of one armed picker session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Completion signal of a picker session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickerOutcome {
    Pending,
    Selected,
    Cancelled,
}

/// `{selected, cancelled}` flag pair reported by a status poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerStatus {
    pub selected: bool,
    pub cancelled: bool,
}

impl From<PickerOutcome> for PickerStatus {
    fn from(outcome: PickerOutcome) -> Self {
        PickerStatus {
            selected: outcome == PickerOutcome::Selected,
            cancelled: outcome == PickerOutcome::Cancelled,
        }
    }
}

/// What the page holds for a session: the captured element once selected.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerSelection<E> {
    Pending,
    Selected(E),
    Cancelled,
}

/// Handle to an armed session, returned by `arm`.
///
/// Await [`PickerHandle::outcome`] for the one-shot completion signal instead
/// of polling the page.
#[derive(Debug, Clone)]
pub struct PickerHandle {
    session: SessionId,
    outcome: watch::Receiver<PickerOutcome>,
}

impl PickerHandle {
    pub(crate) fn new(session: SessionId, outcome: watch::Receiver<PickerOutcome>) -> Self {
        Self { session, outcome }
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Current outcome without waiting.
    pub fn current(&self) -> PickerOutcome {
        *self.outcome.borrow()
    }

    /// Wait until the session is selected or cancelled.
    ///
    /// A session torn down without a decision (its page side is gone)
    /// reports [`PickerOutcome::Cancelled`].
    pub async fn outcome(&mut self) -> PickerOutcome {
        match self
            .outcome
            .wait_for(|outcome| *outcome != PickerOutcome::Pending)
            .await
        {
            Ok(outcome) => *outcome,
            Err(_) => PickerOutcome::Cancelled,
        }
    }
}
