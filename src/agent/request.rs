use serde_json::Value;
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::inspector::PickerResolution;
use crate::picker::{EventDisposition, PageEvent, PickerHandle, PickerStatus, SessionId};
use crate::{ComponentId, ComponentNode, ExtractedState};

pub(crate) enum Request<E> {
    ListComponents(oneshot::Sender<Vec<ComponentNode>>),
    ComponentState(ComponentId, oneshot::Sender<Option<ExtractedState>>),
    Locate(E, oneshot::Sender<Option<ComponentId>>),
    ArmPicker(oneshot::Sender<PickerHandle>),
    DisablePicker(SessionId, oneshot::Sender<()>),
    PollPicker(SessionId, oneshot::Sender<PickerStatus>),
    ResolvePicker(SessionId, oneshot::Sender<PickerResolution>),
    Reveal(ComponentId, oneshot::Sender<bool>),
    Emit {
        id: ComponentId,
        event: String,
        payload: Option<Value>,
        reply: oneshot::Sender<bool>,
    },
    ListStores(oneshot::Sender<Vec<String>>),
    StoreState(String, oneshot::Sender<Option<Value>>),
}

impl<E> Request<E> {
    pub fn name(&self) -> &'static str {
        match self {
            Request::ListComponents(_) => "list_components",
            Request::ComponentState(..) => "component_state",
            Request::Locate(..) => "locate",
            Request::ArmPicker(_) => "arm_picker",
            Request::DisablePicker(..) => "disable_picker",
            Request::PollPicker(..) => "poll_picker",
            Request::ResolvePicker(..) => "resolve_picker",
            Request::Reveal(..) => "reveal",
            Request::Emit { .. } => "emit",
            Request::ListStores(_) => "list_stores",
            Request::StoreState(..) => "store_state",
        }
    }
}

/// A request tagged with the id used to correlate it in logs and errors.
pub(crate) struct Call<E> {
    pub id: Uuid,
    pub request: Request<E>,
}

impl<E> Call<E> {
    pub fn new(request: Request<E>) -> Self {
        Self {
            id: Uuid::new_v4(),
            request,
        }
    }
}

pub(crate) struct Dispatch<E> {
    pub event: PageEvent<E>,
    pub reply: Option<oneshot::Sender<EventDisposition>>,
}
