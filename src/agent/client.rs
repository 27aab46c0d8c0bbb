use serde_json::Value;
use tokio::sync::{
    mpsc::{Sender, error::TrySendError},
    oneshot,
};
use tokio_util::sync::CancellationToken;

use super::request::{Call, Dispatch, Request};
use crate::inspector::PickerResolution;
use crate::picker::{EventDisposition, PageEvent, PickerHandle, PickerStatus, SessionId};
use crate::{ComponentId, ComponentNode, Error, ExtractedState, Result};

/// Inspector-side end of the inspection channel.
///
/// Every method is one request/response round trip into the page. Requests
/// issued concurrently are independent; each reply is matched to its own
/// request. A failure of the channel itself is reported as
/// [`Error::Evaluation`] and never retried.
pub struct InspectorClient<E> {
    sender: Sender<Call<E>>,
    cancel_token: CancellationToken,
}

impl<E> Clone for InspectorClient<E> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            cancel_token: self.cancel_token.clone(),
        }
    }
}

impl<E> InspectorClient<E> {
    pub(crate) fn new(sender: Sender<Call<E>>, cancel_token: CancellationToken) -> Self {
        Self {
            sender,
            cancel_token,
        }
    }

    pub async fn list_components(&self) -> Result<Vec<ComponentNode>> {
        self.call(Request::ListComponents).await
    }

    pub async fn get_component_state(&self, id: ComponentId) -> Result<Option<ExtractedState>> {
        self.call(|reply| Request::ComponentState(id, reply)).await
    }

    pub async fn locate_component(&self, element: E) -> Result<Option<ComponentId>> {
        self.call(|reply| Request::Locate(element, reply)).await
    }

    pub async fn arm_picker(&self) -> Result<PickerHandle> {
        self.call(Request::ArmPicker).await
    }

    pub async fn disable_picker(&self, session: SessionId) -> Result<()> {
        self.call(|reply| Request::DisablePicker(session, reply)).await
    }

    pub async fn poll_picker(&self, session: SessionId) -> Result<PickerStatus> {
        self.call(|reply| Request::PollPicker(session, reply)).await
    }

    pub async fn resolve_picker(&self, session: SessionId) -> Result<PickerResolution> {
        self.call(|reply| Request::ResolvePicker(session, reply)).await
    }

    /// Arm the picker, wait for the operator, and resolve the captured
    /// element to a component. `None` when cancelled or when nothing
    /// component-like was under the pointer.
    pub async fn pick(&self) -> Result<Option<ComponentId>> {
        let mut handle = self.arm_picker().await?;
        let outcome = handle.outcome().await;
        let resolution = self.resolve_picker(handle.session()).await?;
        tracing::debug!(session = %handle.session(), ?outcome, ?resolution, "Pick finished");
        match resolution {
            PickerResolution::Selected(id) => Ok(id),
            PickerResolution::Cancelled | PickerResolution::Pending => Ok(None),
        }
    }

    pub async fn reveal(&self, id: ComponentId) -> Result<bool> {
        self.call(|reply| Request::Reveal(id, reply)).await
    }

    pub async fn emit_event(
        &self,
        id: ComponentId,
        event: impl Into<String>,
        payload: Option<Value>,
    ) -> Result<bool> {
        let event = event.into();
        self.call(|reply| Request::Emit {
            id,
            event,
            payload,
            reply,
        })
        .await
    }

    pub async fn list_stores(&self) -> Result<Vec<String>> {
        self.call(Request::ListStores).await
    }

    pub async fn get_store_state(&self, key: impl Into<String>) -> Result<Option<Value>> {
        let key = key.into();
        self.call(|reply| Request::StoreState(key, reply)).await
    }

    /// Stop the page agent. Outstanding and later calls fail.
    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }

    async fn call<T, F>(&self, build: F) -> Result<T>
    where
        F: FnOnce(oneshot::Sender<T>) -> Request<E>,
    {
        let (tx, rx) = oneshot::channel();
        let call = Call::new(build(tx));
        let id = call.id;
        let kind = call.request.name();

        if self.cancel_token.is_cancelled() {
            return Err(Error::evaluation(id, format!("{kind}: page agent was shut down")));
        }
        self.sender
            .send(call)
            .await
            .map_err(|_| Error::evaluation(id, format!("{kind}: page agent is not running")))?;
        rx.await
            .map_err(|_| Error::evaluation(id, format!("{kind}: page agent dropped the request")))
    }
}

/// Feeds DOM events observed on the page into the page agent.
pub struct PageEvents<E> {
    sender: Sender<Dispatch<E>>,
}

impl<E> Clone for PageEvents<E> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<E> PageEvents<E> {
    pub(crate) fn new(sender: Sender<Dispatch<E>>) -> Self {
        Self { sender }
    }

    /// Deliver an event and wait for what the listeners did with it.
    pub async fn dispatch(&self, event: PageEvent<E>) -> Result<EventDisposition> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(Dispatch {
                event,
                reply: Some(tx),
            })
            .await
            .map_err(|_| Error::AgentStopped)?;
        rx.await.map_err(|_| Error::AgentStopped)
    }

    /// Deliver an event without waiting, as pointer moves are.
    pub fn post(&self, event: PageEvent<E>) -> Result<()> {
        self.sender
            .try_send(Dispatch { event, reply: None })
            .map_err(|e| match e {
                TrySendError::Full(_) => Error::ChannelIsFull,
                TrySendError::Closed(_) => Error::AgentStopped,
            })
    }
}
