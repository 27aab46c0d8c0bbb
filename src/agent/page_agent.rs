use tokio::{
    select,
    sync::mpsc::Receiver,
    time::{Instant, sleep_until},
};
use tokio_util::sync::CancellationToken;

use super::request::{Call, Dispatch, Request};
use crate::{Framework, Inspector};

/// Page-side end of the inspection channel.
///
/// Owns the [`Inspector`] and serves one thing at a time: a request from the
/// client, a DOM event from the page, or a due reveal-highlight transition.
/// Each is handled to completion before the next, so no walk is ever
/// interleaved with page events.
///
/// The host need not be `Send`; drive [`PageAgent::run`] on the thread that
/// owns the page (a current-thread runtime or a `LocalSet`).
pub struct PageAgent<H: Framework> {
    inspector: Inspector<H>,
    requests: Receiver<Call<H::Element>>,
    events: Receiver<Dispatch<H::Element>>,
    cancel_token: CancellationToken,
}

impl<H: Framework> PageAgent<H> {
    pub(crate) fn new(
        inspector: Inspector<H>,
        requests: Receiver<Call<H::Element>>,
        events: Receiver<Dispatch<H::Element>>,
        cancel_token: CancellationToken,
    ) -> Self {
        Self {
            inspector,
            requests,
            events,
            cancel_token,
        }
    }

    pub fn inspector(&self) -> &Inspector<H> {
        &self.inspector
    }

    pub fn inspector_mut(&mut self) -> &mut Inspector<H> {
        &mut self.inspector
    }

    /// Serve until cancelled or until every client handle is dropped.
    pub async fn run(&mut self) {
        tracing::debug!("Page agent started");
        loop {
            let deadline = self.inspector.highlight_deadline();
            select! {
                _ = self.cancel_token.cancelled() => break,
                call = self.requests.recv() => match call {
                    Some(call) => self.handle_call(call),
                    None => break,
                },
                Some(dispatch) = self.events.recv() => {
                    let disposition = self.inspector.dispatch(&dispatch.event);
                    if let Some(reply) = dispatch.reply {
                        let _ = reply.send(disposition);
                    }
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.inspector.advance_highlight(Instant::now());
                },
            }
        }
        tracing::debug!("Page agent stopped");
    }

    /// Consume the agent, handing back the page.
    pub fn into_host(self) -> H {
        self.inspector.into_host()
    }

    fn handle_call(&mut self, call: Call<H::Element>) {
        let Call { id, request } = call;
        tracing::trace!(request = %id, kind = request.name(), "Serving request");

        let inspector = &mut self.inspector;
        // A dropped reply only means the caller stopped waiting.
        match request {
            Request::ListComponents(reply) => {
                let _ = reply.send(inspector.list_components());
            }
            Request::ComponentState(component, reply) => {
                let _ = reply.send(inspector.get_component_state(component));
            }
            Request::Locate(element, reply) => {
                let _ = reply.send(inspector.locate_component(&element));
            }
            Request::ArmPicker(reply) => {
                let _ = reply.send(inspector.arm_picker());
            }
            Request::DisablePicker(session, reply) => {
                inspector.disable_picker(session);
                let _ = reply.send(());
            }
            Request::PollPicker(session, reply) => {
                let _ = reply.send(inspector.poll_picker(session));
            }
            Request::ResolvePicker(session, reply) => {
                let _ = reply.send(inspector.resolve_picker(session));
            }
            Request::Reveal(component, reply) => {
                let _ = reply.send(inspector.reveal(component));
            }
            Request::Emit {
                id: component,
                event,
                payload,
                reply,
            } => {
                let _ = reply.send(inspector.emit_event(component, &event, payload.as_ref()));
            }
            Request::ListStores(reply) => {
                let _ = reply.send(inspector.list_stores());
            }
            Request::StoreState(key, reply) => {
                let _ = reply.send(inspector.get_store_state(&key));
            }
        }
    }
}
