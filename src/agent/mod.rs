//! Asynchronous inspection boundary.
//!
//! The inspector surface and the inspected page live in different contexts.
//! [`connect`] builds both ends of the channel between them:
//!
//! - [`PageAgent`] runs inside the page, owns the host and answers requests,
//! - [`InspectorClient`] is the surface's handle for issuing requests,
//! - [`PageEvents`] is how the page hands its DOM events to the agent.
//!
//! # Example
//!
//! ```ignore
//! let (mut agent, client, events) = lensing::agent::connect(host, Config::default());
//!
//! tokio::join!(agent.run(), async {
//!     let components = client.list_components().await?;
//!     let state = client.get_component_state(components[0].identity).await?;
//!     client.shutdown();
//!     Ok::<_, lensing::Error>(())
//! });
//! ```

mod client;
mod page_agent;
mod request;

pub use client::{InspectorClient, PageEvents};
pub use page_agent::PageAgent;

use tokio::sync::mpsc::channel;
use tokio_util::sync::CancellationToken;

use crate::{Config, Framework, Inspector};

pub fn connect<H: Framework>(
    host: H,
    config: Config,
) -> (PageAgent<H>, InspectorClient<H::Element>, PageEvents<H::Element>) {
    let (request_tx, request_rx) = channel(config.channel_size);
    let (event_tx, event_rx) = channel(config.event_channel_size);
    let cancel_token = CancellationToken::new();

    let agent = PageAgent::new(
        Inspector::new(host, config),
        request_rx,
        event_rx,
        cancel_token.clone(),
    );
    (
        agent,
        InspectorClient::new(request_tx, cancel_token),
        PageEvents::new(event_tx),
    )
}
