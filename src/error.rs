use std::sync::Arc;

use uuid::Uuid;

/// Failures surfaced to callers across the inspection boundary.
///
/// Lookups that find nothing are not errors: they come back as `None` or an
/// empty collection. Values that cannot be serialized are replaced with
/// sentinels in place (see [`SerializeError`](crate::SerializeError)). Only a
/// failing call into the inspected page ends up here.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("Evaluation in the inspected page failed (request {request}): {reason}")]
    Evaluation { request: Uuid, reason: Arc<str> },

    #[error("The page agent is not running")]
    AgentStopped,

    #[error("The page event channel has reached its capacity")]
    ChannelIsFull,
}

impl Error {
    pub(crate) fn evaluation(request: Uuid, reason: impl Into<Arc<str>>) -> Self {
        let err = Error::Evaluation {
            request,
            reason: reason.into(),
        };
        tracing::error!(%request, "{err}");
        err
    }
}
