//! Message delivery trait.
//!
//! Use cases depend on this interface to hand serialized frames to
//! connected participants; the infrastructure layer implements it on top
//! of per-connection WebSocket channels. Delivery is fire-and-forget:
//! there is no retry inside the relay, and a recipient whose channel is
//! closed or missing never affects delivery to the others.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::ids::ParticipantId;

/// Outbound channel for one connected participant.
///
/// Unbounded so a send never blocks the fan-out loop; backpressure for a
/// slow socket is absorbed by the channel and the connection's own pusher
/// task.
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[derive(Debug, Error)]
pub enum MessagePushError {
    #[error("no live connection for participant '{0}'")]
    ParticipantNotFound(String),
    #[error("failed to push message: {0}")]
    PushFailed(String),
}

#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Register the outbound channel of a newly accepted connection.
    async fn register(&self, participant: ParticipantId, sender: PusherChannel);

    /// Drop a participant's channel; in-flight messages addressed to it
    /// are discarded, not queued.
    async fn unregister(&self, participant: &ParticipantId);

    /// Deliver a frame to exactly one participant. Errors when the target
    /// has no live connection or its channel has closed.
    async fn push_to(&self, participant: &ParticipantId, content: &str)
    -> Result<(), MessagePushError>;

    /// Deliver a frame to each target independently. Partial failure is
    /// tolerated: unknown or closed targets are skipped and logged, never
    /// stalling delivery to the rest.
    async fn broadcast(&self, targets: &[ParticipantId], content: &str);
}
