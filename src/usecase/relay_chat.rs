//! UseCase: chat fan-out.
//!
//! Unlike the shared-state channels, chat is delivered to every member of
//! the room **including** the sender, so the sender's own UI renders its
//! message as a confirmed echo instead of synthesizing it locally. No
//! debouncing: each message goes out individually, in arrival order.

use std::sync::Arc;

use crate::common::time::{Clock, timestamp_to_rfc3339};
use crate::domain::{MessagePusher, ParticipantId, RoomId, SessionRepository};

pub struct RelayChatUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl RelayChatUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// Client timestamps are advisory; messages arriving without one get
    /// a server-side RFC 3339 stamp.
    pub fn stamp_timestamp(&self, provided: Option<String>) -> String {
        provided.unwrap_or_else(|| timestamp_to_rfc3339(self.clock.now_utc_millis()))
    }

    /// Fan a pre-serialized chat frame out to every member of `room`,
    /// sender included. An unknown room is a silent no-op.
    pub async fn execute(&self, room: &RoomId, json: &str) -> Vec<ParticipantId> {
        let targets = self.repository.members(room).await;

        if targets.is_empty() {
            tracing::debug!("chat message for unknown or empty room '{}' dropped", room);
            return targets;
        }

        self.message_pusher.broadcast(&targets, json).await;
        targets
    }
}
