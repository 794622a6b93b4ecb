//! UseCase: connection teardown.
//!
//! A disconnect must promptly stop delivery to the participant's channel
//! and release every room membership it held. The channel is unregistered
//! first, so frames addressed to the departing participant during cleanup
//! are dropped rather than queued.

use std::sync::Arc;

use crate::domain::{MessagePusher, ParticipantId, RoomId, SessionRepository};

pub struct DisconnectParticipantUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Remove the participant from every room it had joined.
    ///
    /// Returns, for each vacated room that still has members, the list of
    /// remaining members to notify with `participant-left`. Rooms emptied
    /// by the departure are deleted and produce no notification.
    pub async fn execute(
        &self,
        participant: ParticipantId,
    ) -> Vec<(RoomId, Vec<ParticipantId>)> {
        self.message_pusher.unregister(&participant).await;

        let rooms = self.repository.rooms_of(&participant).await;
        let mut notifications = Vec::new();
        for room in rooms {
            let now_empty = self.repository.leave(&room, &participant).await;
            if now_empty {
                tracing::info!("room '{}' emptied and deleted", room);
                continue;
            }
            let remaining = self.repository.members(&room).await;
            if !remaining.is_empty() {
                notifications.push((room, remaining));
            }
        }

        tracing::info!("participant '{}' disconnected", participant);
        notifications
    }

    /// Notify the remaining members of one vacated room.
    pub async fn notify_left(&self, targets: &[ParticipantId], json: &str) {
        self.message_pusher.broadcast(targets, json).await;
    }
}
