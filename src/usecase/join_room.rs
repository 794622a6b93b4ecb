//! UseCase: room join.
//!
//! Adds the participant to the room's member set and exposes the two
//! deliveries the handler performs afterwards: the `joined` ack to the
//! joiner (built from the pre-join membership, so it can never contain
//! the joiner's own identifier) and the `participant-joined` notification
//! to everyone who was already there.

use std::sync::Arc;

use crate::domain::{MessagePusher, ParticipantId, RoomId, SessionRepository};

use super::error::JoinRoomError;

pub struct JoinRoomUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinRoomUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Register membership. Returns the members that were already in the
    /// room before this call; re-joining is idempotent.
    pub async fn execute(&self, room: &RoomId, participant: ParticipantId) -> Vec<ParticipantId> {
        let prior_members = self.repository.join(room, participant).await;
        tracing::info!(
            "participant '{}' joined room '{}' ({} prior member(s))",
            participant,
            room,
            prior_members.len()
        );
        prior_members
    }

    /// Deliver the `joined` ack to the joiner.
    pub async fn ack_joined(
        &self,
        participant: &ParticipantId,
        json: &str,
    ) -> Result<(), JoinRoomError> {
        self.message_pusher
            .push_to(participant, json)
            .await
            .map_err(|e| JoinRoomError::AckFailed(e.to_string()))
    }

    /// Notify the members that were present before the join.
    pub async fn notify_prior_members(&self, targets: &[ParticipantId], json: &str) {
        self.message_pusher.broadcast(targets, json).await;
    }
}
