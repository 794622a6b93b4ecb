//! UseCase: accept a new connection.
//!
//! Allocates a fresh participant identifier and registers the
//! connection's outbound channel with the pusher. No room membership is
//! created here; that only happens when the participant sends a join.

use std::sync::Arc;

use crate::domain::{MessagePusher, ParticipantId, PusherChannel};

pub struct ConnectParticipantUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectParticipantUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// Register the connection and return its identifier.
    ///
    /// Identifiers are uuid v4, so they are process-unique and never
    /// reused after a disconnect.
    pub async fn execute(&self, sender: PusherChannel) -> ParticipantId {
        let participant = ParticipantId::generate();
        self.message_pusher.register(participant, sender).await;
        tracing::info!("participant '{}' connected", participant);
        participant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::pusher::WebSocketMessagePusher;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_execute_assigns_fresh_id_and_registers_channel() {
        // given:
        let pusher = Arc::new(WebSocketMessagePusher::default());
        let usecase = ConnectParticipantUseCase::new(pusher.clone());
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when:
        let participant = usecase.execute(tx).await;

        // then: the channel is live under the new id
        pusher.push_to(&participant, "hello").await.unwrap();
        assert_eq!(rx.recv().await, Some("hello".to_string()));
    }

    #[tokio::test]
    async fn test_consecutive_connects_get_distinct_ids() {
        // given:
        let pusher = Arc::new(WebSocketMessagePusher::default());
        let usecase = ConnectParticipantUseCase::new(pusher);
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();

        // when:
        let first = usecase.execute(tx1).await;
        let second = usecase.execute(tx2).await;

        // then:
        assert_ne!(first, second);
    }
}
