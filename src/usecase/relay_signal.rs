//! UseCase: point-to-point signaling forward.
//!
//! Offers, answers and trickle ICE candidates are forwarded verbatim to
//! the named target. The relay keeps no negotiation state: ordering
//! between one endpoint pair is preserved by the transport (single
//! inbound task per connection, single outbound channel per target), and
//! candidates may flow in either direction before or after the answer.
//!
//! Targets are any currently connected identifier, not just members of a
//! shared room. The original platform behaves the same way and trusts
//! that identifiers are only learned through legitimate room membership;
//! see DESIGN.md for the recorded decision.

use std::sync::Arc;

use crate::domain::{MessagePusher, ParticipantId};

use super::error::RelaySignalError;

pub struct RelaySignalUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelaySignalUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// Forward a pre-serialized signaling frame to `to`.
    ///
    /// An unparseable or unknown target is reported as `UnknownTarget`;
    /// the caller drops the message silently. A channel that closed
    /// mid-forward is treated the same way, as if the target had already
    /// disconnected.
    pub async fn execute(&self, to: &str, json: &str) -> Result<ParticipantId, RelaySignalError> {
        let target: ParticipantId = to
            .parse()
            .map_err(|_| RelaySignalError::UnknownTarget(to.to_string()))?;

        self.message_pusher
            .push_to(&target, json)
            .await
            .map_err(|_| RelaySignalError::UnknownTarget(to.to_string()))?;

        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::pusher::WebSocketMessagePusher;
    use tokio::sync::mpsc;

    fn create_test_usecase() -> (RelaySignalUseCase, Arc<WebSocketMessagePusher>) {
        let pusher = Arc::new(WebSocketMessagePusher::default());
        (RelaySignalUseCase::new(pusher.clone()), pusher)
    }

    #[tokio::test]
    async fn test_forwards_frame_to_live_target() {
        // given:
        let (usecase, pusher) = create_test_usecase();
        let bob = ParticipantId::generate();
        let (tx, mut rx) = mpsc::unbounded_channel();
        pusher.register(bob, tx).await;

        // when:
        let result = usecase
            .execute(&bob.to_string(), r#"{"type":"offer","payload":{},"from":"a"}"#)
            .await;

        // then:
        assert_eq!(result.unwrap(), bob);
        assert!(rx.recv().await.unwrap().contains("offer"));
    }

    #[tokio::test]
    async fn test_unknown_target_is_reported_not_delivered() {
        // given: a well-formed id that never connected
        let (usecase, _pusher) = create_test_usecase();
        let ghost = ParticipantId::generate();

        // when:
        let result = usecase.execute(&ghost.to_string(), "{}").await;

        // then:
        assert!(matches!(result, Err(RelaySignalError::UnknownTarget(_))));
    }

    #[tokio::test]
    async fn test_garbage_target_id_is_reported_not_fatal() {
        // given:
        let (usecase, _pusher) = create_test_usecase();

        // when:
        let result = usecase.execute("not-a-uuid", "{}").await;

        // then:
        assert!(matches!(result, Err(RelaySignalError::UnknownTarget(_))));
    }

    #[tokio::test]
    async fn test_closed_channel_counts_as_disconnected_target() {
        // given: bob's receiver is gone
        let (usecase, pusher) = create_test_usecase();
        let bob = ParticipantId::generate();
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        pusher.register(bob, tx).await;

        // when:
        let result = usecase.execute(&bob.to_string(), "{}").await;

        // then:
        assert!(matches!(result, Err(RelaySignalError::UnknownTarget(_))));
    }
}
