//! UseCase: shared-state fan-out (code, document, output).
//!
//! Each update is an independent "set full current value" message. The
//! relay forwards it verbatim to the other members of the room and stores
//! nothing, so the last update to arrive at a member wins. Echo
//! suppression happens here by construction: the sender is filtered out
//! of the target set before delivery, so no receiver-side "ignore my own
//! echo" flag is ever needed.

use std::sync::Arc;

use crate::domain::{MessagePusher, ParticipantId, RoomId, SessionRepository};

pub struct BroadcastStateUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl BroadcastStateUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Fan a pre-serialized frame out to every member of `room` except
    /// `sender`. An unknown room yields an empty target set and is a
    /// silent no-op. Returns the targets that were addressed.
    pub async fn execute(
        &self,
        room: &RoomId,
        sender: &ParticipantId,
        json: &str,
    ) -> Vec<ParticipantId> {
        let targets: Vec<ParticipantId> = self
            .repository
            .members(room)
            .await
            .into_iter()
            .filter(|member| member != sender)
            .collect();

        if targets.is_empty() {
            tracing::debug!(
                "no fan-out targets in room '{}' for participant '{}'",
                room,
                sender
            );
            return targets;
        }

        self.message_pusher.broadcast(&targets, json).await;
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{
        pusher::WebSocketMessagePusher, repository::InMemorySessionRepository,
    };
    use tokio::sync::mpsc;

    fn create_test_setup() -> (
        BroadcastStateUseCase,
        Arc<InMemorySessionRepository>,
        Arc<WebSocketMessagePusher>,
    ) {
        let repository = Arc::new(InMemorySessionRepository::default());
        let pusher = Arc::new(WebSocketMessagePusher::default());
        (
            BroadcastStateUseCase::new(repository.clone(), pusher.clone()),
            repository,
            pusher,
        )
    }

    fn room(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_fan_out_excludes_the_sender() {
        // given: alice, bob and charlie in r1, all with live channels
        let (usecase, repository, pusher) = create_test_setup();
        let alice = ParticipantId::generate();
        let bob = ParticipantId::generate();
        let charlie = ParticipantId::generate();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        let (tx_c, mut rx_c) = mpsc::unbounded_channel();
        for (id, tx) in [(alice, tx_a), (bob, tx_b), (charlie, tx_c)] {
            repository.join(&room("r1"), id).await;
            pusher.register(id, tx).await;
        }

        // when: alice sends a code update
        let targets = usecase
            .execute(&room("r1"), &alice, r#"{"type":"code-update","text":"x"}"#)
            .await;

        // then: bob and charlie receive it, alice does not
        assert_eq!(targets.len(), 2);
        assert!(rx_b.recv().await.unwrap().contains("code-update"));
        assert!(rx_c.recv().await.unwrap().contains("code-update"));
        assert!(rx_a.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_unknown_room_is_a_silent_noop() {
        // given:
        let (usecase, _repository, _pusher) = create_test_setup();

        // when:
        let targets = usecase
            .execute(&room("ghost"), &ParticipantId::generate(), "{}")
            .await;

        // then:
        assert!(targets.is_empty());
    }

    #[tokio::test]
    async fn test_solo_sender_has_no_targets() {
        // given: alice alone in r1
        let (usecase, repository, _pusher) = create_test_setup();
        let alice = ParticipantId::generate();
        repository.join(&room("r1"), alice).await;

        // when:
        let targets = usecase.execute(&room("r1"), &alice, "{}").await;

        // then:
        assert!(targets.is_empty());
    }

    #[tokio::test]
    async fn test_sender_outside_the_room_reaches_all_members() {
        // given: bob in r1; alice never joined it
        let (usecase, repository, pusher) = create_test_setup();
        let alice = ParticipantId::generate();
        let bob = ParticipantId::generate();
        let (tx, mut rx) = mpsc::unbounded_channel();
        repository.join(&room("r1"), bob).await;
        pusher.register(bob, tx).await;

        // when:
        let targets = usecase.execute(&room("r1"), &alice, "{}").await;

        // then: the member set minus the (absent) sender is just bob
        assert_eq!(targets, vec![bob]);
        assert!(rx.recv().await.is_some());
    }
}
