//! In-memory implementation of the `SessionRepository` port.
//!
//! Wraps the pure `SessionRegistry` behind a single tokio mutex. That
//! mutex is the serialization point demanded by the concurrency model:
//! concurrent joins and leaves on the same room (or on different rooms —
//! room count is expected to stay small) all queue on it, so membership
//! mutations can never interleave.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ParticipantId, RoomId, RoomSnapshot, SessionRegistry, SessionRepository};

pub struct InMemorySessionRepository {
    registry: Arc<Mutex<SessionRegistry>>,
}

impl InMemorySessionRepository {
    pub fn new(registry: Arc<Mutex<SessionRegistry>>) -> Self {
        Self { registry }
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(SessionRegistry::new())))
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn join(&self, room: &RoomId, participant: ParticipantId) -> Vec<ParticipantId> {
        let mut registry = self.registry.lock().await;
        registry.join(room, participant)
    }

    async fn leave(&self, room: &RoomId, participant: &ParticipantId) -> bool {
        let mut registry = self.registry.lock().await;
        registry.leave(room, participant)
    }

    async fn rooms_of(&self, participant: &ParticipantId) -> Vec<RoomId> {
        let registry = self.registry.lock().await;
        registry.rooms_of(participant)
    }

    async fn members(&self, room: &RoomId) -> Vec<ParticipantId> {
        let registry = self.registry.lock().await;
        registry.members(room)
    }

    async fn room(&self, room: &RoomId) -> Option<RoomSnapshot> {
        let registry = self.registry.lock().await;
        registry.room(room)
    }

    async fn snapshot(&self) -> Vec<RoomSnapshot> {
        let registry = self.registry.lock().await;
        registry.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_repository() -> InMemorySessionRepository {
        InMemorySessionRepository::default()
    }

    fn room(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_join_and_members() {
        // given:
        let repo = create_test_repository();
        let alice = ParticipantId::generate();
        let bob = ParticipantId::generate();

        // when:
        let prior_alice = repo.join(&room("r1"), alice).await;
        let prior_bob = repo.join(&room("r1"), bob).await;

        // then:
        assert!(prior_alice.is_empty());
        assert_eq!(prior_bob, vec![alice]);
        assert_eq!(repo.members(&room("r1")).await.len(), 2);
    }

    #[tokio::test]
    async fn test_leave_deletes_empty_room() {
        // given:
        let repo = create_test_repository();
        let alice = ParticipantId::generate();
        repo.join(&room("r1"), alice).await;

        // when:
        let now_empty = repo.leave(&room("r1"), &alice).await;

        // then:
        assert!(now_empty);
        assert!(repo.room(&room("r1")).await.is_none());
        assert!(repo.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_joins_do_not_lose_updates() {
        // given:
        let repo = Arc::new(create_test_repository());
        let participants: Vec<ParticipantId> =
            (0..16).map(|_| ParticipantId::generate()).collect();

        // when: 16 tasks join the same room concurrently
        let mut handles = Vec::new();
        for participant in &participants {
            let repo = repo.clone();
            let participant = *participant;
            handles.push(tokio::spawn(async move {
                repo.join(&RoomId::new("r1".to_string()).unwrap(), participant)
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // then: every join landed exactly once
        let members = repo.members(&room("r1")).await;
        assert_eq!(members.len(), 16);
        for participant in participants {
            assert!(members.contains(&participant));
        }
    }

    #[tokio::test]
    async fn test_rooms_of_after_multi_room_join() {
        // given:
        let repo = create_test_repository();
        let alice = ParticipantId::generate();
        repo.join(&room("r1"), alice).await;
        repo.join(&room("r2"), alice).await;

        // when:
        let rooms = repo.rooms_of(&alice).await;

        // then:
        assert_eq!(rooms, vec![room("r1"), room("r2")]);
    }
}
