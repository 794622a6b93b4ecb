//! Repository trait for the session registry.
//!
//! The domain layer defines the interface it needs for membership
//! bookkeeping; the infrastructure layer provides the concrete
//! implementation (dependency inversion). Every mutating operation on the
//! registry is serialized behind the implementation's own lock, so use
//! cases can call these methods from concurrent connection tasks without
//! risking lost updates or duplicate membership entries.

use async_trait::async_trait;

use super::ids::{ParticipantId, RoomId};
use super::registry::RoomSnapshot;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Add a participant to a room, returning the members that were
    /// already present (never including the joiner itself).
    async fn join(&self, room: &RoomId, participant: ParticipantId) -> Vec<ParticipantId>;

    /// Remove a participant from a room. Returns `true` iff the room
    /// became empty and was deleted.
    async fn leave(&self, room: &RoomId, participant: &ParticipantId) -> bool;

    /// Every room the participant currently belongs to.
    async fn rooms_of(&self, participant: &ParticipantId) -> Vec<RoomId>;

    /// Current members of a room; empty for unknown rooms.
    async fn members(&self, room: &RoomId) -> Vec<ParticipantId>;

    /// Snapshot of one room, if it exists.
    async fn room(&self, room: &RoomId) -> Option<RoomSnapshot>;

    /// Snapshot of every live room.
    async fn snapshot(&self) -> Vec<RoomSnapshot>;
}
