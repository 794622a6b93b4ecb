//! The session registry: which participants are present in which rooms.
//!
//! This is a pure data structure with no I/O and no locking. All
//! concurrency control lives in the infrastructure layer, which funnels
//! every mutation through a single mutex so that joins and leaves on the
//! same room can never race.

use std::collections::{HashMap, HashSet};

use super::ids::{ParticipantId, RoomId};

/// Read-only view of one room, used by the debug HTTP API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub id: RoomId,
    pub members: Vec<ParticipantId>,
}

/// In-memory mapping from room identifier to member set, with a reverse
/// index so that a disconnecting participant can be removed from every
/// room it had joined.
///
/// Rooms are created lazily on first join and deleted as soon as their
/// member set becomes empty; an empty registry holds no rooms at all.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    rooms: HashMap<RoomId, HashSet<ParticipantId>>,
    memberships: HashMap<ParticipantId, HashSet<RoomId>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `participant` to `room`, returning the members that were
    /// already present before this call.
    ///
    /// The returned list never contains the joining participant itself,
    /// and re-joining an already-joined room is idempotent: the entry is
    /// not duplicated and the current co-members are returned. Members are
    /// sorted by id for deterministic output.
    pub fn join(&mut self, room: &RoomId, participant: ParticipantId) -> Vec<ParticipantId> {
        let members = self.rooms.entry(room.clone()).or_default();
        let mut prior: Vec<ParticipantId> = members
            .iter()
            .filter(|id| **id != participant)
            .copied()
            .collect();
        prior.sort();

        members.insert(participant);
        self.memberships
            .entry(participant)
            .or_default()
            .insert(room.clone());

        prior
    }

    /// Remove `participant` from `room`.
    ///
    /// Returns `true` iff the room became empty and was deleted. Leaving
    /// a room the participant is not in (or that does not exist) is a
    /// no-op returning `false`.
    pub fn leave(&mut self, room: &RoomId, participant: &ParticipantId) -> bool {
        let Some(members) = self.rooms.get_mut(room) else {
            return false;
        };
        if !members.remove(participant) {
            return false;
        }

        if let Some(rooms) = self.memberships.get_mut(participant) {
            rooms.remove(room);
            if rooms.is_empty() {
                self.memberships.remove(participant);
            }
        }

        if members.is_empty() {
            self.rooms.remove(room);
            true
        } else {
            false
        }
    }

    /// Every room the participant is currently a member of.
    ///
    /// The general model allows multiple simultaneous memberships even
    /// though the pair-coding application joins exactly one room per
    /// session; disconnect handling must not assume exactly one.
    pub fn rooms_of(&self, participant: &ParticipantId) -> Vec<RoomId> {
        let mut rooms: Vec<RoomId> = self
            .memberships
            .get(participant)
            .map(|rooms| rooms.iter().cloned().collect())
            .unwrap_or_default();
        rooms.sort();
        rooms
    }

    /// Current members of `room`, sorted by id. Empty for unknown rooms.
    pub fn members(&self, room: &RoomId) -> Vec<ParticipantId> {
        let mut members: Vec<ParticipantId> = self
            .rooms
            .get(room)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default();
        members.sort();
        members
    }

    /// Snapshot of one room, if it exists.
    pub fn room(&self, room: &RoomId) -> Option<RoomSnapshot> {
        self.rooms.get(room).map(|_| RoomSnapshot {
            id: room.clone(),
            members: self.members(room),
        })
    }

    /// Snapshot of every live room, sorted by room id.
    pub fn snapshot(&self) -> Vec<RoomSnapshot> {
        let mut rooms: Vec<RoomSnapshot> = self
            .rooms
            .keys()
            .map(|id| RoomSnapshot {
                id: id.clone(),
                members: self.members(id),
            })
            .collect();
        rooms.sort_by(|a, b| a.id.cmp(&b.id));
        rooms
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    #[test]
    fn test_join_empty_room_returns_no_prior_members() {
        // given:
        let mut registry = SessionRegistry::new();
        let alice = ParticipantId::generate();

        // when:
        let prior = registry.join(&room("r1"), alice);

        // then:
        assert!(prior.is_empty());
        assert_eq!(registry.members(&room("r1")), vec![alice]);
    }

    #[test]
    fn test_join_returns_existing_members_excluding_joiner() {
        // given:
        let mut registry = SessionRegistry::new();
        let alice = ParticipantId::generate();
        let bob = ParticipantId::generate();
        let charlie = ParticipantId::generate();
        registry.join(&room("r1"), alice);
        registry.join(&room("r1"), bob);

        // when:
        let prior = registry.join(&room("r1"), charlie);

        // then:
        assert_eq!(prior.len(), 2);
        assert!(prior.contains(&alice));
        assert!(prior.contains(&bob));
        assert!(!prior.contains(&charlie));
    }

    #[test]
    fn test_rejoin_is_idempotent() {
        // given:
        let mut registry = SessionRegistry::new();
        let alice = ParticipantId::generate();
        let bob = ParticipantId::generate();
        registry.join(&room("r1"), alice);
        registry.join(&room("r1"), bob);

        // when: alice joins the same room again
        let prior = registry.join(&room("r1"), alice);

        // then: no duplicate entry, and the answer still excludes alice
        assert_eq!(prior, vec![bob]);
        assert_eq!(registry.members(&room("r1")).len(), 2);
    }

    #[test]
    fn test_leave_deletes_emptied_room() {
        // given:
        let mut registry = SessionRegistry::new();
        let alice = ParticipantId::generate();
        registry.join(&room("r1"), alice);

        // when:
        let now_empty = registry.leave(&room("r1"), &alice);

        // then:
        assert!(now_empty);
        assert_eq!(registry.room_count(), 0);
        assert!(registry.room(&room("r1")).is_none());
    }

    #[test]
    fn test_leave_keeps_room_with_remaining_members() {
        // given:
        let mut registry = SessionRegistry::new();
        let alice = ParticipantId::generate();
        let bob = ParticipantId::generate();
        registry.join(&room("r1"), alice);
        registry.join(&room("r1"), bob);

        // when:
        let now_empty = registry.leave(&room("r1"), &alice);

        // then:
        assert!(!now_empty);
        assert_eq!(registry.members(&room("r1")), vec![bob]);
    }

    #[test]
    fn test_leave_unknown_room_is_noop() {
        // given:
        let mut registry = SessionRegistry::new();
        let alice = ParticipantId::generate();

        // when:
        let now_empty = registry.leave(&room("ghost"), &alice);

        // then:
        assert!(!now_empty);
    }

    #[test]
    fn test_leave_non_member_is_noop() {
        // given:
        let mut registry = SessionRegistry::new();
        let alice = ParticipantId::generate();
        let bob = ParticipantId::generate();
        registry.join(&room("r1"), alice);

        // when: bob never joined r1
        let now_empty = registry.leave(&room("r1"), &bob);

        // then:
        assert!(!now_empty);
        assert_eq!(registry.members(&room("r1")), vec![alice]);
    }

    #[test]
    fn test_rooms_of_tracks_multiple_memberships() {
        // given:
        let mut registry = SessionRegistry::new();
        let alice = ParticipantId::generate();
        registry.join(&room("r1"), alice);
        registry.join(&room("r2"), alice);

        // when:
        let rooms = registry.rooms_of(&alice);

        // then:
        assert_eq!(rooms, vec![room("r1"), room("r2")]);
    }

    #[test]
    fn test_rooms_of_shrinks_after_leave() {
        // given:
        let mut registry = SessionRegistry::new();
        let alice = ParticipantId::generate();
        registry.join(&room("r1"), alice);
        registry.join(&room("r2"), alice);

        // when:
        registry.leave(&room("r1"), &alice);

        // then:
        assert_eq!(registry.rooms_of(&alice), vec![room("r2")]);
    }

    #[test]
    fn test_rooms_of_unknown_participant_is_empty() {
        // given:
        let registry = SessionRegistry::new();

        // when:
        let rooms = registry.rooms_of(&ParticipantId::generate());

        // then:
        assert!(rooms.is_empty());
    }

    #[test]
    fn test_members_of_unknown_room_is_empty() {
        // given:
        let registry = SessionRegistry::new();

        // when:
        let members = registry.members(&room("ghost"));

        // then:
        assert!(members.is_empty());
    }

    #[test]
    fn test_snapshot_lists_all_live_rooms() {
        // given:
        let mut registry = SessionRegistry::new();
        let alice = ParticipantId::generate();
        let bob = ParticipantId::generate();
        registry.join(&room("r1"), alice);
        registry.join(&room("r2"), bob);

        // when:
        let snapshot = registry.snapshot();

        // then:
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].id, room("r1"));
        assert_eq!(snapshot[1].id, room("r2"));
    }
}
