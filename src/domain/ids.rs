//! Identifier value objects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Maximum accepted length of a caller-supplied room identifier.
pub const MAX_ROOM_ID_LEN: usize = 128;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid room id: {0}")]
    InvalidRoomId(String),
    #[error("invalid participant id: {0}")]
    InvalidParticipantId(String),
}

/// Process-unique identifier of one connected endpoint.
///
/// Assigned by the hub when the connection is accepted, stable for the
/// connection's lifetime and never reused afterwards (uuid v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(Uuid);

impl ParticipantId {
    /// Allocate a fresh identifier for a new connection.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl FromStr for ParticipantId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| DomainError::InvalidParticipantId(s.to_string()))
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Caller-supplied room identifier.
///
/// The relay performs no authentication beyond this string: anyone who
/// knows the identifier may join the room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(id: String) -> Result<Self, DomainError> {
        if id.is_empty() || id.len() > MAX_ROOM_ID_LEN {
            return Err(DomainError::InvalidRoomId(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
