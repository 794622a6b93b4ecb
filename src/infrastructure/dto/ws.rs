//! WebSocket wire protocol.
//!
//! Every frame is a JSON object with a `type` tag. Inbound and outbound
//! frames are separate closed enums, decoded/encoded exactly once at the
//! connection boundary: an unknown tag or a missing field is a recoverable
//! per-message error, never a silent dynamic dispatch and never a reason
//! to drop the connection.
//!
//! Tags are kebab-case and fields camelCase, matching what the browser
//! clients of the pair-coding platform already speak.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Frames the relay accepts from a connected participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    /// Register membership in a room.
    Join { room: String },
    /// WebRTC session description offer, forwarded point-to-point.
    Offer { payload: Value, to: String },
    /// WebRTC session description answer, forwarded point-to-point.
    Answer { payload: Value, to: String },
    /// Trickle ICE candidate, forwarded point-to-point at any time.
    Candidate { payload: Value, to: String },
    /// Full current value of the shared code buffer.
    CodeUpdate {
        room: String,
        text: String,
        language: String,
        mode: String,
    },
    /// Full current value of the shared plain-text document.
    DocumentUpdate { room: String, text: String },
    /// Latest program output produced by the external execution service.
    OutputUpdate { room: String, text: String },
    /// Chat message; the timestamp is advisory and stamped server-side
    /// when absent.
    ChatMessage {
        room: String,
        text: String,
        sender_role: String,
        sender_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<String>,
    },
}

/// Frames the relay delivers to a connected participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    /// First frame on every connection: the identifier the hub assigned.
    Connected { id: String },
    /// Join acknowledgment; `members` lists who was already in the room,
    /// never including the joiner itself.
    Joined { room: String, members: Vec<String> },
    /// A new participant entered a room this endpoint is in.
    ParticipantJoined { id: String },
    /// A participant left (or disconnected from) a shared room.
    ParticipantLeft { id: String },
    Offer { payload: Value, from: String },
    Answer { payload: Value, from: String },
    Candidate { payload: Value, from: String },
    CodeUpdate {
        text: String,
        language: String,
        mode: String,
    },
    DocumentUpdate { text: String },
    OutputUpdate { text: String },
    ChatMessage {
        text: String,
        sender_id: String,
        sender_role: String,
        sender_name: String,
        timestamp: String,
    },
}

impl ServerEvent {
    /// Serialize for the wire. Infallible for this closed enum.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("ServerEvent is always serializable")
    }
}
