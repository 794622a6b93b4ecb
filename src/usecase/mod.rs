//! Use case layer: one use case per inbound operation of the relay.
//!
//! Use cases depend only on the domain ports (`SessionRepository`,
//! `MessagePusher`); frame encoding and decoding stays in the UI layer,
//! which hands pre-serialized JSON down for delivery.

pub mod broadcast_state;
pub mod connect_participant;
pub mod disconnect_participant;
pub mod error;
pub mod join_room;
pub mod relay_chat;
pub mod relay_signal;

pub use broadcast_state::BroadcastStateUseCase;
pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{JoinRoomError, RelaySignalError};
pub use join_room::JoinRoomUseCase;
pub use relay_chat::RelayChatUseCase;
pub use relay_signal::RelaySignalUseCase;
