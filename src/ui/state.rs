//! Server state shared across handlers.

use std::sync::Arc;

use crate::domain::SessionRepository;
use crate::usecase::{
    BroadcastStateUseCase, ConnectParticipantUseCase, DisconnectParticipantUseCase,
    JoinRoomUseCase, RelayChatUseCase, RelaySignalUseCase,
};

/// Shared application state
pub struct AppState {
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    pub relay_signal_usecase: Arc<RelaySignalUseCase>,
    pub broadcast_state_usecase: Arc<BroadcastStateUseCase>,
    pub relay_chat_usecase: Arc<RelayChatUseCase>,
    /// Read-only registry access for the debug HTTP API.
    pub repository: Arc<dyn SessionRepository>,
}
