//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::domain::SessionRepository;
use crate::usecase::{
    BroadcastStateUseCase, ConnectParticipantUseCase, DisconnectParticipantUseCase,
    JoinRoomUseCase, RelayChatUseCase, RelaySignalUseCase,
};

use super::{
    handler::{get_room_detail, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// The relay server.
///
/// Wraps the fully wired use cases and exposes `run` (bind host:port) and
/// `serve` (use an existing listener, handy for tests on an ephemeral
/// port).
pub struct Server {
    connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    join_room_usecase: Arc<JoinRoomUseCase>,
    disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    relay_signal_usecase: Arc<RelaySignalUseCase>,
    broadcast_state_usecase: Arc<BroadcastStateUseCase>,
    relay_chat_usecase: Arc<RelayChatUseCase>,
    repository: Arc<dyn SessionRepository>,
}

impl Server {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        connect_participant_usecase: Arc<ConnectParticipantUseCase>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
        relay_signal_usecase: Arc<RelaySignalUseCase>,
        broadcast_state_usecase: Arc<BroadcastStateUseCase>,
        relay_chat_usecase: Arc<RelayChatUseCase>,
        repository: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            connect_participant_usecase,
            join_room_usecase,
            disconnect_participant_usecase,
            relay_signal_usecase,
            broadcast_state_usecase,
            relay_chat_usecase,
            repository,
        }
    }

    fn into_router(self) -> Router {
        let app_state = Arc::new(AppState {
            connect_participant_usecase: self.connect_participant_usecase,
            join_room_usecase: self.join_room_usecase,
            disconnect_participant_usecase: self.disconnect_participant_usecase,
            relay_signal_usecase: self.relay_signal_usecase,
            broadcast_state_usecase: self.broadcast_state_usecase,
            relay_chat_usecase: self.relay_chat_usecase,
            repository: self.repository,
        });

        Router::new()
            // WebSocket endpoint
            .route("/ws", get(websocket_handler))
            // HTTP endpoints
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{room_id}", get(get_room_detail))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the relay server bound to `host:port`.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified
    /// address or if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("relay server listening on {}", listener.local_addr()?);
        tracing::info!("connect to: ws://{}/ws", bind_addr);
        tracing::info!("press Ctrl+C to shutdown gracefully");

        self.serve(listener).await
    }

    /// Serve on an already bound listener until a shutdown signal.
    pub async fn serve(self, listener: TcpListener) -> Result<(), Box<dyn std::error::Error>> {
        axum::serve(listener, self.into_router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("server shutdown complete");

        Ok(())
    }
}
