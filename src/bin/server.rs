//! Relay server for collaborative pair-coding sessions.
//!
//! Tracks room membership, forwards WebRTC signaling point-to-point and
//! fans shared state (code, document, output, chat) out to room members.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin relay-server
//! cargo run --bin relay-server -- --host 0.0.0.0 --port 3001
//! ```

use std::{collections::HashMap, sync::Arc};

use clap::Parser;
use codepair_relay::{
    common::{logger::setup_logger, time::SystemClock},
    domain::SessionRegistry,
    infrastructure::{pusher::WebSocketMessagePusher, repository::InMemorySessionRepository},
    ui::Server,
    usecase::{
        BroadcastStateUseCase, ConnectParticipantUseCase, DisconnectParticipantUseCase,
        JoinRoomUseCase, RelayChatUseCase, RelaySignalUseCase,
    },
};
use tokio::sync::Mutex;

#[derive(Parser, Debug)]
#[command(name = "relay-server")]
#[command(about = "Room-scoped relay for collaborative pair-coding sessions", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "3001")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Registry + Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Session registry behind its single serialization point
    let registry = Arc::new(Mutex::new(SessionRegistry::new()));
    let repository = Arc::new(InMemorySessionRepository::new(registry));

    // 2. MessagePusher (WebSocket implementation)
    let message_pusher_clients = Arc::new(Mutex::new(HashMap::new()));
    let message_pusher = Arc::new(WebSocketMessagePusher::new(message_pusher_clients));

    // 3. UseCases
    let connect_participant_usecase =
        Arc::new(ConnectParticipantUseCase::new(message_pusher.clone()));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let relay_signal_usecase = Arc::new(RelaySignalUseCase::new(message_pusher.clone()));
    let broadcast_state_usecase = Arc::new(BroadcastStateUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let relay_chat_usecase = Arc::new(RelayChatUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        Arc::new(SystemClock),
    ));

    // 4. Create and run the server
    let server = Server::new(
        connect_participant_usecase,
        join_room_usecase,
        disconnect_participant_usecase,
        relay_signal_usecase,
        broadcast_state_usecase,
        relay_chat_usecase,
        repository,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("server error: {}", e);
        std::process::exit(1);
    }
}
