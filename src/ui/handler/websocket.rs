//! WebSocket connection handlers: the connection hub.
//!
//! Each accepted connection gets a fresh participant identifier, an
//! unbounded outbound channel and two tasks: one pushing frames from the
//! channel to the socket, one reading inbound frames and dispatching them
//! to the use cases. When either task ends, the other is aborted and the
//! disconnect cleanup runs.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ParticipantId, RoomId},
    infrastructure::dto::ws::{ClientEvent, ServerEvent},
    ui::state::AppState,
    usecase::RelaySignalError,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives frames from the rx channel and pushes them
/// to the WebSocket sender.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Allocate an identifier and register the outbound channel
    let (tx, rx) = mpsc::unbounded_channel();
    let participant = state.connect_participant_usecase.execute(tx).await;

    // Tell the endpoint its identifier before anything else can be
    // delivered; peers learn it through join notifications.
    let connected = ServerEvent::Connected {
        id: participant.to_string(),
    };
    if let Err(e) = sender.send(Message::Text(connected.to_json().into())).await {
        tracing::error!("failed to send connected frame to '{}': {}", participant, e);
        state.disconnect_participant_usecase.execute(participant).await;
        return;
    }

    let state_clone = state.clone();

    // Task reading inbound frames from this participant
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error for '{}': {}", participant, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    dispatch_event(&state_clone, participant, &text).await;
                }
                Message::Ping(_) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                    tracing::debug!("received ping from '{}'", participant);
                }
                Message::Close(_) => {
                    tracing::info!("participant '{}' requested close", participant);
                    break;
                }
                _ => {}
            }
        }
    });

    // Task pushing frames from other participants to this one
    let mut send_task = pusher_loop(rx, sender);

    // If either task completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Release memberships and notify the rooms that still have members
    let notifications = state
        .disconnect_participant_usecase
        .execute(participant)
        .await;
    if !notifications.is_empty() {
        let left_json = ServerEvent::ParticipantLeft {
            id: participant.to_string(),
        }
        .to_json();
        for (room, remaining) in notifications {
            state
                .disconnect_participant_usecase
                .notify_left(&remaining, &left_json)
                .await;
            tracing::info!(
                "notified {} member(s) of room '{}' that '{}' left",
                remaining.len(),
                room,
                participant
            );
        }
    }
}

/// Decode one inbound frame and route it to its use case.
///
/// A malformed frame (unknown tag, missing field, invalid room id) drops
/// that single frame with a warning; the connection stays up.
async fn dispatch_event(state: &AppState, participant: ParticipantId, raw: &str) {
    let event = match serde_json::from_str::<ClientEvent>(raw) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("malformed frame from '{}': {}", participant, e);
            return;
        }
    };

    match event {
        ClientEvent::Join { room } => handle_join(state, participant, room).await,
        ClientEvent::Offer { payload, to } => {
            let frame = ServerEvent::Offer {
                payload,
                from: participant.to_string(),
            };
            forward_signal(state, participant, &to, frame).await;
        }
        ClientEvent::Answer { payload, to } => {
            let frame = ServerEvent::Answer {
                payload,
                from: participant.to_string(),
            };
            forward_signal(state, participant, &to, frame).await;
        }
        ClientEvent::Candidate { payload, to } => {
            let frame = ServerEvent::Candidate {
                payload,
                from: participant.to_string(),
            };
            forward_signal(state, participant, &to, frame).await;
        }
        ClientEvent::CodeUpdate {
            room,
            text,
            language,
            mode,
        } => {
            let frame = ServerEvent::CodeUpdate {
                text,
                language,
                mode,
            };
            fan_out_state(state, participant, room, frame).await;
        }
        ClientEvent::DocumentUpdate { room, text } => {
            fan_out_state(state, participant, room, ServerEvent::DocumentUpdate { text }).await;
        }
        ClientEvent::OutputUpdate { room, text } => {
            fan_out_state(state, participant, room, ServerEvent::OutputUpdate { text }).await;
        }
        ClientEvent::ChatMessage {
            room,
            text,
            sender_role,
            sender_name,
            timestamp,
        } => {
            let Ok(room) = RoomId::new(room) else {
                tracing::warn!("chat message from '{}' with invalid room id", participant);
                return;
            };
            let frame = ServerEvent::ChatMessage {
                text,
                sender_id: participant.to_string(),
                sender_role,
                sender_name,
                timestamp: state.relay_chat_usecase.stamp_timestamp(timestamp),
            };
            state
                .relay_chat_usecase
                .execute(&room, &frame.to_json())
                .await;
        }
    }
}

async fn handle_join(state: &AppState, participant: ParticipantId, room: String) {
    let Ok(room) = RoomId::new(room) else {
        tracing::warn!("join from '{}' with invalid room id", participant);
        return;
    };

    let prior_members = state.join_room_usecase.execute(&room, participant).await;

    // Ack first, computed from the pre-join snapshot: the joiner's own id
    // is never in this list.
    let ack = ServerEvent::Joined {
        room: room.to_string(),
        members: prior_members.iter().map(ToString::to_string).collect(),
    };
    if let Err(e) = state
        .join_room_usecase
        .ack_joined(&participant, &ack.to_json())
        .await
    {
        tracing::warn!("failed to ack join for '{}': {}", participant, e);
        return;
    }

    if !prior_members.is_empty() {
        let joined_json = ServerEvent::ParticipantJoined {
            id: participant.to_string(),
        }
        .to_json();
        state
            .join_room_usecase
            .notify_prior_members(&prior_members, &joined_json)
            .await;
    }
}

async fn forward_signal(state: &AppState, from: ParticipantId, to: &str, frame: ServerEvent) {
    match state.relay_signal_usecase.execute(to, &frame.to_json()).await {
        Ok(target) => {
            tracing::debug!("forwarded signaling frame from '{}' to '{}'", from, target);
        }
        // Unknown target: drop silently, no error surfaced to the sender
        Err(RelaySignalError::UnknownTarget(target)) => {
            tracing::debug!(
                "dropped signaling frame from '{}': no live connection '{}'",
                from,
                target
            );
        }
    }
}

async fn fan_out_state(state: &AppState, sender: ParticipantId, room: String, frame: ServerEvent) {
    let Ok(room) = RoomId::new(room) else {
        tracing::warn!("state update from '{}' with invalid room id", sender);
        return;
    };

    state
        .broadcast_state_usecase
        .execute(&room, &sender, &frame.to_json())
        .await;
}
