//! WebSocket-backed `MessagePusher` implementation.
//!
//! ## Responsibility
//!
//! - Track the `UnboundedSender` of every live connection
//! - Deliver frames to one participant (`push_to`) or many (`broadcast`)
//!
//! The WebSocket itself is created in the UI layer
//! (`src/ui/handler/websocket.rs`); this implementation only receives the
//! sender half of each connection's outbound channel. Each recipient has
//! its own channel, so a slow or closed connection cannot stall delivery
//! to the others.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{MessagePushError, MessagePusher, ParticipantId, PusherChannel};

pub struct WebSocketMessagePusher {
    /// Outbound channels of the currently connected participants.
    clients: Arc<Mutex<HashMap<ParticipantId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new(clients: Arc<Mutex<HashMap<ParticipantId, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(HashMap::new())))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register(&self, participant: ParticipantId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(participant, sender);
        tracing::debug!("participant '{}' registered to pusher", participant);
    }

    async fn unregister(&self, participant: &ParticipantId) {
        let mut clients = self.clients.lock().await;
        clients.remove(participant);
        tracing::debug!("participant '{}' unregistered from pusher", participant);
    }

    async fn push_to(
        &self,
        participant: &ParticipantId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        if let Some(sender) = clients.get(participant) {
            sender
                .send(content.to_string())
                .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
            tracing::debug!("pushed message to participant '{}'", participant);
            Ok(())
        } else {
            Err(MessagePushError::ParticipantNotFound(
                participant.to_string(),
            ))
        }
    }

    async fn broadcast(&self, targets: &[ParticipantId], content: &str) {
        let clients = self.clients.lock().await;

        for target in targets {
            if let Some(sender) = clients.get(target) {
                // A closed channel means the target is mid-disconnect;
                // skip it and let its own cleanup path run.
                if let Err(e) = sender.send(content.to_string()) {
                    tracing::warn!("failed to push message to participant '{}': {}", target, e);
                } else {
                    tracing::debug!("broadcasted message to participant '{}'", target);
                }
            } else {
                tracing::warn!("participant '{}' not found during broadcast, skipping", target);
            }
        }
    }
}
