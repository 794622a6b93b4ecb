//! Use case error types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JoinRoomError {
    /// The join acknowledgment could not be delivered to the joiner,
    /// usually because the connection closed mid-handshake.
    #[error("failed to deliver join ack: {0}")]
    AckFailed(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RelaySignalError {
    /// The `to` field names no currently connected participant. The
    /// caller drops the message silently; this variant only exists so the
    /// handler can log it at debug level.
    #[error("no live connection for signaling target '{0}'")]
    UnknownTarget(String),
}
