//! Message delivery implementations.
//!
//! - `websocket`: delivery over per-connection WebSocket channels

pub mod websocket;

pub use websocket::WebSocketMessagePusher;
