//! UI layer: the axum server, its HTTP and WebSocket handlers, and the
//! shared application state.

pub mod handler;
pub mod server;
pub mod signal;
pub mod state;

pub use server::Server;
