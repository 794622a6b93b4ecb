//! Data transfer objects for the external interfaces.
//!
//! - `ws`: the WebSocket wire protocol (closed tagged enums)
//! - `http`: response bodies of the debug HTTP API

pub mod http;
pub mod ws;
