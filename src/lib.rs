//! Room-scoped relay for collaborative pair-coding sessions.
//!
//! The relay keeps track of who is present in each room, forwards WebRTC
//! negotiation payloads (offer/answer/candidate) point-to-point between
//! connected participants, and fans out shared mutable state (code buffer,
//! document text, execution output, chat) to the other members of a room.
//! Payloads are opaque to the relay; nothing is persisted beyond the life
//! of the process.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// shared library
pub mod common;
