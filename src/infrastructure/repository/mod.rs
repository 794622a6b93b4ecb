//! Session repository implementations.
//!
//! Only an in-memory variant exists: the relay does not persist room
//! state beyond the life of the process.

pub mod inmemory;

pub use inmemory::InMemorySessionRepository;
