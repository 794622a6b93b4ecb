//! Domain layer: identifiers, the session registry and the ports
//! (traits) that the infrastructure layer implements.

pub mod ids;
pub mod pusher;
pub mod registry;
pub mod repository;

pub use ids::{DomainError, ParticipantId, RoomId};
pub use pusher::{MessagePushError, MessagePusher, PusherChannel};
pub use registry::{RoomSnapshot, SessionRegistry};
pub use repository::SessionRepository;
