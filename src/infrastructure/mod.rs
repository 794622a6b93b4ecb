//! Infrastructure layer: concrete implementations of the domain ports
//! plus the wire-format DTOs.

pub mod dto;
pub mod pusher;
pub mod repository;
