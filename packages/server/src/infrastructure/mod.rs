//! Infrastructure layer: adapters for the domain ports and the wire format.

pub mod auth;
pub mod codec;
pub mod dto;
pub mod repository;
