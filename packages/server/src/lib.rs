//! Hiroba chat server library.
//!
//! The real-time core is the [`hub`] (connection registry and fan-out) and the
//! [`connection`] dual-loop lifecycle. Everything around it follows the usual
//! layering: pure `domain` types, `usecase` services for the non-realtime HTTP
//! paths, `infrastructure` adapters (wire codec, message store, JWT), and the
//! axum `ui` layer.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// realtime core
pub mod connection;
pub mod hub;
