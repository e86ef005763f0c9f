//! Transport layer (raw TCP).
//!
//! Owns the socket: reads the HTTP upgrade, answers it, then slices the byte
//! stream into complete frames for the stateless decoder.

pub mod connection;
pub mod delimiter;
pub mod upgrade;

pub use connection::{run_connection, serve};
