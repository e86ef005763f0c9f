//! wsframe core: RFC 6455 frame decoding and opening-handshake primitives.
//!
//! This crate holds the bit-level frame decoder, the `Sec-WebSocket-Accept`
//! computation, and the error surface shared with the gateway. It carries no
//! transport or runtime dependencies: every entry point is a pure function
//! over caller-owned bytes, safe to call from any thread.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed frames surface as `WsFrameError`/`Result`, never as a panic or a
//! partially decoded frame.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{Result, WsFrameError};
pub use protocol::frame::{decode_frame, Frame};
pub use protocol::handshake::{build_response, compute_accept_key};
