//! Protocol modules (RFC 6455 framing + opening handshake).
//!
//! - `frame`: single-frame decoder over a complete, in-memory buffer.
//! - `opcode`: read-only classification of the 4-bit opcode.
//! - `handshake`: `Sec-WebSocket-Accept` derivation and the 101 response.
//!
//! All parsers are panic-free: malformed input is reported as `WsFrameError`
//! instead of panicking or indexing raw buffers.

pub mod frame;
pub mod handshake;
pub mod opcode;
