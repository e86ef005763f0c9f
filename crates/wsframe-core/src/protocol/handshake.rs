//! Opening handshake: `Sec-WebSocket-Accept` derivation (RFC 6455 §4.2.2).

use base64::prelude::*;
use sha1::{Digest, Sha1};

use crate::error::{Result, WsFrameError};

/// GUID appended to the client key before hashing.
pub const WS_GUID: &str = "258EAFA5-E914-47DA-95CA-C5AB0DC85B11";

/// Compute the `Sec-WebSocket-Accept` value for a client key.
///
/// Empty keys are rejected rather than hashed into a meaningless value.
pub fn compute_accept_key(sec_websocket_key: &str) -> Result<String> {
    let key = sec_websocket_key.trim();
    if key.is_empty() {
        return Err(WsFrameError::MissingHandshakeKey);
    }

    let mut sha1 = Sha1::new();
    sha1.update(key.as_bytes());
    sha1.update(WS_GUID.as_bytes());
    Ok(BASE64_STANDARD.encode(sha1.finalize()))
}

/// Full `101 Switching Protocols` header block, terminated by an empty line.
pub fn build_response(sec_websocket_key: &str) -> Result<String> {
    let accept = compute_accept_key(sec_websocket_key)?;
    Ok(format!(
        "HTTP/1.1 101 Switching Protocols\r\n\
         Upgrade: websocket\r\n\
         Connection: Upgrade\r\n\
         Sec-WebSocket-Accept: {accept}\r\n\
         \r\n"
    ))
}
