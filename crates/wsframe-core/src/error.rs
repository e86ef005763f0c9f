//! Shared error type across wsframe crates.

use thiserror::Error;

/// Stable error codes (used by test vectors and logs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// 64-bit length field beyond the safe integer bound.
    LengthOverflow,
    /// Declared payload length does not match the bytes present.
    LengthMismatch,
    /// Not enough bytes for the header, extended length or mask key.
    TruncatedHeader,
    /// Upgrade request carried no `Sec-WebSocket-Key`.
    MissingHandshakeKey,
    /// Invalid input / malformed request or config.
    BadRequest,
    /// Frame larger than the configured limit.
    PayloadTooLarge,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal error (I/O and friends).
    Internal,
}

impl ErrorCode {
    /// String representation used in vectors and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::LengthOverflow => "LENGTH_OVERFLOW",
            ErrorCode::LengthMismatch => "LENGTH_MISMATCH",
            ErrorCode::TruncatedHeader => "TRUNCATED_HEADER",
            ErrorCode::MissingHandshakeKey => "MISSING_HANDSHAKE_KEY",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, WsFrameError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum WsFrameError {
    #[error("frame length {length} too large to use properly")]
    LengthOverflow { length: u64 },
    #[error("invalid frame length: {actual} payload bytes, expecting {expected}")]
    LengthMismatch { expected: u64, actual: usize },
    #[error("truncated frame header: need {needed} bytes, have {available}")]
    TruncatedHeader { needed: usize, available: usize },
    #[error("missing Sec-WebSocket-Key")]
    MissingHandshakeKey,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl WsFrameError {
    /// Map an error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            WsFrameError::LengthOverflow { .. } => ErrorCode::LengthOverflow,
            WsFrameError::LengthMismatch { .. } => ErrorCode::LengthMismatch,
            WsFrameError::TruncatedHeader { .. } => ErrorCode::TruncatedHeader,
            WsFrameError::MissingHandshakeKey => ErrorCode::MissingHandshakeKey,
            WsFrameError::BadRequest(_) => ErrorCode::BadRequest,
            WsFrameError::PayloadTooLarge => ErrorCode::PayloadTooLarge,
            WsFrameError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            WsFrameError::Internal(_) => ErrorCode::Internal,
        }
    }
}
