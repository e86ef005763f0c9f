//! Opcode classification.
//!
//! Purely descriptive: the decoder never rejects an opcode, reserved values
//! included. Policy on reserved opcodes belongs to the caller.

/// Opcode meaning per RFC 6455 §5.2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpcodeKind {
    Continuation,
    Text,
    Binary,
    Close,
    Ping,
    Pong,
    /// 0x3-0x7 (data) and 0xB-0xF (control).
    Reserved(u8),
}

impl OpcodeKind {
    /// Classify the low nibble of `raw`.
    pub fn from_u8(raw: u8) -> Self {
        match raw & 0x0F {
            0x0 => OpcodeKind::Continuation,
            0x1 => OpcodeKind::Text,
            0x2 => OpcodeKind::Binary,
            0x8 => OpcodeKind::Close,
            0x9 => OpcodeKind::Ping,
            0xA => OpcodeKind::Pong,
            other => OpcodeKind::Reserved(other),
        }
    }

    /// Control opcodes have the high bit of the nibble set.
    pub fn is_control(self) -> bool {
        match self {
            OpcodeKind::Close | OpcodeKind::Ping | OpcodeKind::Pong => true,
            OpcodeKind::Reserved(raw) => raw & 0x08 != 0,
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OpcodeKind::Continuation => "continuation",
            OpcodeKind::Text => "text",
            OpcodeKind::Binary => "binary",
            OpcodeKind::Close => "close",
            OpcodeKind::Ping => "ping",
            OpcodeKind::Pong => "pong",
            OpcodeKind::Reserved(_) => "reserved",
        }
    }
}
