//! RFC 6455 §5.2 frame decoding (panic-free).
//!
//! Parsing rules:
//! - Never index (`buf[0]`); read through `Buf` after an explicit length check.
//! - Check the buffer length before every multi-byte read.
//! - The input holds exactly one frame; short or trailing bytes are errors.

use bytes::{Buf, Bytes, BytesMut};

use crate::error::{Result, WsFrameError};
use crate::protocol::opcode::OpcodeKind;

/// Byte 0: final fragment.
pub const FIN_BIT: u8 = 0x80;
/// Byte 0: extension bits.
pub const RSV1_BIT: u8 = 0x40;
pub const RSV2_BIT: u8 = 0x20;
pub const RSV3_BIT: u8 = 0x10;
/// Byte 0: opcode nibble.
pub const OPCODE_MASK: u8 = 0x0F;
/// Byte 1: payload is masked.
pub const MASK_BIT: u8 = 0x80;
/// Byte 1: 7-bit base length.
pub const LEN_MASK: u8 = 0x7F;

/// Base length marker for a 16-bit extended length.
pub const LEN_EXT16: u8 = 126;
/// Base length marker for a 64-bit extended length.
pub const LEN_EXT64: u8 = 127;

/// Largest payload length accepted from the 64-bit field (2^53 - 1).
///
/// Tighter than RFC 6455 allows. Lengths stay exact as `f64`.
pub const MAX_PAYLOAD_LEN: u64 = (1 << 53) - 1;

/// Length of the masking key.
pub const MASK_KEY_LEN: usize = 4;

/// Decoded frame. The payload is already unmasked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Final fragment of a message.
    pub fin: bool,
    /// Extension bits, passed through as-is.
    pub rsv1: bool,
    pub rsv2: bool,
    pub rsv3: bool,
    /// Raw opcode (0..=15), not validated.
    pub opcode: u8,
    /// Masking key, present iff the MASK bit was set.
    pub mask_key: Option<[u8; 4]>,
    /// Unmasked payload.
    pub payload: Bytes,
}

impl Frame {
    pub fn is_masked(&self) -> bool {
        self.mask_key.is_some()
    }

    /// Logical (unmasked) payload length in bytes.
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    pub fn kind(&self) -> OpcodeKind {
        OpcodeKind::from_u8(self.opcode)
    }
}

/// XOR `bytes` with `key`, cycling the key every 4 bytes.
///
/// Applying the same key twice restores the input.
pub fn apply_mask(bytes: &mut [u8], key: [u8; 4]) {
    for (b, k) in bytes.iter_mut().zip(key.iter().cycle()) {
        *b ^= k;
    }
}

fn ensure_header(total: usize, needed: usize) -> Result<()> {
    if total < needed {
        return Err(WsFrameError::TruncatedHeader {
            needed,
            available: total,
        });
    }
    Ok(())
}

/// Decode exactly one frame from `buf`.
///
/// `buf` must contain the header, the optional masking key and the whole
/// payload, with nothing after it.
pub fn decode_frame(mut buf: Bytes) -> Result<Frame> {
    let total = buf.remaining();

    // Minimum header: flags/opcode, mask/len7
    let mut needed = 2;
    ensure_header(total, needed)?;

    let b0 = buf.get_u8();
    let b1 = buf.get_u8();

    let length = match b1 & LEN_MASK {
        LEN_EXT16 => {
            needed += 2;
            ensure_header(total, needed)?;
            u64::from(buf.get_u16())
        }
        LEN_EXT64 => {
            needed += 8;
            ensure_header(total, needed)?;
            let length = buf.get_u64();
            if length > MAX_PAYLOAD_LEN {
                return Err(WsFrameError::LengthOverflow { length });
            }
            length
        }
        short => u64::from(short),
    };

    let mask_key = if b1 & MASK_BIT != 0 {
        needed += MASK_KEY_LEN;
        ensure_header(total, needed)?;
        let mut key = [0u8; MASK_KEY_LEN];
        buf.copy_to_slice(&mut key);
        Some(key)
    } else {
        None
    };

    // Strict equality: a short buffer and trailing bytes are both rejected.
    let payload_len =
        usize::try_from(length).map_err(|_| WsFrameError::LengthOverflow { length })?;
    if buf.remaining() != payload_len {
        return Err(WsFrameError::LengthMismatch {
            expected: length,
            actual: buf.remaining(),
        });
    }

    let payload = match mask_key {
        Some(key) => {
            let mut unmasked = BytesMut::from(buf.chunk());
            apply_mask(&mut unmasked, key);
            unmasked.freeze()
        }
        None => buf,
    };

    Ok(Frame {
        fin: b0 & FIN_BIT != 0,
        rsv1: b0 & RSV1_BIT != 0,
        rsv2: b0 & RSV2_BIT != 0,
        rsv3: b0 & RSV3_BIT != 0,
        opcode: b0 & OPCODE_MASK,
        mask_key,
        payload,
    })
}
