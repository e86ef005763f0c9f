//! Frame delimiting over an accumulation buffer.
//!
//! The decoder only accepts one complete frame. This buffer collects socket
//! reads, peeks each header to learn the full frame size, and splits off
//! exactly that many bytes once they have all arrived.

use bytes::{Buf, Bytes, BytesMut};

use wsframe_core::error::{Result, WsFrameError};
use wsframe_core::protocol::frame::{
    LEN_EXT16, LEN_EXT64, LEN_MASK, MASK_BIT, MASK_KEY_LEN, MAX_PAYLOAD_LEN,
};

#[derive(Debug)]
pub struct FrameDelimiter {
    buf: BytesMut,
    max_frame_bytes: usize,
}

impl FrameDelimiter {
    pub fn new(max_frame_bytes: usize) -> Self {
        Self::with_buffer(BytesMut::new(), max_frame_bytes)
    }

    /// Start from bytes already read (e.g. whatever followed the upgrade request).
    pub fn with_buffer(buf: BytesMut, max_frame_bytes: usize) -> Self {
        Self {
            buf,
            max_frame_bytes,
        }
    }

    pub fn extend(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Bytes received but not yet handed out as a frame.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Next complete frame, or `None` until more bytes arrive.
    ///
    /// Oversize frames fail as soon as their header is readable.
    pub fn next_frame(&mut self) -> Result<Option<Bytes>> {
        let Some(frame_len) = frame_extent(&self.buf)? else {
            return Ok(None);
        };

        if frame_len > self.max_frame_bytes as u64 {
            return Err(WsFrameError::PayloadTooLarge);
        }
        // Bounded by max_frame_bytes above.
        let frame_len = frame_len as usize;

        if self.buf.len() < frame_len {
            return Ok(None);
        }
        Ok(Some(self.buf.split_to(frame_len).freeze()))
    }
}

/// Total frame size (header + mask key + payload) if the header is complete.
fn frame_extent(mut peek: &[u8]) -> Result<Option<u64>> {
    if peek.remaining() < 2 {
        return Ok(None);
    }
    peek.advance(1);
    let b1 = peek.get_u8();

    let mut header = 2u64;
    let payload = match b1 & LEN_MASK {
        LEN_EXT16 => {
            if peek.remaining() < 2 {
                return Ok(None);
            }
            header += 2;
            u64::from(peek.get_u16())
        }
        LEN_EXT64 => {
            if peek.remaining() < 8 {
                return Ok(None);
            }
            header += 8;
            let length = peek.get_u64();
            if length > MAX_PAYLOAD_LEN {
                return Err(WsFrameError::LengthOverflow { length });
            }
            length
        }
        short => u64::from(short),
    };

    if b1 & MASK_BIT != 0 {
        header += MASK_KEY_LEN as u64;
    }
    Ok(Some(header + payload))
}
