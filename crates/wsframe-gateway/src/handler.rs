//! Frame handlers: where decoded frames go once the transport has them.
//!
//! Message reassembly and control-frame replies are not done here; a handler
//! sees every frame individually, in receipt order per connection.

use std::net::SocketAddr;

use async_trait::async_trait;

use wsframe_core::error::Result;
use wsframe_core::protocol::frame::Frame;

/// Receives each decoded frame. Returning an error closes that connection.
#[async_trait]
pub trait FrameHandler: Send + Sync {
    async fn on_frame(&self, peer: SocketAddr, frame: Frame) -> Result<()>;
}

/// Logs every frame at debug level and drops it.
#[derive(Debug, Default)]
pub struct LogHandler;

#[async_trait]
impl FrameHandler for LogHandler {
    async fn on_frame(&self, peer: SocketAddr, frame: Frame) -> Result<()> {
        tracing::debug!(
            %peer,
            fin = frame.fin,
            opcode = frame.kind().as_str(),
            masked = frame.is_masked(),
            len = frame.payload_len(),
            "frame"
        );
        Ok(())
    }
}
