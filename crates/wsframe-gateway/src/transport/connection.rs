//! Connection loop.
//!
//! Per connection:
//! - Upgrade (bounded by handshake_timeout_ms / max_handshake_bytes)
//! - Read chunks -> FrameDelimiter -> decode_frame -> FrameHandler
//! - No byte within idle_timeout_ms closes the connection
//! - Any decode error closes the connection: stream alignment is gone

use std::net::SocketAddr;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::time::{timeout, Duration};
use tracing::Instrument;

use wsframe_core::error::{Result, WsFrameError};
use wsframe_core::protocol::frame::decode_frame;
use wsframe_core::protocol::handshake::build_response;

use crate::app_state::AppState;
use crate::transport::delimiter::FrameDelimiter;
use crate::transport::upgrade::{read_upgrade_request, BAD_REQUEST_RESPONSE};

const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Accept loop. Only returns if the listener itself is unusable.
pub async fn serve(listener: TcpListener, app: AppState) -> Result<()> {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                // EMFILE and friends: keep serving existing connections.
                tracing::warn!(error = %e, "accept failed");
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };

        let app = app.clone();
        let span = tracing::info_span!("conn", %peer);
        tokio::spawn(
            async move {
                if let Err(e) = run_connection(stream, peer, app).await {
                    tracing::warn!(code = e.code().as_str(), error = %e, "connection closed");
                }
            }
            .instrument(span),
        );
    }
}

/// Drive one connection from upgrade to EOF.
pub async fn run_connection<S>(mut stream: S, peer: SocketAddr, app: AppState) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let cfg = app.cfg();
    let mut buf = BytesMut::with_capacity(cfg.limits.read_chunk_bytes);

    // ---- upgrade
    let handshake_timeout = Duration::from_millis(cfg.gateway.handshake_timeout_ms);
    let upgrade = timeout(
        handshake_timeout,
        read_upgrade_request(&mut stream, cfg.gateway.max_handshake_bytes, &mut buf),
    )
    .await;
    let req = match upgrade {
        Ok(Ok(req)) => req,
        Ok(Err(e)) => {
            let _ = stream.write_all(BAD_REQUEST_RESPONSE.as_bytes()).await;
            return Err(e);
        }
        Err(_) => return Err(WsFrameError::BadRequest("handshake timed out".into())),
    };

    tracing::info!(key = %req.key, path = %req.path, "received upgrade request");
    let response = build_response(&req.key)?;
    stream
        .write_all(response.as_bytes())
        .await
        .map_err(|e| WsFrameError::Internal(format!("write upgrade response failed: {e}")))?;

    // ---- frames
    let handler = app.handler();
    let mut delimiter = FrameDelimiter::with_buffer(buf, cfg.limits.max_frame_bytes);
    let mut chunk = vec![0u8; cfg.limits.read_chunk_bytes];
    let idle_timeout = Duration::from_millis(cfg.gateway.idle_timeout_ms);

    loop {
        while let Some(raw) = delimiter.next_frame()? {
            let frame = decode_frame(raw)?;
            handler.on_frame(peer, frame).await?;
        }

        let n = match timeout(idle_timeout, stream.read(&mut chunk)).await {
            Ok(read) => read.map_err(|e| WsFrameError::Internal(format!("read failed: {e}")))?,
            Err(_) => {
                tracing::debug!(pending = delimiter.buffered(), "idle timeout");
                return Err(WsFrameError::BadRequest("idle timeout".into()));
            }
        };
        if n == 0 {
            tracing::debug!(pending = delimiter.buffered(), "peer closed");
            return Ok(());
        }
        delimiter.extend(&chunk[..n]);
    }
}
