//! HTTP upgrade request parsing (pre-WebSocket).
//!
//! Reads until `httparse` sees a complete request head. Anything after the
//! head stays in the caller's buffer: clients may pipeline their first frame.

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use wsframe_core::error::{Result, WsFrameError};

const MAX_HEADERS: usize = 64;

/// Response sent when the upgrade cannot be honoured.
pub const BAD_REQUEST_RESPONSE: &str =
    "HTTP/1.1 400 Bad Request\r\nConnection: close\r\nContent-Length: 0\r\n\r\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeRequest {
    pub path: String,
    /// `Sec-WebSocket-Key`, trimmed.
    pub key: String,
}

/// Read one upgrade request head from `reader` into `buf`.
///
/// On success the head has been consumed from `buf`.
pub async fn read_upgrade_request<R>(
    reader: &mut R,
    max_bytes: usize,
    buf: &mut BytesMut,
) -> Result<UpgradeRequest>
where
    R: AsyncRead + Unpin,
{
    loop {
        if let Some((head_len, req)) = parse_upgrade_request(buf)? {
            // A single read may deliver a complete head larger than the limit.
            if head_len > max_bytes {
                return Err(WsFrameError::BadRequest("upgrade request too large".into()));
            }
            buf.advance(head_len);
            return Ok(req);
        }
        if buf.len() >= max_bytes {
            return Err(WsFrameError::BadRequest("upgrade request too large".into()));
        }

        let n = reader
            .read_buf(buf)
            .await
            .map_err(|e| WsFrameError::Internal(format!("read upgrade request failed: {e}")))?;
        if n == 0 {
            return Err(WsFrameError::BadRequest(
                "closed before upgrade request completed".into(),
            ));
        }
    }
}

/// Parse a request head. `None` while it is still partial.
pub fn parse_upgrade_request(buf: &[u8]) -> Result<Option<(usize, UpgradeRequest)>> {
    let mut headers = [httparse::EMPTY_HEADER; MAX_HEADERS];
    let mut req = httparse::Request::new(&mut headers);

    let head_len = match req
        .parse(buf)
        .map_err(|e| WsFrameError::BadRequest(format!("httparse error: {e}")))?
    {
        httparse::Status::Complete(n) => n,
        httparse::Status::Partial => return Ok(None),
    };

    if req.method != Some("GET") {
        return Err(WsFrameError::BadRequest("upgrade must be a GET".into()));
    }

    let is_ws = req.headers.iter().any(|h| {
        h.name.eq_ignore_ascii_case("upgrade") && h.value.eq_ignore_ascii_case(b"websocket")
    });
    if !is_ws {
        return Err(WsFrameError::BadRequest("not a websocket upgrade".into()));
    }

    let key = req
        .headers
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case("sec-websocket-key"))
        .map(|h| String::from_utf8_lossy(h.value).trim().to_string())
        .filter(|k| !k.is_empty())
        .ok_or(WsFrameError::MissingHandshakeKey)?;

    Ok(Some((
        head_len,
        UpgradeRequest {
            path: req.path.unwrap_or("/").to_string(),
            key,
        },
    )))
}
