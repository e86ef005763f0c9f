//! End-to-end: upgrade + frame stream over in-memory pipes and real TCP.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

use wsframe_core::error::{ErrorCode, Result, WsFrameError};
use wsframe_core::protocol::frame::Frame;
use wsframe_gateway::app_state::AppState;
use wsframe_gateway::config;
use wsframe_gateway::handler::FrameHandler;
use wsframe_gateway::transport::{run_connection, serve};

const REQUEST: &str = "GET /ws HTTP/1.1\r\n\
Host: localhost\r\n\
Upgrade: websocket\r\n\
Connection: Upgrade\r\n\
Sec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==\r\n\
Sec-WebSocket-Version: 13\r\n\
\r\n";

const RESPONSE: &str = "HTTP/1.1 101 Switching Protocols\r\n\
Upgrade: websocket\r\n\
Connection: Upgrade\r\n\
Sec-WebSocket-Accept: s3pPLMBiTxaQ9kYGzzhZRbK+xOo=\r\n\
\r\n";

const MASKED_HELLO: [u8; 11] = [0x81, 0x85, 0x37, 0xFA, 0x21, 0x3D, 0x7F, 0x9F, 0x4D, 0x51, 0x58];

struct Recorder {
    tx: mpsc::UnboundedSender<Frame>,
}

#[async_trait]
impl FrameHandler for Recorder {
    async fn on_frame(&self, _peer: SocketAddr, frame: Frame) -> Result<()> {
        self.tx
            .send(frame)
            .map_err(|_| WsFrameError::Internal("recorder closed".into()))
    }
}

fn app(max_frame_bytes: usize) -> (AppState, mpsc::UnboundedReceiver<Frame>) {
    app_with(max_frame_bytes, 60000)
}

fn app_with(
    max_frame_bytes: usize,
    idle_timeout_ms: u64,
) -> (AppState, mpsc::UnboundedReceiver<Frame>) {
    let yaml = format!(
        r#"
version: 1
gateway:
  handshake_timeout_ms: 1000
  idle_timeout_ms: {idle_timeout_ms}
limits:
  max_frame_bytes: {max_frame_bytes}
  read_chunk_bytes: 64
"#
    );
    let cfg = config::load_from_str(&yaml).unwrap();
    let (tx, rx) = mpsc::unbounded_channel();
    (AppState::new(cfg, Arc::new(Recorder { tx })), rx)
}

fn peer() -> SocketAddr {
    "127.0.0.1:40000".parse().unwrap()
}

#[tokio::test]
async fn upgrade_then_frames() {
    let (app, mut rx) = app(1024);
    let (mut client, server) = tokio::io::duplex(4096);
    let task = tokio::spawn(run_connection(server, peer(), app));

    // First frame pipelined right behind the request head.
    let mut first = REQUEST.as_bytes().to_vec();
    first.extend_from_slice(&MASKED_HELLO);
    client.write_all(&first).await.unwrap();

    let mut resp = vec![0u8; RESPONSE.len()];
    client.read_exact(&mut resp).await.unwrap();
    assert_eq!(String::from_utf8(resp).unwrap(), RESPONSE);

    let hello = rx.recv().await.expect("hello frame");
    assert!(hello.fin);
    assert_eq!(hello.opcode, 1);
    assert_eq!(&hello.payload[..], b"Hello");

    // 200-byte binary split over two writes.
    let mut big = vec![0x82, 126, 0x00, 0xC8];
    big.extend(std::iter::repeat(0x42).take(200));
    client.write_all(&big[..50]).await.unwrap();
    client.write_all(&big[50..]).await.unwrap();

    let bin = rx.recv().await.expect("binary frame");
    assert_eq!(bin.opcode, 2);
    assert_eq!(bin.payload_len(), 200);

    drop(client);
    task.await.unwrap().unwrap();
}

#[tokio::test]
async fn missing_key_gets_400() {
    let (app, _rx) = app(1024);
    let (mut client, server) = tokio::io::duplex(4096);
    let task = tokio::spawn(run_connection(server, peer(), app));

    let req = REQUEST.replace("Sec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==\r\n", "");
    client.write_all(req.as_bytes()).await.unwrap();

    let mut resp = String::new();
    client.read_to_string(&mut resp).await.unwrap();
    assert!(resp.starts_with("HTTP/1.1 400 Bad Request\r\n"), "resp={resp}");

    let err = task.await.unwrap().unwrap_err();
    assert_eq!(err.code(), ErrorCode::MissingHandshakeKey);
}

#[tokio::test]
async fn oversize_frame_closes_connection() {
    let (app, _rx) = app(64);
    let (mut client, server) = tokio::io::duplex(4096);
    let task = tokio::spawn(run_connection(server, peer(), app));

    client.write_all(REQUEST.as_bytes()).await.unwrap();
    let mut resp = vec![0u8; RESPONSE.len()];
    client.read_exact(&mut resp).await.unwrap();

    client.write_all(&[0x82, 126, 0x01, 0x00]).await.unwrap();
    let err = task.await.unwrap().unwrap_err();
    assert_eq!(err.code(), ErrorCode::PayloadTooLarge);
}

#[tokio::test]
async fn partial_frame_hits_idle_timeout() {
    let (app, mut rx) = app_with(1024, 1000);
    let (mut client, server) = tokio::io::duplex(4096);
    let task = tokio::spawn(run_connection(server, peer(), app));

    client.write_all(REQUEST.as_bytes()).await.unwrap();
    let mut resp = vec![0u8; RESPONSE.len()];
    client.read_exact(&mut resp).await.unwrap();

    // Header promises 100 payload bytes; only 3 ever arrive.
    client.write_all(&[0x82, 100, 0x01, 0x02, 0x03]).await.unwrap();

    let err = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("connection closed in time")
        .unwrap()
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::BadRequest);
    assert!(rx.try_recv().is_err());
    drop(client);
}

#[tokio::test]
async fn handshake_times_out() {
    let (app, _rx) = app(1024);
    let (_client, server) = tokio::io::duplex(4096);

    let err = run_connection(server, peer(), app).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::BadRequest);
}

#[tokio::test]
async fn serve_over_tcp() {
    let (app, mut rx) = app(1024);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(serve(listener, app));

    let mut client = TcpStream::connect(addr).await.unwrap();
    client.write_all(REQUEST.as_bytes()).await.unwrap();
    let mut resp = vec![0u8; RESPONSE.len()];
    client.read_exact(&mut resp).await.unwrap();
    assert_eq!(String::from_utf8(resp).unwrap(), RESPONSE);

    client.write_all(&MASKED_HELLO).await.unwrap();
    let frame = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("frame in time")
        .expect("frame");
    assert_eq!(&frame.payload[..], b"Hello");

    server.abort();
}
