#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use wsframe_gateway::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
gateway:
  listen: "0.0.0.0:8080"
limits:
  max_frame_bytez: 123 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.gateway.listen, "0.0.0.0:8080");
    assert_eq!(cfg.gateway.handshake_timeout_ms, 5000);
    assert_eq!(cfg.gateway.max_handshake_bytes, 8192);
    assert_eq!(cfg.gateway.idle_timeout_ms, 60000);
    assert_eq!(cfg.limits.max_frame_bytes, 1024 * 1024);
    assert_eq!(cfg.limits.read_chunk_bytes, 4096);
}

#[test]
fn ok_full_config() {
    let ok = r#"
version: 1
gateway:
  listen: "127.0.0.1:9001"
  handshake_timeout_ms: 1000
  max_handshake_bytes: 4096
limits:
  max_frame_bytes: 65550
  read_chunk_bytes: 1024
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.gateway.listen, "127.0.0.1:9001");
    assert_eq!(cfg.limits.max_frame_bytes, 65550);
}

#[test]
fn unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn out_of_range_values() {
    let cases = [
        "version: 1\ngateway:\n  handshake_timeout_ms: 10\n",
        "version: 1\ngateway:\n  max_handshake_bytes: 100\n",
        "version: 1\ngateway:\n  idle_timeout_ms: 10\n",
        "version: 1\nlimits:\n  max_frame_bytes: 1\n",
        "version: 1\nlimits:\n  read_chunk_bytes: 2000000\n",
    ];
    for c in cases {
        let err = config::load_from_str(c).expect_err("must fail");
        assert_eq!(err.code().as_str(), "BAD_REQUEST", "case={c}");
    }
}
