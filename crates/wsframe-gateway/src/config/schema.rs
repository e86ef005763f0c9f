use serde::Deserialize;
use wsframe_core::error::{Result, WsFrameError};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub limits: Limits,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(WsFrameError::UnsupportedVersion);
        }

        self.gateway.validate()?;
        self.limits.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_handshake_timeout_ms")]
    pub handshake_timeout_ms: u64,

    #[serde(default = "default_max_handshake_bytes")]
    pub max_handshake_bytes: usize,

    /// Close the connection after this long without receiving a byte.
    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            handshake_timeout_ms: default_handshake_timeout_ms(),
            max_handshake_bytes: default_max_handshake_bytes(),
            idle_timeout_ms: default_idle_timeout_ms(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=60000).contains(&self.handshake_timeout_ms) {
            return Err(WsFrameError::BadRequest(
                "gateway.handshake_timeout_ms must be between 100 and 60000".into(),
            ));
        }
        if !(256..=65536).contains(&self.max_handshake_bytes) {
            return Err(WsFrameError::BadRequest(
                "gateway.max_handshake_bytes must be between 256 and 65536".into(),
            ));
        }
        if !(1000..=600000).contains(&self.idle_timeout_ms) {
            return Err(WsFrameError::BadRequest(
                "gateway.idle_timeout_ms must be between 1000 and 600000".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_handshake_timeout_ms() -> u64 {
    5000
}
fn default_max_handshake_bytes() -> usize {
    8192
}
fn default_idle_timeout_ms() -> u64 {
    60000
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Limits {
    /// Whole frame (header + payload) upper bound.
    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,

    /// Socket read size per iteration.
    #[serde(default = "default_read_chunk_bytes")]
    pub read_chunk_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_frame_bytes: default_max_frame_bytes(),
            read_chunk_bytes: default_read_chunk_bytes(),
        }
    }
}

impl Limits {
    pub fn validate(&self) -> Result<()> {
        if !(2..=64 * 1024 * 1024).contains(&self.max_frame_bytes) {
            return Err(WsFrameError::BadRequest(
                "limits.max_frame_bytes must be between 2 and 67108864".into(),
            ));
        }
        if !(64..=1024 * 1024).contains(&self.read_chunk_bytes) {
            return Err(WsFrameError::BadRequest(
                "limits.read_chunk_bytes must be between 64 and 1048576".into(),
            ));
        }
        Ok(())
    }
}

fn default_max_frame_bytes() -> usize {
    1024 * 1024
}
fn default_read_chunk_bytes() -> usize {
    4096
}
