//! wsframe gateway library entry.
//!
//! The connection-side collaborator of `wsframe-core`: strict config, the
//! raw-TCP upgrade, stream-to-frame delimiting, and per-frame handlers. It is
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod handler;
pub mod transport;
