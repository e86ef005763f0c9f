//! Top-level facade crate for wsframe.
//!
//! Re-exports the decoder/handshake core and the gateway library so users can
//! depend on a single crate.

pub mod core {
    pub use wsframe_core::*;
}

pub mod gateway {
    pub use wsframe_gateway::*;
}
