//! Shared application state for the wsframe gateway.
//!
//! Cloned into every connection task; everything inside is read-only.

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::handler::FrameHandler;

#[derive(Clone)]
pub struct AppState {
    cfg: Arc<GatewayConfig>,
    handler: Arc<dyn FrameHandler>,
}

impl AppState {
    pub fn new(cfg: GatewayConfig, handler: Arc<dyn FrameHandler>) -> Self {
        Self {
            cfg: Arc::new(cfg),
            handler,
        }
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.cfg
    }

    pub fn handler(&self) -> Arc<dyn FrameHandler> {
        Arc::clone(&self.handler)
    }
}
