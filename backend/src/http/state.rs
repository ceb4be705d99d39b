//! Application state for the HTTP server.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::config::CoverageConfig;
use crate::error::CoverageResult;
use crate::services::CoverageSession;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The single coverage session; replaced wholesale on upload
    pub session: Arc<RwLock<CoverageSession>>,
    /// Maximum accepted upload size in bytes
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(session: CoverageSession, max_upload_bytes: usize) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            max_upload_bytes,
        }
    }

    /// Build state from a loaded configuration.
    pub fn from_config(config: &CoverageConfig) -> CoverageResult<Self> {
        let session = CoverageSession::from_config(config)?;
        Ok(Self::new(session, config.server.max_upload_bytes))
    }
}
