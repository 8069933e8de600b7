use axum::extract::FromRef;

use crate::legacy::LegacyLibrary;
use crate::sdvx::SdvxManager;
use std::sync::Arc;

use super::ServerConfig;

pub type GuardedSdvxManager = Arc<SdvxManager>;
pub type GuardedLegacyLibrary = Arc<LegacyLibrary>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub sdvx: GuardedSdvxManager,
    pub legacy: GuardedLegacyLibrary,
}

impl ServerState {
    pub fn new(config: ServerConfig, sdvx: SdvxManager, legacy: LegacyLibrary) -> ServerState {
        ServerState {
            config,
            sdvx: Arc::new(sdvx),
            legacy: Arc::new(legacy),
        }
    }
}

impl FromRef<ServerState> for GuardedSdvxManager {
    fn from_ref(input: &ServerState) -> Self {
        input.sdvx.clone()
    }
}

impl FromRef<ServerState> for GuardedLegacyLibrary {
    fn from_ref(input: &ServerState) -> Self {
        input.legacy.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
