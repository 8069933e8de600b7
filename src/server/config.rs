use super::RequestsLoggingLevel;
use crate::legacy::DEFAULT_MAX_RESULTS;

#[derive(Clone)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub address: String,
    pub port: u16,
    /// Cap used by `/get` when the caller gives no usable `max`.
    pub nick_max_results: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            address: "127.0.0.1".to_owned(),
            port: 9999,
            nick_max_results: DEFAULT_MAX_RESULTS,
        }
    }
}
