//! In-process app for end-to-end tests
//!
//! Requests go straight through the router with `oneshot`, no socket.

use super::constants::*;
use super::fixtures::create_test_data_dir;
use axum::body::Body;
use axum::Router;
use http::{Request, StatusCode};
use sdvx_finder::{make_app, LegacyLibrary, SdvxManager, ServerConfig};
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    /// Dropped with the app.
    pub data_dir: TempDir,
}

impl TestApp {
    pub fn spawn() -> TestApp {
        let data_dir = create_test_data_dir().expect("Failed to create test data dir");
        let router = Self::load_router(&data_dir);
        TestApp { router, data_dir }
    }

    fn load_router(data_dir: &TempDir) -> Router {
        let sdvx = SdvxManager::load(
            data_dir.path().join(SDVX_DB_FILE),
            data_dir.path().join(SDVX_ALIASES_FILE),
        )
        .expect("Failed to load SDVX fixtures");
        let legacy = LegacyLibrary::load(
            data_dir.path().join(LEGACY_MUSIC_FILE),
            data_dir.path().join(LEGACY_NICK_FILE),
        )
        .expect("Failed to load legacy fixtures");
        make_app(ServerConfig::default(), sdvx, legacy)
    }

    /// Builds a fresh app over the same files, as a restart would.
    pub fn restart(self) -> TestApp {
        let router = Self::load_router(&self.data_dir);
        TestApp {
            router,
            data_dir: self.data_dir,
        }
    }

    pub fn path(&self, file: &str) -> PathBuf {
        self.data_dir.path().join(file)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        (status, bytes.to_vec())
    }

    pub async fn get_text(&self, uri: &str) -> (StatusCode, String) {
        let (status, bytes) = self.get(uri).await;
        (status, String::from_utf8(bytes).expect("Body is not UTF-8"))
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let (status, bytes) = self.get(uri).await;
        let value = serde_json::from_slice(&bytes).expect("Body is not JSON");
        (status, value)
    }
}
