//! Common test infrastructure
//!
//! Every test gets its own data directory with a Shift-JIS music database,
//! an aliases file and the legacy JSON files, and an app routed in-process.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{TestApp, TRACK_LOVE_ID};
//!
//! #[tokio::test]
//! async fn test_get_track() {
//!     let app = TestApp::spawn();
//!     let (status, body) = app.get_json(&format!("/sdvx/get?id={}", TRACK_LOVE_ID)).await;
//!     assert_eq!(status, 200);
//!     assert_eq!(body["title_name"], "LOVE");
//! }
//! ```
#![allow(dead_code)]

mod app;
mod constants;
mod fixtures;

pub use app::TestApp;
pub use constants::*;
pub use fixtures::{create_test_data_dir, encode_shift_jis, music_db_xml, music_entry};
