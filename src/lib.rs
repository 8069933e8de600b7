//! SDVX Finder Library
//!
//! Song identification for SOUND VOLTEX: catalog loading from the game's
//! music database export, alias administration and the matching cascade,
//! plus the older nickname database served next to it.

pub mod config;
pub mod legacy;
pub mod sdvx;
pub mod server;
pub mod status;

pub use legacy::LegacyLibrary;
pub use sdvx::SdvxManager;
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
pub use status::Status;
