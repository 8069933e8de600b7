pub mod config;
mod http_layers;
mod legacy_routes;
mod sdvx_routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use http_layers::*;
pub use server::{make_app, run_server};
