//! HTTP API Layer
//!
//! axum routes for the move-execution lifecycle. Handlers only translate
//! between JSON and [`moveops_core::application::MoveExecutionService`];
//! every rule lives in core.

pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;
pub mod types;

pub use config::ServerConfig;
pub use error::ApiError;
pub use router::build_app_router;
pub use server::HttpServer;
pub use state::AppState;
