//! HTTP Server
//!
//! Binds the listener up front so callers learn the real address (port 0
//! in tests) before serving.

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use moveops_core::error::{AppError, Result};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;
use crate::router::build_app_router;
use crate::state::AppState;

pub struct HttpServer {
    listener: TcpListener,
    app: Router,
}

impl HttpServer {
    pub async fn bind(config: &ServerConfig, state: AppState) -> Result<Self> {
        let addr = config.bind_address();
        let listener = TcpListener::bind(&addr).await.map_err(|e| {
            AppError::Config(format!("Failed to bind HTTP listener on {}: {}", addr, e))
        })?;

        Ok(Self {
            listener,
            app: build_app_router(state, config),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.local_addr()?;
        info!(%addr, "HTTP server listening");

        axum::serve(self.listener, self.app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("HTTP server stopped");
        Ok(())
    }
}
