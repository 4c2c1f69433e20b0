//! Web server for Cubby.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use crate::config::Config;
use crate::store::{FileService, TrashSweeper};
use crate::{CubbyError, Result};

use super::handlers::AppState;
use super::router::{
    create_health_router, create_router, create_static_router, create_swagger_router,
};

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Full configuration.
    config: Config,
}

impl WebServer {
    /// Create a new web server around an existing file service.
    pub fn new(config: &Config, service: Arc<FileService>) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| {
                CubbyError::Validation(format!("invalid server address: {e}"))
            })?;

        let app_state = AppState::new(service).with_upload_config(&config.upload);

        Ok(Self {
            addr,
            app_state: Arc::new(app_state),
            config: config.clone(),
        })
    }

    /// Create a new web server with stores rooted per the configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let service = Arc::new(FileService::new(
            &config.storage.files_path,
            &config.storage.trash_path,
        )?);
        Self::new(config, service)
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Build the full router: API, health, swagger and optional statics.
    fn build_router(&self) -> axum::Router {
        let mut router = create_router(self.app_state.clone(), &self.config.server.cors_origins)
            .merge(create_health_router())
            .merge(create_swagger_router());

        // Add static file serving if enabled
        if self.config.server.serve_static {
            if let Some(static_router) = create_static_router(&self.config.server.static_path) {
                router = router.merge(static_router);
            }
        }

        // Add gzip compression layer
        router.layer(CompressionLayer::new())
    }

    /// Start the background trash sweep if enabled.
    fn start_sweeper(&self) {
        if !self.config.sweep.enabled {
            tracing::info!("Trash sweep disabled by configuration");
            return;
        }

        TrashSweeper::spawn(
            self.app_state.service.clone(),
            self.config.sweep.interval_secs,
        );
        tracing::info!(
            "Trash sweeper started (runs every {} seconds)",
            self.config.sweep.interval_secs
        );
    }

    /// Run the web server.
    pub async fn run(self) -> std::result::Result<(), std::io::Error> {
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        // Start the sweep only after a successful bind
        self.start_sweeper();

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await
    }

    /// Run the server and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::result::Result<SocketAddr, std::io::Error> {
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        self.start_sweeper();

        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
