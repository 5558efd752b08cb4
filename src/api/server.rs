//! API Server
//!
//! Binds the HTTP listener, applies the middleware stack and serves until the
//! shutdown future resolves.

use super::{
    auth::BearerAuth,
    handlers::AppState,
    middleware::{create_cors_layer, request_id_middleware},
    routes::create_router,
};
use crate::config::settings::ApiConfig;
use crate::services::ServiceFactory;
use crate::utils::errors::{GameBotError, Result};
use std::{future::Future, net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

pub struct ApiServer {
    config: ApiConfig,
    services: ServiceFactory,
    web_app_url: String,
}

impl ApiServer {
    pub fn new(config: ApiConfig, services: ServiceFactory, web_app_url: String) -> Self {
        Self {
            config,
            services,
            web_app_url,
        }
    }

    /// Serve until `shutdown` resolves, then finish in-flight requests
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.create_app();
        let addr = self.socket_addr()?;

        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!(address = %addr, "API server listening");
        info!(origins = ?self.config.allowed_origins, timeout_secs = self.config.request_timeout_secs, "API server configuration");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("API server stopped");
        Ok(())
    }

    /// Router with the full middleware stack
    pub fn create_app(&self) -> axum::Router {
        let state = Arc::new(AppState {
            services: self.services.clone(),
            web_app_url: self.web_app_url.clone(),
        });

        create_router(state, BearerAuth::new(self.config.secret_token.clone()))
            .layer(axum::middleware::from_fn(request_id_middleware))
            .layer(create_cors_layer(&self.config.allowed_origins))
            .layer(TimeoutLayer::new(Duration::from_secs(self.config.request_timeout_secs)))
            .layer(TraceLayer::new_for_http())
    }

    fn socket_addr(&self) -> Result<SocketAddr> {
        let ip = self.config.host.parse::<std::net::IpAddr>().map_err(|e| {
            GameBotError::Config(format!("Invalid API host '{}': {}", self.config.host, e))
        })?;
        Ok(SocketAddr::from((ip, self.config.port)))
    }
}
