//! HTTP surface: `GET /`, `POST|GET /api/experiments`, `GET /api/models`.

#[path = "api/handlers.rs"]
mod handlers;

#[path = "api/types.rs"]
pub mod types;

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

use crate::{error::EvalError, service::ExperimentService};

pub use handlers::{ApiError, ApiResult};

/// State shared by every handler.
#[derive(Clone)]
pub struct ServerState {
    pub service: Arc<ExperimentService>,
}

/// REST server wrapping an [`ExperimentService`].
pub struct Server {
    state: ServerState,
    cors: CorsLayer,
}

impl Server {
    pub fn new(service: ExperimentService) -> Self {
        Self {
            state: ServerState {
                service: Arc::new(service),
            },
            cors: CorsLayer::new(),
        }
    }

    /// Restricts cross-origin access to the given origins, credentials allowed.
    pub fn allowed_origins(mut self, origins: &[String]) -> Result<Self, EvalError> {
        self.cors = cors_layer(origins)?;
        Ok(self)
    }

    /// Application router with state applied.
    pub fn router(&self) -> Router {
        create_router(self.cors.clone()).with_state(self.state.clone())
    }

    /// Binds `addr` and serves until the process stops.
    pub async fn run(self, addr: &str) -> std::io::Result<()> {
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Serves on an already bound listener.
    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        if let Ok(addr) = listener.local_addr() {
            log::info!("Listening on http://{addr}");
        }
        axum::serve(listener, self.router()).await
    }
}

/// Routes and layers; state is applied by the caller with `.with_state(...)`.
pub fn create_router(cors: CorsLayer) -> Router<ServerState> {
    let api = Router::new()
        .route(
            "/experiments",
            get(handlers::list_experiments).post(handlers::create_experiment),
        )
        .route("/models", get(handlers::list_models));

    Router::new()
        .route("/", get(handlers::handle_root))
        .nest("/api", api)
        .layer(cors)
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer, EvalError> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|e| EvalError::InvalidRequest(format!("Invalid CORS origin {origin}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_rejects_invalid_origin() {
        assert!(cors_layer(&["bad\norigin".to_string()]).is_err());
        assert!(cors_layer(&["http://localhost:3000".to_string()]).is_ok());
    }
}
