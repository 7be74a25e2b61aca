//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create Axum Router with the dispatch handler
//! - Wire up middleware (tracing, request ID)
//! - Bind server to listener, shut down gracefully
//! - Dispatch every request to the admin region or a client region

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use percent_encoding::percent_decode_str;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::admin::admin_region;
use crate::config::{HistoryConfig, MockConfig};
use crate::history::preview;
use crate::http::request::{CapturedRequest, UuidRequestId};
use crate::http::response;
use crate::observability::metrics;
use crate::region::{Region, RegionResolver, RegionStore, RegionTarget};
use crate::routing::Route;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub regions: Arc<RegionStore>,
    pub admin: Arc<Region>,
    pub resolver: Arc<RegionResolver>,
    pub history_config: HistoryConfig,
}

impl AppState {
    pub fn new(config: &MockConfig) -> Self {
        Self {
            regions: Arc::new(RegionStore::new()),
            admin: Arc::new(admin_region(&config.admin)),
            resolver: Arc::new(RegionResolver::new(&config.admin, &config.region)),
            history_config: config.history.clone(),
        }
    }
}

/// HTTP server for the mock service.
pub struct HttpServer {
    router: Router,
    config: MockConfig,
    regions: Arc<RegionStore>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: MockConfig) -> Self {
        let state = AppState::new(&config);
        let regions = state.regions.clone();
        let router = Self::build_router(state);
        Self {
            router,
            config,
            regions,
        }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// No timeout layer: a matched request is always read to completion so
    /// its history entry is never lost.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            admin_prefix = %self.config.admin.path_prefix,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Client regions shared with the running server.
    pub fn regions(&self) -> Arc<RegionStore> {
        self.regions.clone()
    }
}

/// Top-level handler: resolve region, look up route, capture, respond.
async fn dispatch(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    let start_time = Instant::now();
    let (parts, body) = request.into_parts();
    let method = parts.method.as_str();
    // Routes are registered with decoded paths, so match on the decoded form.
    let decoded_path = percent_decode_str(parts.uri.path()).decode_utf8_lossy();
    let path: &str = &decoded_path;
    let remote_addr = addr.to_string();

    let target = state.resolver.resolve(path, &parts.headers, &remote_addr);
    let (region, route) = match &target {
        RegionTarget::Admin => ("admin", state.admin.lookup(method, path)),
        RegionTarget::Client(key) => (key.as_str(), state.regions.lookup(key, method, path)),
    };

    let Some(route) = route else {
        tracing::debug!(region = %region, method = %method, path = %path, "No route matched");
        metrics::record_request("not_found", start_time);
        return response::not_found();
    };

    let captured = match CapturedRequest::read(&parts, body).await {
        Ok(captured) => captured,
        Err(e) => {
            tracing::warn!(region = %region, path = %path, error = %e, "Failed to read request body");
            metrics::record_request("bad_request", start_time);
            return response::unreadable_body();
        }
    };

    tracing::info!(
        region = %region,
        method = %method,
        path = %path,
        query_raw = %captured.entry.query_raw,
        body_raw = %preview(&captured.entry.body_raw, state.history_config.log_preview_bytes),
        "Matched request"
    );

    match route {
        Route::Native(op) => {
            let caller = state.resolver.client_key(&parts.headers, &remote_addr);
            let response = op.handle(&state.regions, &caller, &captured.form);
            metrics::record_request("admin", start_time);
            response
        }
        Route::Scripted(route) => {
            route.record(captured.entry);
            metrics::record_request("replayed", start_time);
            route.script().render().into_response()
        }
    }
}
