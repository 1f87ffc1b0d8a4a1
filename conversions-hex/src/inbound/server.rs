//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use conversions_types::{ConversionRepository, ExchangeRateProvider};

use super::handlers::{self, AppState};
use crate::openapi::ApiDoc;
use crate::{ConversionService, QueryService};

/// HTTP Server for the Conversions API.
pub struct HttpServer<R: ConversionRepository, P: ExchangeRateProvider> {
    state: Arc<AppState<R, P>>,
}

impl<R: ConversionRepository, P: ExchangeRateProvider> HttpServer<R, P> {
    /// Creates a new HTTP server over the given services.
    pub fn new(converter: ConversionService<R, P>, queries: QueryService<R>) -> Self {
        Self {
            state: Arc::new(AppState { converter, queries }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        Router::new()
            .route("/health", get(handlers::health))
            .route(
                "/api/conversions/convert",
                post(handlers::convert::<R, P>),
            )
            .route("/api/conversions", get(handlers::list_conversions::<R, P>))
            .route(
                "/api/conversions/{id}",
                get(handlers::get_conversion::<R, P>),
            )
            .route(
                "/api/conversions/department/{department_id}",
                get(handlers::list_by_department::<R, P>),
            )
            .route(
                "/api/conversions/currency/{code}",
                get(handlers::list_by_currency::<R, P>),
            )
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
            .layer(metrics)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
