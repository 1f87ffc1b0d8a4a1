//! # Conversions Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the repository adapter
//! - Pick the exchange rate provider
//! - Create the conversion and query services
//! - Start the HTTP server

mod config;

use std::sync::Arc;

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use conversions_hex::{ConversionService, QueryService, inbound::HttpServer};
use conversions_repo::build_repo;
use exchange_rates::RateSource;

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()
        .map_err(|e| anyhow::anyhow!("failed to create OTLP span exporter: {}", e))?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("conversions-service"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize OpenTelemetry tracing
    let (otel_tracer, otel_provider) = init_tracer()?;
    let telemetry = tracing_opentelemetry::layer().with_tracer(otel_tracer);

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,conversions_app=debug,conversions_hex=debug,exchange_rates=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting conversions server on port {}", config.port);

    // Build repository (handles connection and migration)
    let repo = Arc::new(build_repo(&config.database_url).await?);

    let rates = RateSource::from_app_id(config.rates_app_id.clone(), &config.rates_base_url);
    match &rates {
        RateSource::Live(client) => {
            tracing::info!(base_url = client.base_url(), "Using live exchange rates")
        }
        RateSource::Fixed(_) => tracing::warn!(
            "OPENEXCHANGERATES_APP_ID not set, using fixed development exchange rates"
        ),
    }

    // Both services share one store
    let converter = ConversionService::new(repo.clone(), rates);
    let queries = QueryService::new(repo);

    // Create and run the HTTP server
    let server = HttpServer::new(converter, queries);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    if let Err(e) = otel_provider.shutdown() {
        tracing::warn!(error = %e, "Failed to flush traces on shutdown");
    }
    Ok(())
}
