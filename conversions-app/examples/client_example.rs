//! Client example demonstrating conversion flows against a running server.
//!
//! Run with: cargo run -p conversions-app --example client_example --no-default-features --features sqlite

use std::net::SocketAddr;
use std::sync::Arc;

use conversions_client::ConversionsClient;
use conversions_hex::{ConversionService, QueryService, inbound::HttpServer};
use conversions_repo::build_repo;
use exchange_rates::FixedRates;
use rust_decimal_macros::dec;
use tempfile::tempdir;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Find an available port
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    let port = addr.port();
    drop(listener);

    // Use a temp file-backed SQLite DB
    let tmp = tempdir()?;
    let db_path = tmp.path().join("conversions.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    println!("🚀 Starting server on port {port}...");
    println!("   Database: {db_url}");

    // Build repository (handles connection and migration)
    let repo = Arc::new(build_repo(&db_url).await?);

    // Start server in background with the fixed development rates
    let converter = ConversionService::new(repo.clone(), FixedRates::default());
    let queries = QueryService::new(repo);
    let router = HttpServer::new(converter, queries).router();

    let server_addr = format!("127.0.0.1:{port}");
    let server_listener = TcpListener::bind(&server_addr).await?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(server_listener, router.into_make_service()).await {
            eprintln!("server error: {e}");
        }
    });

    // Create client
    let base_url = format!("http://127.0.0.1:{port}");
    let client = ConversionsClient::new(&base_url);

    // ─────────────────────────────────────────────────────────────────────────
    // Demo: conversions and history
    // ─────────────────────────────────────────────────────────────────────────

    let health = client.health().await?;
    println!("✅ Server health: {health}");

    let usd_eur = client.convert("USD", "EUR", dec!(10), 1).await?;
    println!(
        "✅ Converted {} {} -> {} {} at {} (id={})",
        usd_eur.amount,
        usd_eur.from_currency,
        usd_eur.converted_amount,
        usd_eur.to_currency,
        usd_eur.exchange_rate,
        usd_eur.id
    );

    let gbp_inr = client.convert("gbp", "inr", dec!(250.75), 2).await?;
    println!(
        "✅ Converted {} {} -> {} {} (id={})",
        gbp_inr.amount, gbp_inr.from_currency, gbp_inr.converted_amount, gbp_inr.to_currency, gbp_inr.id
    );

    // Same-currency conversions are rejected
    let rejected = client.convert("USD", "usd", dec!(5), 1).await;
    if let Err(e) = rejected {
        println!("✅ Same currency rejected: {e}");
    }

    let fetched = client.get_conversion(usd_eur.id).await?;
    println!("✅ Fetched conversion {} booked on {}", fetched.id, fetched.conversion_date);

    let department = client.by_department(1).await?;
    println!("\n📋 Department 1: {} conversion(s)", department.len());

    let into_eur = client.by_currency("eur").await?;
    println!("📋 Into EUR: {} conversion(s)", into_eur.len());

    let all = client.list_conversions().await?;
    println!("📋 All conversions (newest first):");
    for c in all {
        println!(
            "   - #{} {} {} -> {} {} (dept {})",
            c.id, c.amount, c.from_currency, c.converted_amount, c.to_currency, c.department_id
        );
    }

    println!("\n🎉 Example completed successfully!");

    Ok(())
}
