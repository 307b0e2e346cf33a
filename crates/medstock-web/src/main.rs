//! MedStock Web - HTTP API for the storefront.
//!
//! Thin axum layer over `medstock-core`: browse/search/export the catalog,
//! product detail, contact and quote mail, and the admin mutations.

use anyhow::Result;
use clap::Parser;
use medstock_core::MedstockApi;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "medstock-web")]
#[command(about = "HTTP API for the MedStock storefront")]
struct Args {
    /// Port to listen on (0 = auto-assign)
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Base URL of the hosted document store
    #[arg(long)]
    store_url: String,

    /// Endpoint of the transactional mail API
    #[arg(long)]
    mail_endpoint: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    info!("Starting MedStock web server");

    let mut builder = MedstockApi::builder().store_url(&args.store_url);
    if let Some(ref endpoint) = args.mail_endpoint {
        builder = builder.mail_endpoint(endpoint);
    }
    let api = builder.build()?;

    let addr = medstock_web::start_server(api, &args.host, args.port).await?;
    info!("Web server running on {}", addr);

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutting down");

    Ok(())
}
