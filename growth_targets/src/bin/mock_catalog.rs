use clap::Parser;
use growth_targets::MockCatalog;
use tracing::{info, Level};

/// Serve the demo catalog for local runs of `growth run`
#[derive(Parser)]
#[command(name = "mock_catalog", version)]
struct Args {
    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    addr: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let args = Args::parse();
    let (router, _handles) = MockCatalog::demo().router();

    info!("Starting mock catalog on {}", args.addr);
    info!("Endpoints:");
    info!("  GET  /api/v1/products?publicAccess=true");
    info!("  GET  /api/v1/products/:id/streams");
    info!("  GET  /api/v1/streams/:id/data/partitions/0/last?count=1");
    info!("  POST /api/v1/streams/:id/data");

    let listener = tokio::net::TcpListener::bind(&args.addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
