//! Postmock - serve Postman collections as local mock HTTP servers

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postmock::api;
use postmock::config::Config;
use postmock::postman::PostmanClient;
use postmock::routing::{build_route_table, CollectionSpecs};

#[derive(Parser)]
#[command(name = "postmock")]
#[command(about = "Serve Postman collections as local mock HTTP servers")]
#[command(version)]
struct Cli {
    /// Collections to mock, as `ID` or `ID:/root-path`
    #[arg(required = true, value_name = "COLLECTION")]
    collections: Vec<String>,

    /// Port to run the mock server on (random free port if omitted)
    #[arg(short, long)]
    port: Option<u16>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("postmock={},tower_http=debug", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    let _ = dotenvy::dotenv();

    // Mount parsing happens before any network activity
    let mut specs = CollectionSpecs::new();
    for spec in &cli.collections {
        specs.add(spec)?;
    }
    let mounts = specs.into_mounts();

    let config = Config::from_env()?;
    let client = PostmanClient::new(&config)?;

    let table = build_route_table(&client, &mounts).await?;

    println!(
        "Mock server setup complete with {} routes",
        table.routes.len()
    );
    for route in &table.routes {
        println!("  {} {} - {}", route.method, route.path, route.name);
    }
    if table.collections.len() > 1 {
        println!("\nMounted collections:");
        for collection in &table.collections {
            println!(
                "  {} ({}) at {} - {} routes",
                collection.name,
                collection.id,
                collection.root.as_deref().unwrap_or("/"),
                collection.route_count
            );
        }
    }

    let router = api::create_router(&table);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", cli.port.unwrap_or(0))).await?;
    let port = listener.local_addr()?.port();

    println!("Starting mock server on http://0.0.0.0:{}", port);
    axum::serve(listener, router).await?;

    Ok(())
}
