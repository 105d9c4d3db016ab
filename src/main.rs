use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use phonebook::config::{load_config, StorageBackend};
use phonebook::http::HttpServer;
use phonebook::lifecycle::{build_store, shutdown_on_signal, Shutdown, StartupError};
use phonebook::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "phonebook")]
#[command(about = "Phonebook REST service", long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides PORT and the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Storage backend: memory or mongo
    #[arg(short, long)]
    backend: Option<StorageBackend>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref(), |config| {
        if let Some(port) = args.port {
            config.listener.port = port;
        }
        if let Some(backend) = args.backend {
            config.storage.backend = backend;
        }
    })?;

    logging::init_logging(&config.observability);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = %config.storage.backend,
        "phonebook starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let store = build_store(&config.storage).await?;

    let address = config.listener.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(shutdown_on_signal(shutdown.clone()));

    HttpServer::new(config, store)
        .run(listener, server_shutdown)
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
