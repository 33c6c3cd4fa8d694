use clap::Parser;
use gallery::config::{Cli, Config};
use gallery::handler::AppState;
use gallery::library::MediaLibrary;
use gallery::routes::routes;
use tokio::signal;
use tracing;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    tracing::info!("gallery.svc starting");

    let cfg = Config::from_cli(&args).unwrap_or_else(|e| {
        tracing::error!(error = %format!("{:#}", e), "failed to load config");
        std::process::exit(1);
    });

    let media_dir = cfg.app.get_media_dir().clone();
    if !media_dir.is_dir() {
        tracing::error!(path = ?media_dir, "media folder does not exist");
        std::process::exit(1);
    }

    let address = cfg.app.address();
    let app = routes(AppState::new(MediaLibrary::new(media_dir.clone())));

    let listener = tokio::net::TcpListener::bind(&address).await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to setup tcp listener");
        std::process::exit(1);
    });

    tracing::info!(media_dir = ?media_dir, "gallery.svc running on {}", &address);
    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(err) = result {
                tracing::error!(error = %err, "server stopped unexpectedly");
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            tracing::info!("ctrl+c signal received, preparing to shutdown");
        }
    }

    tracing::info!("gallery.svc going off, graceful shutdown complete");
}
