use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use typeahead::auth::AuthTable;
use typeahead::config::Config;
use typeahead::http::router;
use typeahead::service::Facade;
use typeahead::store::memory::MemoryStore;

mod cli;
use cli::Cli;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().with_host(cli.host).with_port(cli.port);

    let auth = Arc::new(AuthTable::new());
    for (key, domain) in &cli.auth_keys {
        auth.insert(key.clone(), domain.clone());
    }

    let store = Arc::new(MemoryStore::new());
    let facade = Arc::new(Facade::new(store, auth, config.large, config.max_word_len));

    let app = router(facade);

    tracing::info!(addr = %config.bind, "starting typeahead");
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .expect("failed to bind listener");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    tracing::info!("shutting down");
}
