use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::oneshot;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use topup_service::account::repository::InMemoryAccountStore;
use topup_service::account::seed::{load_accounts, mock_accounts};
use topup_service::config::Config;
use topup_service::server::Server;
use topup_service::topup::controller::TopUpController;
use topup_service::topup::service::TopUpService;
use topup_service::topup::txn_id::RandomTransactionIds;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("topup_service=info".parse()?),
        )
        .with_target(true)
        .init();

    let config = Config::from_env().context("Failed to load config")?;

    let accounts = match &config.seed_path {
        Some(path) => load_accounts(path)?,
        None => mock_accounts(),
    };
    let store = InMemoryAccountStore::with_accounts(accounts);
    info!("Seeded {} accounts", store.len().await);

    let service = TopUpService::new(
        Arc::new(store),
        config.verifier().context("Failed to build credential verifier")?,
        Arc::new(RandomTransactionIds),
    );
    let controller = Arc::new(TopUpController::new(service));
    let server = Server::new(config.bind_addr.clone(), controller);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = shutdown_tx.send(());
            }
            Err(e) => error!("Failed to listen for shutdown signal: {}", e),
        }
    });

    server.start(shutdown_rx).await
}
