use std::sync::Arc;

use anyhow::Context;
use taskhub::auth::TokenService;
use taskhub::services::TaskService;
use taskhub::store::{self, MemoryTaskStore, PgTaskStore, TaskStore};
use taskhub::{grpc, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().context("invalid configuration")?;
    let tokens = Arc::new(TokenService::new(
        config.jwt_secret.as_bytes(),
        config.jwt_expiration,
    ));

    let task_store: Arc<dyn TaskStore> = match &config.database_url {
        Some(url) => {
            let pool = store::postgres::connect(url, config.database_max_connections).await?;
            Arc::new(PgTaskStore::new(pool))
        }
        None => {
            log::warn!("DATABASE_URL is not set; tasks are kept in memory");
            Arc::new(MemoryTaskStore::new())
        }
    };
    let tasks = Arc::new(TaskService::new(task_store));

    let addr = config.grpc_addr()?;
    log::info!("Starting task service at {}", addr);

    grpc::serve(addr, tasks, tokens, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for shutdown signal: {}", e);
        }
        log::info!("Shutting down task service");
    })
    .await
    .context("task service failed")?;

    Ok(())
}
