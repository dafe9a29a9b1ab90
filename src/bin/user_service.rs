use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use taskhub::auth::{PasswordHasher, TokenService};
use taskhub::services::UserService;
use taskhub::store::{self, MemoryUserStore, PgUserStore, UserStore};
use taskhub::{routes, Config};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().context("invalid configuration")?;
    let tokens = Arc::new(TokenService::new(
        config.jwt_secret.as_bytes(),
        config.jwt_expiration,
    ));

    let user_store: Arc<dyn UserStore> = match &config.database_url {
        Some(url) => {
            let pool = store::postgres::connect(url, config.database_max_connections).await?;
            Arc::new(PgUserStore::new(pool))
        }
        None => {
            log::warn!("DATABASE_URL is not set; accounts are kept in memory");
            Arc::new(MemoryUserStore::new())
        }
    };
    let users = web::Data::from(Arc::new(UserService::new(
        user_store,
        tokens.clone(),
        PasswordHasher::default(),
    )));

    log::info!("Starting user service at {}", config.server_url());

    HttpServer::new(move || {
        App::new()
            .app_data(users.clone())
            .app_data(routes::json_config())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::configure(tokens.clone()))
    })
    .bind((config.server_host.as_str(), config.user_service_port))
    .with_context(|| format!("failed to bind {}", config.server_url()))?
    .run()
    .await
    .context("user service failed")?;

    Ok(())
}
