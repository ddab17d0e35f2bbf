use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;

use hairnow::{
    admin,
    config::Config,
    customer,
    database::{build_pool, DatabaseStore},
    state::AppState,
    storage::KvStorage,
};

const JSON_LIMIT: usize = 8 * 1024 * 1024;

fn build_state(config: &Config) -> anyhow::Result<AppState> {
    match &config.database_url {
        Some(database_url) => {
            let store = DatabaseStore::new(build_pool(database_url)?);
            store
                .ensure_schema()
                .context("Failed to prepare the kv_entries table")?;
            log::info!("storing data in MySQL");
            let storage = KvStorage::with_daily_limit(store, config.daily_limit);
            Ok(AppState::new(Arc::new(storage), config))
        }
        None => {
            log::warn!("DATABASE_URL not set, data is kept in memory only");
            Ok(AppState::in_memory(config))
        }
    }
}

async fn run() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    let state = build_state(&config)?;

    log::info!(
        "listening on {} (at most {} reservations per day)",
        config.bind_addr,
        config.daily_limit
    );
    HttpServer::new(move || {
        App::new()
            .data(state.clone())
            // reviews may carry encoded images
            .app_data(web::JsonConfig::default().limit(JSON_LIMIT))
            .wrap(middleware::Logger::default())
            // customer
            .service(web::scope("/customer").configure(customer::config))
            // administrator
            .service(web::scope("/admin").configure(admin::config))
    })
    .bind(&config.bind_addr)
    .with_context(|| format!("Failed to bind {}", config.bind_addr))?
    .run()
    .await?;
    Ok(())
}

#[actix_web::main]
async fn main() {
    if let Err(err) = run().await {
        log::error!("{:#}", err);
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}
