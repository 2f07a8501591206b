use std::path::Path;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use config::Config;
use dotenvy::dotenv;

use beer_inventory::bootstrap::load_seed_data;
use beer_inventory::db::{establish_connection_pool, run_migrations};
use beer_inventory::models::config::{ServerConfig, StorageKind};
use beer_inventory::repository::{DieselRepository, InventoryRepository, MemoryRepository};
use beer_inventory::routes::configure;

fn load_config() -> Result<ServerConfig, config::ConfigError> {
    let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "default".to_string());

    Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

async fn serve<R: InventoryRepository>(repo: R, server_config: &ServerConfig) -> std::io::Result<()> {
    if server_config.seed_data {
        let csv_path = server_config.beer_csv_path.as_deref().map(Path::new);
        if let Err(e) = load_seed_data(&repo, csv_path) {
            log::error!("Failed to load seed data: {e}");
            std::process::exit(1);
        }
    }

    let repo = web::Data::new(repo);
    let address = (server_config.address.clone(), server_config.port);
    log::info!("Listening on {}:{}", address.0, address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(repo.clone())
            .configure(configure::<R>)
    })
    .bind(address)?
    .run()
    .await
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = match load_config() {
        Ok(server_config) => server_config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    match server_config.storage {
        StorageKind::Sqlite => {
            let pool = match establish_connection_pool(&server_config.database_url) {
                Ok(pool) => pool,
                Err(e) => {
                    log::error!("Failed to establish database connection: {e}");
                    std::process::exit(1);
                }
            };
            if let Err(e) = run_migrations(&pool) {
                log::error!("{e}");
                std::process::exit(1);
            }
            serve(DieselRepository::new(pool), &server_config).await
        }
        StorageKind::Memory => {
            log::warn!("Using in-memory storage; data is lost on shutdown");
            serve(MemoryRepository::new(), &server_config).await
        }
    }
}
