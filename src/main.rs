use std::env;

use actix_files::Files;
use actix_web::cookie::Key;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use config::Config;
use dotenvy::dotenv;
use tera::Tera;

use mohar_catalog::models::config::ServerConfig;
use mohar_catalog::repository::http::HttpCatalogStore;
use mohar_catalog::repository::imgbb::ImgbbImageHost;
use mohar_catalog::routes::configure;

fn load_config() -> Result<ServerConfig, config::ConfigError> {
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
    Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(config::Environment::with_prefix("APP"))
        .build()?
        .try_deserialize()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let server_config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if server_config.secret.len() < 32 {
        log::error!("Secret must be at least 32 bytes long");
        std::process::exit(1);
    }
    let secret_key = Key::derive_from(server_config.secret.as_bytes());

    let tera = match Tera::new(&server_config.templates_glob()) {
        Ok(tera) => tera,
        Err(e) => {
            log::error!("Failed to load templates: {e}");
            std::process::exit(1);
        }
    };

    let client = reqwest::Client::new();
    let store = web::Data::new(HttpCatalogStore::new(
        client.clone(),
        &server_config.api_base_url,
    ));
    let images = web::Data::new(ImgbbImageHost::new(
        client,
        &server_config.image_upload_url,
        &server_config.image_api_key,
    ));

    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let bind_address = server_config.bind_address();
    let assets_dir = server_config.assets_dir.clone();
    let tera = web::Data::new(tera);
    let server_config = web::Data::new(server_config);

    log::info!(
        "Serving the catalog from {} on {}:{}",
        store.base_url(),
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(Logger::default())
            .service(Files::new("/assets", assets_dir.clone()))
            .app_data(tera.clone())
            .app_data(store.clone())
            .app_data(images.clone())
            .app_data(server_config.clone())
            .configure(configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
