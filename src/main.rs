mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::io;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::Config,
    database::{MongoDB, MongoProfileStore},
    middleware::DeliveryAuth,
    services::{delivery_auth::DeliveryVerifier, ProfileInitializer, ProfileStore},
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    log::info!("🚀 Starting Profile Initializer...");
    log::info!("📊 Profiles collection: {}", config.profiles_collection);

    // Conexão única com o MongoDB, compartilhada por todos os workers
    let db = MongoDB::new(&config.database_url)
        .await
        .map_err(|e| io::Error::other(format!("Failed to connect to MongoDB: {}", e)))?;

    log::info!("✅ MongoDB connected successfully");

    let store: Arc<dyn ProfileStore> = Arc::new(MongoProfileStore::new(db, &config.profiles_collection));
    let initializer = web::Data::new(ProfileInitializer::new(store));

    let auth = match &config.webhook {
        Some(webhook) => {
            log::info!("🔐 Event deliveries require a token from issuer '{}'", webhook.issuer);
            DeliveryAuth::new(Some(DeliveryVerifier::new(webhook)))
        }
        None => {
            log::warn!("⚠️  EVENT_WEBHOOK_SECRET not set: event deliveries are not authenticated");
            DeliveryAuth::disabled()
        }
    };

    let host = config.host.clone();
    let port = config.port;

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📨 Events endpoint: http://{}:{}/api/v1/events/user-created", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);

    HttpServer::new(move || {
        let openapi = api::swagger::ApiDoc::openapi();
        let auth = auth.clone();

        App::new()
            .app_data(initializer.clone())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(move |cfg| api::configure(cfg, auth))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
