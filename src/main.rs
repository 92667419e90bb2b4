mod config;
mod db;
mod error;
mod models;
mod routes;
mod services;
mod state;
mod utils;

use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::{
    middleware::{Compress, Logger, NormalizePath},
    web, App, HttpServer,
};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::Config;
use crate::db::Database;
use crate::error::AppError;
use crate::state::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let log_level = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info".to_string())
        .parse()
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting HRmini employee service");

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;
    info!("Configuration loaded from environment");

    let db = Database::new(&config.database_url, config.database_max_connections).await?;
    info!("Database connected");

    db.run_migrations().await?;

    // Fail fast on a broken document; it is still re-read on every request
    match services::load_departments(&config.departments_path).await {
        Ok(departments) => info!(
            "Department configuration at {} lists {} departments",
            config.departments_path,
            departments.len()
        ),
        Err(e) => tracing::warn!("Department configuration not usable yet: {}", e),
    }

    let state = web::Data::new(AppState::new(config.clone(), db));

    let bind_addr = config.bind_addr();
    let cors_allow_origin = config.cors_allow_origin.clone();
    let static_dir = config.static_dir.clone();

    info!("Server running at http://{}", bind_addr);

    HttpServer::new(move || {
        let cors = if cors_allow_origin == "*" {
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600)
        } else {
            let mut cors = Cors::default();
            for origin in cors_allow_origin.split(',').map(|s| s.trim()) {
                cors = cors.allowed_origin(origin);
            }
            cors.allowed_methods(vec!["GET", "PATCH", "OPTIONS"])
                .allow_any_header()
                .max_age(3600)
        };

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(Compress::default())
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .route("/", web::get().to(serve_index))
            .configure(routes::create_routes)
            .service(Files::new("/static", &static_dir))
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    Ok(())
}

// Landing page
async fn serve_index(state: web::Data<AppState>) -> Result<NamedFile, AppError> {
    let path: PathBuf = [state.config.static_dir.as_str(), "index.html"].iter().collect();
    NamedFile::open(path).map_err(|_| AppError::NotFound("not found".to_string()))
}
