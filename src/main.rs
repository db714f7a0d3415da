mod config;
mod handlers;
mod models;
mod routes;
mod services;
mod utils;

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use handlers::not_found;
use routes::pages;
use services::{DiscoveryEngineClient, SearchService};
use utils::{HtmlRenderer, PageRenderer};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub search_service: SearchService,
    pub renderer: Arc<dyn PageRenderer>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    if config.search.project_id.is_empty() || config.search.data_store_id.is_empty() {
        warn!("search.project_id or search.data_store_id is empty; searches will be rejected upstream");
    }
    if config.search.access_token.trim().is_empty() {
        warn!("GOOGLE_ACCESS_TOKEN is not set; requests will be sent unauthenticated");
    }

    let renderer = match load_renderer(config.app.template_path.as_deref()) {
        Ok(renderer) => renderer,
        Err(e) => {
            error!("Failed to load page template: {:#}", e);
            std::process::exit(1);
        }
    };

    let backend = Arc::new(DiscoveryEngineClient::new(&config.search));
    let state = AppState {
        search_service: SearchService::new(backend, config.search.clone()),
        renderer: Arc::new(renderer),
        config: config.clone(),
    };

    info!(
        "Starting {} on port {} (data store {} in {})",
        config.app.title, config.server.port, config.search.data_store_id, config.search.location
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .service(pages::config())
            .default_service(web::route().to(not_found))
    })
    .bind(format!("{}:{}", config.server.host, config.server.port))?;

    info!(
        "Server started successfully at http://{}:{}",
        config.server.host, config.server.port
    );

    server.workers(config.server.workers).run().await
}

fn load_renderer(template_path: Option<&str>) -> anyhow::Result<HtmlRenderer> {
    let Some(path) = template_path else {
        return Ok(HtmlRenderer::default());
    };

    let template = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read template file: {}", path))?;
    info!("Using page template {}", path);
    Ok(HtmlRenderer::from_template(template)?)
}
