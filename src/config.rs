use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";
pub const DEFAULT_TITLE: &str = "Ask Google";
pub const DEFAULT_SUBTITLE: &str = "Your friendly Bot";
pub const DEFAULT_ENDPOINT: &str = "https://discoveryengine.googleapis.com";
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub app: AppConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

/// Display strings shown in the page header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub title: String,
    pub subtitle: String,
    /// Replaces the built-in page template when set.
    pub template_path: Option<String>,
}

/// Identifies the data store queried on every request. Fixed at deploy time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub project_id: String,
    pub location: String,
    pub data_store_id: String,
    pub endpoint: String,
    pub page_size: u32,
    /// Upper bound on pages fetched per query. `None` follows every page token.
    pub max_pages: Option<usize>,
    #[serde(skip_serializing)]
    pub access_token: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                workers: num_cpus::get(),
            },
            app: AppConfig {
                title: DEFAULT_TITLE.to_string(),
                subtitle: DEFAULT_SUBTITLE.to_string(),
                template_path: None,
            },
            search: SearchConfig {
                project_id: String::new(),
                location: "global".to_string(),
                data_store_id: String::new(),
                endpoint: DEFAULT_ENDPOINT.to_string(),
                page_size: DEFAULT_PAGE_SIZE,
                max_pages: None,
                access_token: String::new(),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let path = env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Config::from_file(&path)?;

        // Server configuration
        if let Ok(host) = env::var("HOST") {
            config.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            match port.parse() {
                Ok(port) => config.server.port = port,
                Err(e) => tracing::warn!(
                    "Ignoring PORT={:?} ({}); listening on {}",
                    port,
                    e,
                    config.server.port
                ),
            }
        }
        if let Ok(workers) = env::var("WORKERS") {
            config.server.workers = workers.parse()?;
        }

        if let Ok(template_path) = env::var("TEMPLATE_PATH") {
            config.app.template_path = Some(template_path);
        }

        // Search configuration
        if let Ok(project_id) = env::var("PROJECT_ID") {
            config.search.project_id = project_id;
        }
        if let Ok(location) = env::var("LOCATION") {
            config.search.location = location;
        }
        if let Ok(data_store_id) = env::var("DATA_STORE_ID") {
            config.search.data_store_id = data_store_id;
        }
        if let Ok(endpoint) = env::var("DISCOVERY_ENGINE_ENDPOINT") {
            config.search.endpoint = endpoint;
        }
        if let Ok(access_token) = env::var("GOOGLE_ACCESS_TOKEN") {
            config.search.access_token = access_token;
        }

        Ok(config)
    }

    /// Reads the YAML config file. The file itself is required, every key in it
    /// is optional.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::new(path, ::config::FileFormat::Yaml).required(true))
            .build()
            .with_context(|| format!("Failed to load configuration file: {}", path))?;

        let mut config = Config::default();

        if let Ok(title) = settings.get_string("app.title") {
            config.app.title = title;
        }
        if let Ok(subtitle) = settings.get_string("app.subtitle") {
            config.app.subtitle = subtitle;
        }
        if let Ok(template_path) = settings.get_string("app.template_path") {
            config.app.template_path = Some(template_path);
        }

        if let Ok(project_id) = settings.get_string("search.project_id") {
            config.search.project_id = project_id;
        }
        if let Ok(location) = settings.get_string("search.location") {
            config.search.location = location;
        }
        if let Ok(data_store_id) = settings.get_string("search.data_store_id") {
            config.search.data_store_id = data_store_id;
        }
        if let Ok(endpoint) = settings.get_string("search.endpoint") {
            config.search.endpoint = endpoint;
        }
        if let Ok(page_size) = settings.get_int("search.page_size") {
            config.search.page_size = u32::try_from(page_size)
                .with_context(|| format!("Invalid search.page_size: {}", page_size))?;
        }
        if let Ok(max_pages) = settings.get_int("search.max_pages") {
            config.search.max_pages = Some(
                usize::try_from(max_pages)
                    .with_context(|| format!("Invalid search.max_pages: {}", max_pages))?,
            );
        }

        Ok(config)
    }
}
