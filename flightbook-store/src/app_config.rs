use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Connection string for the Postgres backend. Its absence is a fatal
    /// startup condition.
    pub fn require_url(&self) -> Result<&str, config::ConfigError> {
        self.url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                config::ConfigError::Message(
                    "database.url is not set (use DATABASE_URL or FLIGHTBOOK_DATABASE__URL)".to_string(),
                )
            })
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .set_default("server.port", 4000)?
            .set_default("database.backend", "postgres")?
            .set_default("database.max_connections", 5)?
            .set_default("database.acquire_timeout_secs", 3)?
            // Optional files: config/default, then config/{RUN_MODE}, then an
            // unversioned config/local
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `FLIGHTBOOK_SERVER__PORT=8080`
            .add_source(
                config::Environment::with_prefix("FLIGHTBOOK")
                    .prefix_separator("_")
                    .separator("__"),
            )
            // Conventional names used by hosting platforms
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?
            .set_override_option("server.port", env::var("PORT").ok())?
            .build()?;

        s.try_deserialize()
    }
}
