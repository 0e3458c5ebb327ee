//! Application settings, read from an optional `settings.toml` and from
//! `AUTOVENTAS_*` environment variables.
//!
//! ```toml
//! [app]
//! level = "debug"
//!
//! [server]
//! bind = "0.0.0.0"
//! port = 8000
//! database = { sqlite = "autoventas.db" }
//! ```
//!
//! Nested keys are separated by `__` in the environment, e.g.
//! `AUTOVENTAS_SERVER__PORT=9000`.
use clap::Parser;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "settings";
const ENV_PREFIX: &str = "AUTOVENTAS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
    /// Any URL sea-orm can connect to.
    Url(String),
}

impl Database {
    pub fn url(&self) -> String {
        match self {
            Database::Memory => String::from("sqlite::memory:"),
            Database::Sqlite(path) => format!("sqlite:{path}?mode=rwc"),
            Database::Url(url) => url.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: None,
            port: 8000,
            database: Database::Memory,
        }
    }
}

impl Server {
    pub fn address(&self) -> String {
        let bind = self.bind.as_deref().unwrap_or("127.0.0.1");
        format!("{}:{}", bind, self.port)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

#[derive(Debug, Parser)]
#[command(name = "autoventas", version)]
struct Args {
    /// Settings file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the log level.
    #[arg(long)]
    level: Option<String>,
    /// Override the listening port.
    #[arg(long)]
    port: Option<u16>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();

        let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let builder = Config::builder()
            .add_source(File::with_name(config_path).required(args.config.is_some()))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        let mut settings = Self::from_builder(builder)?;

        if let Some(level) = args.level {
            settings.app.level = level;
        }
        if let Some(port) = args.port {
            settings.server.port = port;
        }

        Ok(settings)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}
