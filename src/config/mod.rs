//! Configuration management
//!
//! Settings come from environment variables (`HOST`, `PORT`, `DEBUG`,
//! `SECRET_KEY`, `MAX_CALLS`, `MEDIA_FOLDER`, `CORS_ORIGINS`), with the
//! defaults below for anything unset.

use config::{ConfigError, Environment};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_SECRET_KEY: &str = "a_default_secret_key";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub board: BoardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    #[serde(skip_serializing)]
    pub secret_key: String,
    /// Allowed origins; `*` allows any
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Calls kept on the board, current one included
    pub max_calls: usize,
    pub media_folder: PathBuf,
}

/// Flat view matching the environment variable names
#[derive(Debug, Deserialize)]
struct EnvSettings {
    secret_key: String,
    host: String,
    port: u16,
    debug: bool,
    max_calls: usize,
    media_folder: PathBuf,
    cors_origins: Vec<String>,
}

impl Config {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(Environment::default())
    }

    /// Load from an explicit set of variables instead of the process environment
    pub fn from_vars(vars: config::Map<String, String>) -> Result<Self, ConfigError> {
        Self::load(Environment::default().source(Some(vars)))
    }

    fn load(env: Environment) -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let settings: EnvSettings = config::Config::builder()
            .set_default("secret_key", DEFAULT_SECRET_KEY)?
            .set_default("host", defaults.server.host)?
            .set_default("port", i64::from(defaults.server.port))?
            .set_default("debug", defaults.server.debug)?
            .set_default("max_calls", defaults.board.max_calls as i64)?
            .set_default(
                "media_folder",
                defaults.board.media_folder.to_string_lossy().into_owned(),
            )?
            .set_default("cors_origins", defaults.server.cors_origins)?
            .add_source(
                env.try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_origins"),
            )
            .build()?
            .try_deserialize()?;

        if settings.max_calls == 0 {
            return Err(ConfigError::Message(
                "MAX_CALLS must be at least 1".to_string(),
            ));
        }

        let cors_origins: Vec<String> = settings
            .cors_origins
            .into_iter()
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            server: ServerConfig {
                host: settings.host,
                port: settings.port,
                debug: settings.debug,
                secret_key: settings.secret_key,
                cors_origins,
            },
            board: BoardConfig {
                max_calls: settings.max_calls,
                media_folder: settings.media_folder,
            },
        })
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                debug: false,
                secret_key: DEFAULT_SECRET_KEY.to_string(),
                cors_origins: vec!["*".to_string()],
            },
            board: BoardConfig {
                max_calls: crate::domain::call::DEFAULT_MAX_CALLS,
                media_folder: PathBuf::from("static/media"),
            },
        }
    }
}
