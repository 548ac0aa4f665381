//! Configuration for the spread server

use pdf_spread::{SpreadError, SpreadOptions};
use std::env;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
/// Largest accepted request body, base64 overhead included
pub const DEFAULT_BODY_LIMIT: usize = 50 * 1024 * 1024;
pub const DEFAULT_DOWNLOAD_NAME: &str = "wrapped_bleed_spread.pdf";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidVar { name: &'static str, value: String },

    #[error("Failed to load spread options: {0}")]
    Options(#[from] SpreadError),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub body_limit_bytes: usize,
    /// Filename suggested in the Content-Disposition of every result
    pub download_filename: String,
    /// Geometry and pairing table used when a request does not bring its own
    pub options: SpreadOptions,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            body_limit_bytes: DEFAULT_BODY_LIMIT,
            download_filename: DEFAULT_DOWNLOAD_NAME.to_string(),
            options: SpreadOptions::default(),
        }
    }
}

impl ServerConfig {
    /// Read `SPREAD_*` variables, loading `.env` first when present.
    ///
    /// `SPREAD_OPTIONS` names a JSON file holding a full `SpreadOptions`.
    pub async fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = ServerConfig::default();
        if let Ok(host) = env::var("SPREAD_HOST") {
            config.host = host;
        }
        if let Ok(port) = env::var("SPREAD_PORT") {
            config.port = port.parse().map_err(|_| ConfigError::InvalidVar {
                name: "SPREAD_PORT",
                value: port.clone(),
            })?;
        }
        if let Ok(name) = env::var("SPREAD_DOWNLOAD_NAME") {
            if name.trim().is_empty() || name.contains(['"', '\r', '\n']) {
                return Err(ConfigError::InvalidVar {
                    name: "SPREAD_DOWNLOAD_NAME",
                    value: name,
                });
            }
            config.download_filename = name;
        }
        if let Ok(path) = env::var("SPREAD_OPTIONS") {
            config.options = SpreadOptions::load(&path).await?;
            tracing::info!("Loaded spread options from {}", path);
        }

        Ok(config)
    }

    pub fn with_options(mut self, options: SpreadOptions) -> Self {
        self.options = options;
        self
    }

    pub fn content_disposition(&self) -> String {
        format!("attachment; filename={}", self.download_filename)
    }
}
