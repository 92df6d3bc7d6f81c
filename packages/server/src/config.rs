//! Server configuration from environment variables.

use std::path::PathBuf;

use ewaste_bins::DEFAULT_REGISTRY_PATH;
use ewaste_classifier::DEFAULT_MODEL_PATH;

/// Startup configuration, read once before the server binds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind (`BIND_ADDR`, default `127.0.0.1`).
    pub bind_addr: String,
    /// Port to bind (`PORT`, default `8080`).
    pub port: u16,
    /// Bin registry artifact (`BIN_REGISTRY_PATH`).
    pub registry_path: PathBuf,
    /// Text model artifact (`TEXT_MODEL_PATH`).
    pub model_path: PathBuf,
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup, using
    /// defaults for anything missing or unparsable.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port: u16 = match lookup("PORT") {
            Some(p) => p.parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid PORT '{p}'");
                8080
            }),
            None => 8080,
        };

        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            registry_path: lookup("BIN_REGISTRY_PATH")
                .unwrap_or_else(|| DEFAULT_REGISTRY_PATH.to_string())
                .into(),
            model_path: lookup("TEXT_MODEL_PATH")
                .unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string())
                .into(),
        }
    }
}
