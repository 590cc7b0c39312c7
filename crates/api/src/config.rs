//! Runtime configuration.
//!
//! Settings come from an optional TOML file layered under environment
//! variables prefixed `BIBLIOTEK__` (e.g. `BIBLIOTEK__DATABASE__URL`,
//! `BIBLIOTEK__JSONBIN__API_KEY`). Base URLs, credentials, and paths are
//! never hardcoded below this layer.

use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub file_store: FileStoreSettings,
    pub jsonbin: JsonBinSettings,
    #[serde(default)]
    pub open_library: OpenLibrarySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// PostgreSQL connection string.
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileStoreSettings {
    pub path: PathBuf,
}

impl Default for FileStoreSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("books.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonBinSettings {
    #[serde(default = "default_jsonbin_url")]
    pub base_url: String,
    pub bin_id: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenLibrarySettings {
    #[serde(default = "default_open_library_url")]
    pub base_url: String,
    #[serde(default = "default_covers_url")]
    pub covers_url: String,
}

impl Default for OpenLibrarySettings {
    fn default() -> Self {
        Self {
            base_url: default_open_library_url(),
            covers_url: default_covers_url(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_jsonbin_url() -> String {
    "https://api.jsonbin.io/v3".to_string()
}

fn default_open_library_url() -> String {
    "https://openlibrary.org".to_string()
}

fn default_covers_url() -> String {
    "https://covers.openlibrary.org/b".to_string()
}

impl Settings {
    /// Load settings from an optional file plus the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        builder
            .add_source(
                config::Environment::with_prefix("BIBLIOTEK")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}
