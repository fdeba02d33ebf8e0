use anyhow::{bail, Context};

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_CACHE_DIR: &str = "cache";
pub const DEFAULT_WKHTMLTOPDF: &str = "wkhtmltopdf";

/// Where fetched objects are kept, chosen by `CACHE_BACKEND`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheBackend {
    /// `CACHE_BACKEND=file`, the default. Records live under `CACHE_DIR`.
    File(PathBuf),
    /// `CACHE_BACKEND=database`, an SQLite database at `DATABASE_URL`.
    Database(String),
    /// `CACHE_BACKEND=memory`, lost on restart.
    Memory,
}

#[derive(Clone)]
pub struct Config {
    pub server_address: SocketAddr,
    pub bearer_token: String,
    pub cache: CacheBackend,
    pub wkhtmltopdf_path: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| get(key).with_context(|| format!("{} must be set", key));

        let server_address = required("SERVER_ADDRESS")?
            .parse()
            .context("SERVER_ADDRESS must be a socket address like 127.0.0.1:5000")?;
        let bearer_token = required("TWITTER_BEARER_TOKEN")?;

        let cache = match get("CACHE_BACKEND").as_deref().unwrap_or("file") {
            "file" => CacheBackend::File(get("CACHE_DIR").unwrap_or(DEFAULT_CACHE_DIR.to_string()).into()),
            "database" => CacheBackend::Database(required("DATABASE_URL")?),
            "memory" => CacheBackend::Memory,
            other => bail!("Unknown CACHE_BACKEND `{}`, expected file, database or memory", other),
        };

        let wkhtmltopdf_path = get("WKHTMLTOPDF_PATH")
            .unwrap_or(DEFAULT_WKHTMLTOPDF.to_string())
            .into();

        Ok(Config {
            server_address,
            bearer_token,
            cache,
            wkhtmltopdf_path,
        })
    }
}
