use std::sync::Arc;

use thread_core::cache::ConnectionOptions;
use thread_core::{DatabaseCache, FileCache, MemoryCache, ObjectCache};
use thread_resolver::ThreadContext;
use twitter_client::TwitterClient;

use crate::config::{CacheBackend, Config};
use crate::pdf::PdfRenderer;

pub const DATABASE_POOL_SIZE: u32 = 16;

#[derive(Clone)]
pub struct AppState {
    /// Cache and API client shared by every request
    pub context: ThreadContext,
    pub pdf: PdfRenderer,
}

impl AppState {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let cache = open_cache(&config.cache)?;
        let client = TwitterClient::new(&config.bearer_token)?;
        Ok(AppState {
            context: ThreadContext::new(cache, Arc::new(client)),
            pdf: PdfRenderer::new(&config.wkhtmltopdf_path),
        })
    }
}

fn open_cache(backend: &CacheBackend) -> anyhow::Result<Arc<dyn ObjectCache>> {
    let cache: Arc<dyn ObjectCache> = match backend {
        CacheBackend::File(root) => {
            tracing::info!("Using file cache at {}", root.display());
            Arc::new(FileCache::new(root.clone()))
        }
        CacheBackend::Database(url) => {
            tracing::info!("Using database cache at {}", url);
            Arc::new(DatabaseCache::open(url, DATABASE_POOL_SIZE, ConnectionOptions::default())?)
        }
        CacheBackend::Memory => {
            tracing::info!("Using in-memory cache");
            Arc::new(MemoryCache::new())
        }
    };
    Ok(cache)
}
