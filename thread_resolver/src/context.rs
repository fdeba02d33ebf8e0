use tokio_retry::{strategy::FixedInterval, RetryIf};

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use thread_core::{CacheRecord, Error, ItemType, ObjectCache, Result};
use twitter_client as client;
use twitter_client::{Status, User};

use crate::api::SocialApi;

pub const DEFAULT_RETRY_DELAY_MS: u64 = 500;
/// A transient failure is retried this many times before giving up.
pub const DEFAULT_RETRY_COUNT: usize = 1;

/// Everything a resolve needs: where records are cached and where they are fetched from.
#[derive(Clone)]
pub struct ThreadContext {
    cache: Arc<dyn ObjectCache>,
    api: Arc<dyn SocialApi>,
    retry_delay: Duration,
}

impl ThreadContext {
    pub fn new(cache: Arc<dyn ObjectCache>, api: Arc<dyn SocialApi>) -> Self {
        Self {
            cache,
            api,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn cache(&self) -> &dyn ObjectCache {
        self.cache.as_ref()
    }

    /// Get a status from the cache, or fetch and cache it on a miss.
    pub async fn get_status(&self, status_id: u64) -> Result<Status> {
        self.fetch_or_cache(status_id, || self.api.status(status_id)).await
    }

    /// Get a user from the cache, or fetch and cache it on a miss.
    pub async fn get_user(&self, user_id: u64) -> Result<User> {
        self.fetch_or_cache(user_id, || self.api.user(user_id)).await
    }

    /// Drop every cached record of one type. Clearing users makes names and avatars fetch again.
    pub fn clear_cache(&self, item_type: ItemType) -> Result<()> {
        self.cache.clear(item_type)?;
        tracing::info!("Cleared cached {} records", item_type);
        Ok(())
    }

    async fn fetch_or_cache<T, F, Fut>(&self, id: u64, fetch: F) -> Result<T>
    where
        T: CacheRecord,
        F: FnMut() -> Fut,
        Fut: Future<Output = client::Result<T>>,
    {
        if let Some(record) = self.cache.get_record::<T>(id)? {
            tracing::debug!("Cache hit for {} {}", T::ITEM_TYPE, id);
            return Ok(record);
        }

        tracing::info!("Making network request for {} {}", T::ITEM_TYPE, id);
        let strategy = FixedInterval::new(self.retry_delay).take(DEFAULT_RETRY_COUNT);
        let record = RetryIf::spawn(strategy, fetch, |e: &client::Error| {
            let transient = e.is_transient();
            if transient {
                tracing::warn!("Retrying {} {} after transient error: {}", T::ITEM_TYPE, id, e);
            }
            transient
        })
        .await
        .map_err(from_client_error)?;

        self.cache.put_record(&record)?;
        tracing::info!("Stored {} {} to cache", T::ITEM_TYPE, record.id());
        Ok(record)
    }
}

/// Not-found and rate-limit keep their own meaning; anything else stays a client error.
fn from_client_error(err: client::Error) -> Error {
    match err {
        client::Error::NotFound(what) => Error::ObjectNotFound(what),
        client::Error::RateLimit(what) => Error::RateLimit(what),
        err => anyhow::Error::from(err).into(),
    }
}
