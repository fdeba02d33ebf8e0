// In-memory social API used by the resolver tests.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use thread_core::MemoryCache;
use twitter_client::{Error, Result, Status, User};

use crate::api::SocialApi;
use crate::context::ThreadContext;

#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Transient,
    RateLimit,
}

#[derive(Default)]
pub struct FakeApi {
    statuses: HashMap<u64, Status>,
    users: HashMap<u64, User>,
    failures: Mutex<HashMap<u64, (Failure, usize)>>,
    status_calls: Mutex<HashMap<u64, usize>>,
    user_calls: Mutex<HashMap<u64, usize>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.statuses.insert(status.id, status);
        self
    }

    pub fn with_user(mut self, id: u64, screen_name: &str) -> Self {
        self.users.insert(id, user(id, screen_name));
        self
    }

    /// Make the next `times` lookups of a status fail.
    pub fn fail_status(&self, status_id: u64, failure: Failure, times: usize) {
        self.failures.lock().insert(status_id, (failure, times));
    }

    pub fn status_calls(&self, status_id: u64) -> usize {
        self.status_calls.lock().get(&status_id).copied().unwrap_or(0)
    }

    pub fn user_calls(&self, user_id: u64) -> usize {
        self.user_calls.lock().get(&user_id).copied().unwrap_or(0)
    }

    pub fn total_status_calls(&self) -> usize {
        self.status_calls.lock().values().sum()
    }
}

#[async_trait]
impl SocialApi for FakeApi {
    async fn status(&self, status_id: u64) -> Result<Status> {
        *self.status_calls.lock().entry(status_id).or_default() += 1;

        if let Some((failure, remaining)) = self.failures.lock().get_mut(&status_id) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(match failure {
                    Failure::Transient => Error::ConnectionError("connection reset by peer".to_string()),
                    Failure::RateLimit => Error::RateLimit("Rate limit exceeded".to_string()),
                });
            }
        }

        self.statuses
            .get(&status_id)
            .cloned()
            .ok_or(Error::NotFound(format!("status {}", status_id)))
    }

    async fn user(&self, user_id: u64) -> Result<User> {
        *self.user_calls.lock().entry(user_id).or_default() += 1;
        self.users
            .get(&user_id)
            .cloned()
            .ok_or(Error::NotFound(format!("user {}", user_id)))
    }
}

pub fn context(api: Arc<FakeApi>) -> ThreadContext {
    ThreadContext::new(Arc::new(MemoryCache::new()), api).with_retry_delay(Duration::ZERO)
}

pub fn user(id: u64, screen_name: &str) -> User {
    User {
        id,
        name: screen_name.to_uppercase(),
        screen_name: screen_name.to_string(),
        description: None,
        profile_image_url_https: None,
    }
}

pub fn status(id: u64, user_id: u64) -> Status {
    Status {
        id,
        created_at: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
        user_id,
        full_text: format!("status {}", id),
        in_reply_to_status_id: None,
        quoted_status_id: None,
        urls: Vec::new(),
        user_mentions: Vec::new(),
        media: Vec::new(),
    }
}

pub fn reply(id: u64, user_id: u64, parent: u64) -> Status {
    Status {
        in_reply_to_status_id: Some(parent),
        ..status(id, user_id)
    }
}

pub fn quote(id: u64, user_id: u64, quoted: u64) -> Status {
    Status {
        quoted_status_id: Some(quoted),
        ..status(id, user_id)
    }
}
