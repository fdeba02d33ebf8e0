// Shared fixtures for handler tests.

use async_trait::async_trait;
use std::sync::Arc;

use thread_core::{MemoryCache, ObjectCache};
use thread_resolver::{SocialApi, ThreadContext};
use twitter_client::{Status, User};

use crate::{pdf::PdfRenderer, state::AppState};

pub const USER: &str = r#"{"id":1,"name":"Alice","screen_name":"alice","description":null,"profile_image_url_https":null}"#;
pub const ROOT: &str = r#"{"id":10,"created_at":"Wed Oct 10 20:19:24 +0000 2018","user_id":1,"full_text":"root",
    "in_reply_to_status_id":null,"quoted_status_id":null,"urls":[],"user_mentions":[],"media":[]}"#;

/// Serves nothing; every page must come from the cache.
pub struct Offline;

#[async_trait]
impl SocialApi for Offline {
    async fn status(&self, status_id: u64) -> twitter_client::Result<Status> {
        Err(twitter_client::Error::NotFound(format!("status {}", status_id)))
    }

    async fn user(&self, user_id: u64) -> twitter_client::Result<User> {
        Err(twitter_client::Error::NotFound(format!("user {}", user_id)))
    }
}

pub fn app_state(records: &[&str]) -> AppState {
    let cache: Arc<dyn ObjectCache> = Arc::new(MemoryCache::new());
    for record in records {
        if let Ok(status) = serde_json::from_str::<Status>(record) {
            cache.put_record(&status).unwrap();
        } else {
            let user: User = serde_json::from_str(record).unwrap();
            cache.put_record(&user).unwrap();
        }
    }
    AppState {
        context: ThreadContext::new(cache, Arc::new(Offline)),
        pdf: PdfRenderer::new("/nonexistent/wkhtmltopdf"),
    }
}
