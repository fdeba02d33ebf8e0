use async_trait::async_trait;

use twitter_client::{Result, Status, TwitterClient, User};

/// The two lookups the resolver needs from the social network.
#[async_trait]
pub trait SocialApi: Send + Sync {
    async fn status(&self, status_id: u64) -> Result<Status>;
    async fn user(&self, user_id: u64) -> Result<User>;
}

#[async_trait]
impl SocialApi for TwitterClient {
    async fn status(&self, status_id: u64) -> Result<Status> {
        self.status_by_id(status_id).await
    }

    async fn user(&self, user_id: u64) -> Result<User> {
        self.user_by_id(user_id).await
    }
}
