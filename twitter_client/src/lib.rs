mod consts;
mod error;
mod response;
mod result;
mod util;

use reqwest::{header, Client, Response, Url};
use serde::de::DeserializeOwned;

use consts::*;
use response::{RawStatus, RawUser};
pub use result::*;

pub use crate::error::{Error, Result};

use thread_util::build_params;

#[derive(Debug, Clone)]
pub struct TwitterClient {
    client: reqwest::Client,
}

impl TwitterClient {
    /// Create a client authenticating every request with an app-only bearer token.
    pub fn new(bearer_token: &str) -> Result<TwitterClient> {
        let bearer = format!("Bearer {}", bearer_token.trim());
        let mut authorization = header::HeaderValue::from_str(&bearer).map_err(|_| Error::InvalidToken)?;
        authorization.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, authorization);

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(TwitterClient { client })
    }

    pub async fn status_by_id(&self, status_id: u64) -> Result<Status> {
        let params = build_params! {
            required id => status_id,
            required tweet_mode => "extended",
            required include_entities => true,
            required trim_user => true,
        };
        let status: RawStatus = self.rest_get("/statuses/show.json", &params).await?;
        Ok(status.into())
    }

    pub async fn user_by_id(&self, user_id: u64) -> Result<User> {
        let params = build_params! {
            required user_id,
            required include_entities => false,
        };
        let user: RawUser = self.rest_get("/users/show.json", &params).await?;
        Ok(user.into())
    }
}

impl TwitterClient {
    async fn rest_get<R>(&self, path: &str, params: &[(&str, String)]) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = Url::parse_with_params(&format!("{}{}", REST_API, path), params)?;
        let target = url.to_string();
        tracing::debug!("GET {}", target);
        let response: Response = self.client.get(url).send().await.map_err(Error::from_send)?;

        let status = response.status();
        let status_error = response.error_for_status_ref().err();
        let content = response.text().await.map_err(Error::from_send)?;

        let name = path.strip_prefix('/').unwrap_or(path).replace(['/', '.'], "_");
        log(&name, &content).await?;
        if let Some(status_error) = status_error {
            tracing::warn!("Request to {} failed with {}", path, status);
            return Err(Error::from_response(status, &content, &target).unwrap_or(status_error.into()));
        }

        serde_json::from_str(&content).map_err(|e| e.into())
    }
}

async fn log(name: &str, content: &str) -> Result<()> {
    use std::path::PathBuf;
    use tokio::{fs::File, io::AsyncWriteExt};

    if let Ok(dir) = std::env::var("CLIENT_LOG_DIR") {
        let time = chrono::Local::now().format("%Y%m%d_%H%M%S%.3f");
        let filepath = PathBuf::from(dir).join(format!("twitter_{}_{}.json", name, time));
        let mut file = File::create(filepath).await?;
        file.write_all(content.as_bytes()).await?;
    }
    Ok(())
}
