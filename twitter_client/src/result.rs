use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::response::{RawStatus, RawUser};
use crate::util::TwitterDate;

pub use crate::response::{Media, MediaKind, MentionEntity, UrlEntity, VideoInfo, VideoVariant};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub screen_name: String,
    pub description: Option<String>,
    pub profile_image_url_https: Option<String>,
}

/// A single status, flattened from the REST representation.
/// Only the author's id is kept; the author itself is fetched separately.
#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Status {
    pub id: u64,
    #[serde_as(as = "TwitterDate")]
    pub created_at: DateTime<Utc>,
    pub user_id: u64,
    pub full_text: String,
    pub in_reply_to_status_id: Option<u64>,
    pub quoted_status_id: Option<u64>,
    pub urls: Vec<UrlEntity>,
    pub user_mentions: Vec<MentionEntity>,
    pub media: Vec<Media>,
}

// MARK: Helpers

impl Status {
    /// Link to the status on the web.
    pub fn link(&self, screen_name: &str) -> String {
        format!("https://twitter.com/{}/status/{}", screen_name, self.id)
    }
}

impl User {
    pub fn link(&self) -> String {
        format!("https://twitter.com/{}", self.screen_name)
    }
}

impl Media {
    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }

    pub fn variants(&self) -> &[VideoVariant] {
        self.video_info.as_ref().map(|v| v.variants.as_slice()).unwrap_or_default()
    }
}

// MARK: Conversions

impl From<RawUser> for User {
    fn from(user: RawUser) -> Self {
        User {
            id: user.id,
            name: user.name,
            screen_name: user.screen_name,
            description: user.description,
            profile_image_url_https: user.profile_image_url_https,
        }
    }
}

impl From<RawStatus> for Status {
    fn from(status: RawStatus) -> Self {
        Status {
            id: status.id,
            created_at: status.created_at,
            user_id: status.user.id,
            full_text: status.full_text,
            in_reply_to_status_id: status.in_reply_to_status_id,
            quoted_status_id: status.quoted_status_id,
            urls: status.entities.urls,
            user_mentions: status.entities.user_mentions,
            media: status.extended_entities.map(|e| e.media).unwrap_or_default(),
        }
    }
}
