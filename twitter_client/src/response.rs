use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use crate::util::TwitterDate;

// Media

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Photo,
    Video,
    AnimatedGif,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Media {
    pub media_url_https: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub video_info: Option<VideoInfo>,
    #[serde(flatten)]
    pub url: UrlEntity,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct VideoInfo {
    pub aspect_ratio: (u32, u32),
    pub duration_millis: Option<u32>,
    pub variants: Vec<VideoVariant>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct VideoVariant {
    pub bitrate: Option<u32>,
    pub content_type: String,
    pub url: String,
}

// Other entities

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct UrlEntity {
    pub url: String,
    pub display_url: String,
    pub expanded_url: String,
    pub indices: (u32, u32),
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct MentionEntity {
    #[serde(rename = "id_str")]
    #[serde_as(as = "DisplayFromStr")]
    pub id: u64,
    pub screen_name: String,
    pub indices: (u32, u32),
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Entities {
    #[serde(default)]
    pub urls: Vec<UrlEntity>,
    #[serde(default)]
    pub user_mentions: Vec<MentionEntity>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ExtendedEntities {
    pub media: Vec<Media>,
}

// User

#[serde_as]
#[derive(Deserialize, Serialize, Debug)]
pub struct RawUser {
    #[serde(rename = "id_str")]
    #[serde_as(as = "DisplayFromStr")]
    pub id: u64,
    pub name: String,
    pub screen_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub profile_image_url_https: Option<String>,
}

// Status

/// With `trim_user` the embedded user only carries its id.
#[serde_as]
#[derive(Deserialize, Serialize, Debug)]
pub struct TrimmedUser {
    #[serde(rename = "id_str")]
    #[serde_as(as = "DisplayFromStr")]
    pub id: u64,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug)]
pub struct RawStatus {
    #[serde(rename = "id_str")]
    #[serde_as(as = "DisplayFromStr")]
    pub id: u64,
    #[serde_as(as = "TwitterDate")]
    pub created_at: DateTime<Utc>,
    #[serde(alias = "text")]
    pub full_text: String,
    pub user: TrimmedUser,
    #[serde(default)]
    pub in_reply_to_status_id: Option<u64>,
    #[serde(default)]
    pub quoted_status_id: Option<u64>,
    #[serde(default)]
    pub entities: Entities,
    pub extended_entities: Option<ExtendedEntities>,
}

// Errors

#[derive(Deserialize, Serialize, Debug)]
pub struct ApiErrorEntry {
    pub code: u32,
    pub message: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ErrorResponse {
    pub errors: Vec<ApiErrorEntry>,
}
