// Response and request types for the site backend.
//
// Fields use `#[serde(default)]` liberally: the backend omits nullable
// columns rather than sending `null`. Records are returned to callers
// exactly as decoded; derived views live in `yogi-core`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::photos::decode_photos;
use crate::serde_helpers;

// ── Services & projects ─────────────────────────────────────────────

/// A category of offering. Read-only from the client side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "icon")]
    pub icon_ref: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// A showcase project belonging to exactly one [`Service`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub service_id: i64,
    pub name: String,
    #[serde(default, rename = "video")]
    pub video_ref: Option<String>,
    /// JSON-encoded array of photo references, kept as sent.
    #[serde(default, deserialize_with = "serde_helpers::json_text")]
    pub photos: Option<String>,
    #[serde(default, rename = "thumbnail")]
    pub thumbnail_ref: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::opt_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Decoded photo references. Undecodable text yields an empty list.
    pub fn photo_list(&self) -> Vec<String> {
        match self.photos.as_deref() {
            Some(raw) => decode_photos(raw).unwrap_or_else(|e| {
                tracing::debug!(project_id = self.id, error = %e, "photos not decodable, treating as empty");
                Vec::new()
            }),
            None => Vec::new(),
        }
    }

    pub fn has_video(&self) -> bool {
        present(self.video_ref.as_deref())
    }

    pub fn has_photos(&self) -> bool {
        !self.photo_list().is_empty()
    }

    pub fn has_thumbnail(&self) -> bool {
        present(self.thumbnail_ref.as_deref())
    }
}

fn present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

// ── Blog ────────────────────────────────────────────────────────────

/// A blog post. `slug` is the public identifier, `id` the admin one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub slug: String,
    #[serde(default, deserialize_with = "serde_helpers::null_default")]
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::null_default")]
    pub author_name: String,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub banner_image: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::string_list")]
    pub images: Vec<String>,
    #[serde(default)]
    pub reading_time: Option<u32>,
    #[serde(default)]
    pub word_count: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::opt_timestamp")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "serde_helpers::null_default")]
    pub views_count: u64,
    #[serde(default, deserialize_with = "serde_helpers::null_default")]
    pub likes_count: u64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::string_list")]
    pub tags: Vec<String>,
    /// `1` for featured posts, `0` otherwise.
    #[serde(default, deserialize_with = "serde_helpers::flag")]
    pub is_featured: u8,
}

impl Blog {
    pub fn is_featured(&self) -> bool {
        self.is_featured == 1
    }
}

/// Pagination block attached to list and search responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default, alias = "totalPages")]
    pub total_pages: Option<u32>,
    /// Anything else the backend reports (`hasMore`, etc.).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `{ data, pagination }` envelope returned by list and search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPage {
    pub data: Vec<Blog>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl BlogPage {
    /// `true` when the backend reports more posts than this page holds.
    pub fn is_truncated(&self) -> bool {
        self.pagination
            .as_ref()
            .and_then(|p| p.total)
            .is_some_and(|total| total > u64::try_from(self.data.len()).unwrap_or(u64::MAX))
    }
}

// ── Contact ─────────────────────────────────────────────────────────

/// Contact form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    #[serde(default, deserialize_with = "serde_helpers::null_default")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
