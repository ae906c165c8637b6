// Post module
// The slice of a blog post record the publish-date control reads

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::utils::date::parse_post_date;

/// Publication status as reported by the posts API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Pending,
    Private,
    Publish,
    Future,
    Trash,
    /// Also absorbs statuses this editor does not know
    #[default]
    #[serde(other)]
    Draft,
}

impl PostStatus {
    pub const ALL: [PostStatus; 6] = [
        PostStatus::Draft,
        PostStatus::Pending,
        PostStatus::Private,
        PostStatus::Publish,
        PostStatus::Future,
        PostStatus::Trash,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Pending => "pending",
            PostStatus::Private => "private",
            PostStatus::Publish => "publish",
            PostStatus::Future => "future",
            PostStatus::Trash => "trash",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    #[serde(rename = "ID", alias = "id")]
    pub id: Option<i64>,
    pub title: String,
    pub status: PostStatus,
    /// Publish timestamp; `None` means "publish immediately"
    pub date: Option<String>,
    /// Last modification timestamp
    pub modified: Option<String>,
}

impl Post {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_modified(mut self, modified: impl Into<String>) -> Self {
        self.modified = Some(modified.into());
        self
    }

    /// Read a post record exported from the posts API
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read post from {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("failed to deserialize post from {}", path.display()))
    }

    /// Parsed publish date; absent or malformed values read as `None`
    pub fn publish_date(&self) -> Option<DateTime<Local>> {
        self.date.as_deref().and_then(parse_or_log)
    }

    pub fn modified_date(&self) -> Option<DateTime<Local>> {
        self.modified.as_deref().and_then(parse_or_log)
    }
}

fn parse_or_log(raw: &str) -> Option<DateTime<Local>> {
    match parse_post_date(raw) {
        Ok(date) => Some(date),
        Err(err) => {
            log::debug!("Ignoring post timestamp: {}", err);
            None
        }
    }
}
