use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Kind assigned to drafts created from scratch.
const DEFAULT_NEWS_KIND: &str = "promotion";

/// Accepts `status` as either a JSON boolean or the strings `"true"`/`"false"`.
fn status_from_wire<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Flag(bool),
        Text(String),
    }
    Ok(match Wire::deserialize(deserializer)? {
        Wire::Flag(flag) => flag.to_string(),
        Wire::Text(text) => text,
    })
}

fn default_status() -> String {
    "true".to_string()
}

fn default_kind() -> String {
    DEFAULT_NEWS_KIND.to_string()
}

/// A news/promotion entry as returned by the admin API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default, rename = "sub_title", alias = "subtitle")]
    pub subtitle: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub meta: String,
    #[serde(default, rename = "is_external_link")]
    pub is_external_link: bool,
    #[serde(default = "default_kind", rename = "type")]
    pub kind: String,
    #[serde(default = "default_status", deserialize_with = "status_from_wire")]
    pub status: String,
    #[serde(default, rename = "start_date")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Whether saving a draft creates a new item or updates an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveAction {
    Create,
    Update(String),
}

/// Editable form state for a news item.
///
/// `status` travels as the string `"true"` or `"false"`. `start_date` is
/// stamped with the save time by [`NewsDraft::stamped`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsDraft {
    #[serde(skip)]
    pub id: Option<String>,
    pub title: String,
    #[serde(rename = "sub_title")]
    pub subtitle: String,
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub meta: String,
    #[serde(default)]
    pub is_external_link: bool,
    #[serde(default = "default_kind", rename = "type")]
    pub kind: String,
    #[serde(default = "default_status", deserialize_with = "status_from_wire")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
}

impl Default for NewsDraft {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            subtitle: String::new(),
            link: String::new(),
            image: None,
            meta: String::new(),
            is_external_link: false,
            kind: default_kind(),
            status: default_status(),
            start_date: None,
        }
    }
}

impl NewsDraft {
    /// Draft pre-filled from an existing item, for editing.
    #[must_use]
    pub fn from_item(item: &NewsItem) -> Self {
        Self {
            id: Some(item.id.clone()),
            title: item.title.clone(),
            subtitle: item.subtitle.clone(),
            link: item.link.clone(),
            image: item.image.clone(),
            meta: item.meta.clone(),
            is_external_link: item.is_external_link,
            kind: item.kind.clone(),
            status: item.status.clone(),
            start_date: item.start_date,
        }
    }

    /// Checks the required fields in form order: title, subtitle, link.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingField`] for the first blank field.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::MissingField("title"));
        }
        if self.subtitle.trim().is_empty() {
            return Err(CoreError::MissingField("subtitle"));
        }
        if self.link.trim().is_empty() {
            return Err(CoreError::MissingField("link"));
        }
        Ok(())
    }

    #[must_use]
    pub fn save_action(&self) -> SaveAction {
        match self.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => SaveAction::Update(id.to_string()),
            _ => SaveAction::Create,
        }
    }

    /// Copy with surrounding whitespace removed, as sent to the API.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            id: self.id.clone(),
            title: self.title.trim().to_string(),
            subtitle: self.subtitle.trim().to_string(),
            link: self.link.trim().to_string(),
            image: self
                .image
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned),
            meta: self.meta.trim().to_string(),
            is_external_link: self.is_external_link,
            kind: match self.kind.trim() {
                "" => default_kind(),
                kind => kind.to_string(),
            },
            status: self.status.trim().to_string(),
            start_date: self.start_date,
        }
    }

    /// Trimmed copy with `start_date` set to `now`, as sent on every save.
    #[must_use]
    pub fn stamped(&self, now: DateTime<Utc>) -> Self {
        Self {
            start_date: Some(now),
            ..self.trimmed()
        }
    }
}
