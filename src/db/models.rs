//! Stored document shapes for the blog collection.

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A persisted blog post. One document per post; `id` and `created` are
/// assigned at creation and never change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub image: String,
    pub body: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created: DateTime<Utc>,
}

/// Incoming field values for a create or update. Carries only the mutable
/// fields; the store stamps `id`/`created` and sanitizes the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPostDraft {
    pub title: String,
    pub image: String,
    pub body: String,
}
