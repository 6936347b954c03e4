//! Blog store - CRUD operations against the `blogs` collection.
//!
//! All writes funnel through `sanitize_draft`, so no persisted free-text
//! field can carry executable markup regardless of which route wrote it.

use std::collections::HashSet;

use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database};
use thiserror::Error;

use crate::db::models::{BlogPost, BlogPostDraft};

const COLLECTION: &str = "blogs";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no blog post matches the given id")]
    NotFound,
    #[error("malformed blog post id: {0:?}")]
    InvalidId(String),
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

/// Handle on the blog collection. Cheap to clone; shared across requests
/// through the router state.
#[derive(Clone)]
pub struct BlogStore {
    posts: Collection<BlogPost>,
}

impl BlogStore {
    pub fn new(db: &Database) -> Self {
        Self {
            posts: db.collection(COLLECTION),
        }
    }

    /// All posts, in the collection's natural order. No ordering contract.
    pub async fn list(&self) -> Result<Vec<BlogPost>, StoreError> {
        let cursor = self.posts.find(doc! {}).await?;
        let posts: Vec<BlogPost> = cursor.try_collect().await?;
        Ok(posts)
    }

    /// Sanitize the draft, stamp id and creation time, and insert.
    pub async fn create(&self, draft: BlogPostDraft) -> Result<BlogPost, StoreError> {
        let draft = sanitize_draft(draft);
        let post = BlogPost {
            id: ObjectId::new(),
            title: draft.title,
            image: draft.image,
            body: draft.body,
            created: Utc::now(),
        };
        self.posts.insert_one(&post).await?;
        Ok(post)
    }

    pub async fn find(&self, id: &str) -> Result<BlogPost, StoreError> {
        let oid = parse_id(id)?;
        self.posts
            .find_one(doc! { "_id": oid })
            .await?
            .ok_or(StoreError::NotFound)
    }

    /// Overwrite the mutable fields of a post. `id` and `created` are left
    /// untouched.
    pub async fn update(&self, id: &str, draft: BlogPostDraft) -> Result<(), StoreError> {
        let oid = parse_id(id)?;
        let draft = sanitize_draft(draft);
        let result = self
            .posts
            .update_one(
                doc! { "_id": oid },
                doc! { "$set": {
                    "title": draft.title,
                    "image": draft.image,
                    "body": draft.body,
                } },
            )
            .await?;
        if result.matched_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Remove a post. Deleting an id with no matching document is a
    /// success: the caller cannot tell a late delete from a repeated one.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let oid = parse_id(id)?;
        self.posts.delete_one(doc! { "_id": oid }).await?;
        Ok(())
    }
}

fn parse_id(id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

/// The single sanitization point for every write path. Each field gets
/// the treatment its content calls for: `body` is an HTML fragment and
/// goes through `ammonia::clean`; `title` is plain text and `image` is a
/// URL, so neither may be entity-encoded here or the stored value would
/// no longer round-trip (the views escape text and attribute positions,
/// exactly once, at render).
pub(crate) fn sanitize_draft(draft: BlogPostDraft) -> BlogPostDraft {
    BlogPostDraft {
        title: strip_markup(&draft.title),
        image: sanitize_url(&draft.image),
        body: ammonia::clean(&draft.body),
    }
}

/// Strip tags (script and style bodies included) from plain text. The
/// cleaner emits entity-encoded HTML text, which would corrupt a stored
/// plain-text field, so its encoding is reversed. `&amp;` must be decoded
/// last or it would re-form the other entities.
fn strip_markup(text: &str) -> String {
    ammonia::Builder::default()
        .tags(HashSet::new())
        .clean(text)
        .to_string()
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// A valid URL never contains raw angle brackets or double quotes, so
/// dropping them leaves real URLs (query strings included) byte-for-byte
/// intact while removing anything that could open markup or break out of
/// an attribute.
fn sanitize_url(url: &str) -> String {
    url.trim()
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '"'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, image: &str, body: &str) -> BlogPostDraft {
        BlogPostDraft {
            title: title.to_string(),
            image: image.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_sanitize_strips_script_tags_and_content() {
        let clean = sanitize_draft(draft("T", "I", "<script>x</script>hello"));
        assert_eq!(clean.body, "hello");
        assert!(!clean.body.contains("script"));
    }

    #[test]
    fn test_sanitize_applies_to_every_field() {
        let clean = sanitize_draft(draft(
            "<script>a</script>Title",
            "https://x.test/a.jpg\"><script>y</script>",
            "<b>bold</b> stays",
        ));
        assert_eq!(clean.title, "Title");
        assert!(!clean.image.contains('<'));
        assert!(!clean.image.contains('"'));
        // harmless formatting survives in the one HTML field
        assert_eq!(clean.body, "<b>bold</b> stays");
    }

    #[test]
    fn test_sanitize_keeps_plain_text_unchanged() {
        let clean = sanitize_draft(draft("Plain title", "", "just words"));
        assert_eq!(clean.title, "Plain title");
        assert_eq!(clean.image, "");
        assert_eq!(clean.body, "just words");
    }

    #[test]
    fn test_sanitize_does_not_entity_encode_titles() {
        let clean = sanitize_draft(draft("a & b", "", ""));
        assert_eq!(clean.title, "a & b");
    }

    #[test]
    fn test_sanitize_keeps_query_string_urls_intact() {
        let url = "https://images.unsplash.com/photo-1440427810006?ixlib=rb-0.3.5&q=80&fm=jpg";
        let clean = sanitize_draft(draft("T", url, "B"));
        assert_eq!(clean.image, url);
    }

    #[test]
    fn test_parse_id_accepts_object_ids() {
        let oid = ObjectId::new();
        assert_eq!(parse_id(&oid.to_hex()).unwrap(), oid);
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        assert!(matches!(parse_id("nope"), Err(StoreError::InvalidId(_))));
        assert!(matches!(parse_id(""), Err(StoreError::InvalidId(_))));
    }
}
