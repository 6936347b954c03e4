/**
 * Blog Routes
 * Page handlers for listing, viewing, creating, editing and deleting posts
 */
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use crate::db::models::BlogPostDraft;
use crate::db::store::StoreError;
use crate::views;
use crate::AppState;

/// Form body for create and update. Field names keep the nested
/// `blog[...]` shape HTML forms submit; absent fields fall back to empty
/// strings, any string is accepted.
#[derive(Debug, Deserialize)]
pub struct BlogForm {
    #[serde(rename = "blog[title]", default)]
    pub title: String,
    #[serde(rename = "blog[image]", default)]
    pub image: String,
    #[serde(rename = "blog[body]", default)]
    pub body: String,
}

impl BlogForm {
    fn into_draft(self) -> BlogPostDraft {
        BlogPostDraft {
            title: self.title,
            image: self.image,
            body: self.body,
        }
    }
}

fn server_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Html(views::error_page())).into_response()
}

/// GET / - the blog lives at /blogs.
pub async fn home() -> Redirect {
    Redirect::to("/blogs")
}

/// GET /blogs - listing page.
pub async fn index(State(state): State<AppState>) -> Response {
    match state.store.list().await {
        Ok(posts) => Html(views::blog::index(&posts)).into_response(),
        Err(e) => {
            tracing::error!("failed to list blog posts: {}", e);
            server_error()
        }
    }
}

/// GET /blogs/new - blank creation form. No persistence access.
pub async fn new_form() -> Html<String> {
    Html(views::blog::new_form())
}

/// POST /blogs - create a post, then back to the listing. On a failed
/// write the blank form is rendered again; submitted values are not
/// preserved.
pub async fn create(State(state): State<AppState>, Form(form): Form<BlogForm>) -> Response {
    match state.store.create(form.into_draft()).await {
        Ok(post) => {
            tracing::info!(id = %post.id, "blog post created");
            Redirect::to("/blogs").into_response()
        }
        Err(e) => {
            tracing::error!("failed to create blog post: {}", e);
            Html(views::blog::new_form()).into_response()
        }
    }
}

/// GET /blogs/{id} - detail page. Unknown or malformed ids go back to the
/// listing.
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store.find(&id).await {
        Ok(post) => Html(views::blog::show(&post)).into_response(),
        Err(StoreError::NotFound | StoreError::InvalidId(_)) => {
            Redirect::to("/blogs").into_response()
        }
        Err(e) => {
            tracing::error!(id = %id, "failed to fetch blog post: {}", e);
            server_error()
        }
    }
}

/// GET /blogs/{id}/edit - edit form pre-populated with the post's fields.
pub async fn edit_form(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store.find(&id).await {
        Ok(post) => Html(views::blog::edit_form(&post)).into_response(),
        Err(StoreError::NotFound | StoreError::InvalidId(_)) => {
            Redirect::to("/blogs").into_response()
        }
        Err(e) => {
            tracing::error!(id = %id, "failed to fetch blog post for edit: {}", e);
            server_error()
        }
    }
}

/// PUT /blogs/{id} - overwrite the mutable fields, then on to the detail
/// page. Every failure, not-found included, lands on the listing.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BlogForm>,
) -> Redirect {
    match state.store.update(&id, form.into_draft()).await {
        Ok(()) => Redirect::to(&format!("/blogs/{}", id)),
        Err(e) => {
            if matches!(e, StoreError::Database(_)) {
                tracing::error!(id = %id, "failed to update blog post: {}", e);
            }
            Redirect::to("/blogs")
        }
    }
}

/// DELETE /blogs/{id} - remove the post and return to the listing, whether
/// or not anything was there to remove.
pub async fn destroy(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    match state.store.delete(&id).await {
        Ok(()) => {}
        Err(StoreError::NotFound | StoreError::InvalidId(_)) => {}
        Err(e) => {
            tracing::error!(id = %id, "failed to delete blog post: {}", e);
        }
    }
    Redirect::to("/blogs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_decodes_bracketed_field_names() {
        let form: BlogForm =
            serde_urlencoded::from_str("blog%5Btitle%5D=T&blog%5Bimage%5D=I&blog%5Bbody%5D=B")
                .unwrap();
        assert_eq!(form.title, "T");
        assert_eq!(form.image, "I");
        assert_eq!(form.body, "B");
    }

    #[test]
    fn test_form_missing_fields_default_to_empty() {
        let form: BlogForm = serde_urlencoded::from_str("blog%5Btitle%5D=Only+title").unwrap();
        assert_eq!(form.title, "Only title");
        assert_eq!(form.image, "");
        assert_eq!(form.body, "");
    }
}
