//! Blog page renderers.
//!
//! `body` is stored as a sanitized HTML fragment and embeds as markup;
//! `title` and `image` are stored as plain text and entity-escaped here,
//! exactly once, where they land in text or attribute positions.

use chrono::{DateTime, Utc};

use crate::db::models::BlogPost;
use crate::views::{escape_html, layout};

fn display_date(dt: &DateTime<Utc>) -> String {
    dt.format("%B %-d, %Y").to_string()
}

/// `<img>` element for a post, or nothing when no image was supplied.
fn image_tag(post: &BlogPost) -> String {
    if post.image.is_empty() {
        String::new()
    } else {
        format!(
            "      <img src=\"{}\" alt=\"{}\">\n",
            escape_html(&post.image),
            escape_html(&post.title),
        )
    }
}

/// GET /blogs - every post, newest or oldest first as the store returns
/// them.
pub fn index(posts: &[BlogPost]) -> String {
    let mut entries = String::new();
    for post in posts {
        entries.push_str(&format!(
            "    <article>\n      <h2><a href=\"/blogs/{id}\">{title}</a></h2>\n{image}      <time>{created}</time>\n      <div>{body}</div>\n    </article>\n",
            id = post.id.to_hex(),
            title = escape_html(&post.title),
            image = image_tag(post),
            created = display_date(&post.created),
            body = post.body,
        ));
    }

    let content = format!(
        "    <p><a href=\"/blogs/new\">Write a new post</a></p>\n{}",
        entries,
    );
    layout("All posts", &content)
}

/// GET /blogs/{id} - one post in full, with edit and delete controls.
pub fn show(post: &BlogPost) -> String {
    let id = post.id.to_hex();
    let content = format!(
        "    <article>\n      <h2>{title}</h2>\n{image}      <time>{created}</time>\n      <div>{body}</div>\n    </article>\n    <p>\n      <a href=\"/blogs/{id}/edit\">Edit</a>\n      <a href=\"/blogs\">Back to all posts</a>\n    </p>\n    <form action=\"/blogs/{id}?_method=DELETE\" method=\"POST\">\n      <button type=\"submit\">Delete</button>\n    </form>\n",
        title = escape_html(&post.title),
        image = image_tag(post),
        created = display_date(&post.created),
        body = post.body,
        id = id,
    );
    layout(&post.title, &content)
}

fn form_fields(title: &str, image: &str, body: &str) -> String {
    format!(
        "      <label>Title <input type=\"text\" name=\"blog[title]\" value=\"{}\"></label>\n      <label>Image <input type=\"text\" name=\"blog[image]\" value=\"{}\"></label>\n      <label>Body <textarea name=\"blog[body]\">{}</textarea></label>\n",
        escape_html(title),
        escape_html(image),
        escape_html(body),
    )
}

/// GET /blogs/new - blank creation form.
pub fn new_form() -> String {
    let content = format!(
        "    <h2>New post</h2>\n    <form action=\"/blogs\" method=\"POST\">\n{}      <button type=\"submit\">Create</button>\n    </form>\n",
        form_fields("", "", ""),
    );
    layout("New post", &content)
}

/// GET /blogs/{id}/edit - form pre-populated with the post's fields.
pub fn edit_form(post: &BlogPost) -> String {
    let content = format!(
        "    <h2>Edit post</h2>\n    <form action=\"/blogs/{}?_method=PUT\" method=\"POST\">\n{}      <button type=\"submit\">Update</button>\n    </form>\n",
        post.id.to_hex(),
        form_fields(&post.title, &post.image, &post.body),
    );
    layout("Edit post", &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    fn post(title: &str, image: &str, body: &str) -> BlogPost {
        BlogPost {
            id: ObjectId::new(),
            title: title.to_string(),
            image: image.to_string(),
            body: body.to_string(),
            created: Utc::now(),
        }
    }

    #[test]
    fn test_index_lists_every_post() {
        let posts = vec![post("First", "", "<p>one</p>"), post("Second", "", "two")];
        let page = index(&posts);
        assert!(page.contains("First"));
        assert!(page.contains("Second"));
        assert!(page.contains(&format!("/blogs/{}", posts[0].id.to_hex())));
        assert!(page.contains("<p>one</p>"));
    }

    #[test]
    fn test_index_escapes_titles() {
        let posts = vec![post("a & b", "", "")];
        assert!(index(&posts).contains("a &amp; b"));
    }

    #[test]
    fn test_stored_fields_are_encoded_exactly_once() {
        // Drive the write-path sanitizer into the renderers: ampersands
        // in a title or image URL must come out encoded once, never as
        // &amp;amp;.
        use crate::db::models::BlogPostDraft;
        use crate::db::store::sanitize_draft;

        let url = "https://images.unsplash.com/photo-1440427810006?ixlib=rb-0.3.5&q=80&fm=jpg";
        let clean = sanitize_draft(BlogPostDraft {
            title: "a & b".to_string(),
            image: url.to_string(),
            body: "<script>x</script>hello".to_string(),
        });
        let stored = post(&clean.title, &clean.image, &clean.body);

        for page in [index(std::slice::from_ref(&stored)), show(&stored)] {
            assert!(page.contains("a &amp; b"));
            assert!(page.contains(
                "src=\"https://images.unsplash.com/photo-1440427810006?ixlib=rb-0.3.5&amp;q=80&amp;fm=jpg\""
            ));
            assert!(page.contains("hello"));
            assert!(!page.contains("&amp;amp;"));
        }

        // the edit form's attribute values decode back to the stored text
        let form = edit_form(&stored);
        assert!(form.contains("value=\"a &amp; b\""));
        assert!(!form.contains("&amp;amp;"));
    }

    #[test]
    fn test_empty_image_renders_no_img_element() {
        let with = post("T", "https://example.com/x.jpg", "");
        let without = post("T", "", "");
        assert!(show(&with).contains("<img src=\"https://example.com/x.jpg\""));
        assert!(!show(&without).contains("<img"));
    }

    #[test]
    fn test_show_has_edit_and_delete_controls() {
        let p = post("T", "", "body");
        let page = show(&p);
        let id = p.id.to_hex();
        assert!(page.contains(&format!("/blogs/{}/edit", id)));
        assert!(page.contains(&format!("/blogs/{}?_method=DELETE", id)));
    }

    #[test]
    fn test_new_form_posts_to_blogs() {
        let page = new_form();
        assert!(page.contains("action=\"/blogs\" method=\"POST\""));
        assert!(page.contains("name=\"blog[title]\""));
        assert!(page.contains("name=\"blog[image]\""));
        assert!(page.contains("name=\"blog[body]\""));
    }

    #[test]
    fn test_edit_form_is_prepopulated_and_overrides_to_put() {
        let p = post("My \"title\"", "img.png", "text");
        let page = edit_form(&p);
        assert!(page.contains(&format!("/blogs/{}?_method=PUT", p.id.to_hex())));
        assert!(page.contains("value=\"My &quot;title&quot;\""));
        assert!(page.contains("value=\"img.png\""));
        assert!(page.contains(">text</textarea>"));
    }
}
