/*!
 * Views Module
 * Server-rendered HTML pages
 */

pub mod blog;

/// Escape text for HTML text and attribute positions.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Shared page shell. `content` is a trusted markup fragment built by the
/// page renderers; `title` is escaped here.
pub fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{} | BloopBlog</title>
</head>
<body>
  <header>
    <h1><a href="/blogs">BloopBlog</a></h1>
  </header>
  <main>
{}  </main>
</body>
</html>"#,
        escape_html(title),
        content,
    )
}

/// Opaque 500 page. Details stay in the logs.
pub fn error_page() -> String {
    layout(
        "Something went wrong",
        "    <h2>Something went wrong</h2>\n    <p>Please try again, or head back to <a href=\"/blogs\">the blog</a>.</p>\n",
    )
}
