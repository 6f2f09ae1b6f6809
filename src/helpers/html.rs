//! HTML helper functions

/// Escape HTML special characters
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// User-visible error block for a post that could not be shown, with a
/// link back to the post list
///
/// # Examples
/// ```ignore
/// error_state("Post not found: a.md", "/index.html")
/// ```
pub fn error_state(message: &str, back_href: &str) -> String {
    format!(
        r#"<div class="error-state">
  <h2>Unable to load this post</h2>
  <p>{}</p>
  <a href="{}" class="post-nav-link"><span>&larr; Back to the list</span></a>
</div>"#,
        escape_html(message),
        escape_html(back_href)
    )
}

/// Tag chips for a post header
pub fn tag_list(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!(r#"<span class="post-tag">{}</span>"#, escape_html(tag)))
        .collect()
}
