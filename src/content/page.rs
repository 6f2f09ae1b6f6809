//! Single post page, addressed by the `file` query parameter

use serde::Serialize;
use std::path::Path;
use thiserror::Error;

use super::loader::{load_document, LoadError};
use super::{FrontMatter, MarkdownRenderer};
use crate::helpers::display_date;

/// Why a post page could not be shown
#[derive(Error, Debug)]
pub enum PageError {
    #[error("No post file was specified.")]
    MissingFile,

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Render error: {0}")]
    Render(String),
}

/// Everything the post view needs
#[derive(Debug, Clone, Serialize)]
pub struct PostPage {
    pub file: String,
    pub title: String,
    /// Raw front-matter date
    pub date: Option<String>,
    /// Human readable date, e.g. "January 15, 2024"
    pub display_date: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    /// Rendered body
    pub html: String,
}

/// Load, parse and render one post
pub async fn load_post_page(
    root: &Path,
    renderer: &MarkdownRenderer,
    file: Option<&str>,
) -> Result<PostPage, PageError> {
    let file = match file.map(str::trim) {
        Some(f) if !f.is_empty() => f,
        _ => return Err(PageError::MissingFile),
    };

    let raw = load_document(root, file).await?;
    let (fm, body) = FrontMatter::parse(&raw);

    let html = renderer
        .render(body)
        .map_err(|e| PageError::Render(e.to_string()))?;

    Ok(PostPage {
        file: file.to_string(),
        title: fm.title().unwrap_or("Untitled").to_string(),
        date: fm.date().map(str::to_string),
        display_date: fm.date().map(display_date),
        category: fm.category().filter(|c| !c.is_empty()).map(str::to_string),
        tags: fm.tags().map(<[String]>::to_vec).unwrap_or_default(),
        html,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_post_page() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("hello.md"),
            "---\ntitle: Hello\ndate: 2024-01-15\ncategory: dev\ntags: [\"rust\"]\n---\n# Heading\n\nBody text.",
        )
        .unwrap();

        let renderer = MarkdownRenderer::new();
        let page = load_post_page(dir.path(), &renderer, Some("hello.md"))
            .await
            .unwrap();

        assert_eq!(page.title, "Hello");
        assert_eq!(page.display_date.as_deref(), Some("January 15, 2024"));
        assert_eq!(page.category.as_deref(), Some("dev"));
        assert_eq!(page.tags, vec!["rust"]);
        assert!(page.html.contains("<p>Body text.</p>"));
    }

    #[tokio::test]
    async fn test_untitled_post() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bare.md"), "Just words.").unwrap();

        let page = load_post_page(dir.path(), &MarkdownRenderer::new(), Some("bare.md"))
            .await
            .unwrap();
        assert_eq!(page.title, "Untitled");
        assert!(page.date.is_none());
        assert!(page.tags.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_parameter() {
        let dir = TempDir::new().unwrap();
        let renderer = MarkdownRenderer::new();

        for file in [None, Some(""), Some("   ")] {
            let err = load_post_page(dir.path(), &renderer, file).await.unwrap_err();
            assert!(matches!(err, PageError::MissingFile));
        }
    }

    #[tokio::test]
    async fn test_missing_post_is_load_error() {
        let dir = TempDir::new().unwrap();
        let err = load_post_page(dir.path(), &MarkdownRenderer::new(), Some("gone.md"))
            .await
            .unwrap_err();
        assert!(matches!(err, PageError::Load(LoadError::NotFound(_))));
        assert_eq!(err.to_string(), "Post not found: gone.md");
    }
}
