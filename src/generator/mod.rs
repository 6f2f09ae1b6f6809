//! Index generator - turns markdown documents into the serialized post index
//!
//! The index is rebuilt wholesale on every run. Posts are ordered newest
//! first; posts whose dates tie (or do not parse) keep the reverse file-name
//! order they were pre-sorted into, which approximates newest-first for
//! date-prefixed file names.

use anyhow::Result;
use std::cmp::Reverse;
use std::fs;
use std::path::Path;

use crate::content::{excerpt, Document, FrontMatter, PostSummary};
use crate::helpers::{parse_date_string, today};

/// Builds [`PostSummary`] records from raw documents
pub struct IndexBuilder {
    /// Date given to posts without one
    today: String,
}

impl IndexBuilder {
    /// Create a builder that stamps undated posts with today's date
    pub fn new() -> Self {
        Self::with_today(today())
    }

    /// Create a builder with a fixed default date
    pub fn with_today(today: impl Into<String>) -> Self {
        Self {
            today: today.into(),
        }
    }

    /// Build the sorted index
    pub fn build(&self, documents: &[Document]) -> Vec<PostSummary> {
        let mut selected: Vec<&Document> = documents
            .iter()
            .filter(|doc| doc.file.ends_with(".md"))
            .collect();
        selected.sort_by(|a, b| b.file.cmp(&a.file));

        let mut posts: Vec<PostSummary> = selected
            .into_iter()
            .map(|doc| self.summarize(doc))
            .collect();

        // `None` orders below every date, even ones before 1970, so
        // unparseable dates land last. The sort is stable and keeps them in
        // pre-sort order.
        posts.sort_by_cached_key(|post| Reverse(parse_date_string(&post.date)));

        tracing::debug!("Indexed {} of {} documents", posts.len(), documents.len());

        posts
    }

    /// Apply front-matter defaults to a single document
    fn summarize(&self, doc: &Document) -> PostSummary {
        let (fm, body) = FrontMatter::parse(&doc.content);

        let title = non_empty(fm.title())
            .map(str::to_string)
            .unwrap_or_else(|| doc.file.replacen(".md", "", 1));

        let date = non_empty(fm.date())
            .map(str::to_string)
            .unwrap_or_else(|| self.today.clone());

        PostSummary {
            file: doc.file.clone(),
            title,
            date,
            tags: fm.tags().map(<[String]>::to_vec).unwrap_or_default(),
            category: fm.category().unwrap_or_default().to_string(),
            description: fm.description().unwrap_or_default().to_string(),
            excerpt: excerpt(body),
        }
    }
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Write the index as pretty-printed JSON, creating parent directories
pub fn write_index(path: &Path, posts: &[PostSummary]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(posts)?;
    fs::write(path, content)?;
    Ok(())
}

/// Read an index written by [`write_index`]
pub fn read_index(path: &Path) -> Result<Vec<PostSummary>> {
    let content = fs::read_to_string(path)?;
    let posts = serde_json::from_str(&content)?;
    Ok(posts)
}
