//! Document and post summary models

use serde::{Deserialize, Serialize};

/// A raw markdown document from the pages directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// File name, unique within the source (e.g. `2024-01-15-hello.md`)
    pub file: String,

    /// Raw text, possibly starting with a byte-order mark
    pub content: String,
}

impl Document {
    pub fn new(file: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            content: content.into(),
        }
    }
}

/// A post as it appears in the serialized index
///
/// Field order is the order of the JSON objects in `posts.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    /// Source file name, the post's identity
    pub file: String,

    /// Post title (file name without `.md` when absent)
    pub title: String,

    /// Publication date as written in the front-matter
    pub date: String,

    /// Post tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Post category
    #[serde(default)]
    pub category: String,

    /// Short description from the front-matter
    #[serde(default)]
    pub description: String,

    /// Plain-text excerpt of the body
    #[serde(default)]
    pub excerpt: String,
}

impl PostSummary {
    /// Whether the post carries exactly this tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Get the previous (newer) post in an index
    pub fn prev<'a>(&self, posts: &'a [PostSummary]) -> Option<&'a PostSummary> {
        let pos = posts.iter().position(|p| p.file == self.file)?;
        if pos > 0 {
            Some(&posts[pos - 1])
        } else {
            None
        }
    }

    /// Get the next (older) post in an index
    pub fn next<'a>(&self, posts: &'a [PostSummary]) -> Option<&'a PostSummary> {
        let pos = posts.iter().position(|p| p.file == self.file)?;
        posts.get(pos + 1)
    }
}
