//! Content loader - reads documents, the serialized index and single posts

use anyhow::Result;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use super::frontmatter::strip_bom;
use super::{Document, PostSummary};

/// Failure to load a document or the index
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("Invalid post file name: {0:?}")]
    InvalidFile(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to decode index: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Reads markdown documents from the top level of a directory
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    /// Create a source for the given pages directory
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load every markdown document. A missing directory is an empty source.
    pub fn documents(&self) -> Result<Vec<Document>> {
        if !self.dir.exists() {
            tracing::info!("Pages directory {:?} does not exist, using empty source", self.dir);
            return Ok(Vec::new());
        }

        let mut documents = Vec::new();

        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            let Some(file) = path.file_name().and_then(|n| n.to_str()) else {
                tracing::warn!("Skipping non UTF-8 file name {:?}", path);
                continue;
            };

            let bytes = match fs::read(path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!("Failed to read {:?}: {}", path, e);
                    continue;
                }
            };

            let content = match String::from_utf8(bytes) {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!("{:?} is not valid UTF-8, replacing bad bytes", path);
                    String::from_utf8_lossy(e.as_bytes()).into_owned()
                }
            };
            documents.push(Document::new(file, content));
        }

        tracing::debug!("Read {} documents from {:?}", documents.len(), self.dir);

        Ok(documents)
    }
}

/// Load the serialized index. Any failure degrades to an empty collection.
pub async fn load_index(path: &Path) -> Vec<PostSummary> {
    match try_load_index(path).await {
        Ok(posts) => posts,
        Err(e) => {
            tracing::error!("Failed to load posts from {:?}: {}", path, e);
            Vec::new()
        }
    }
}

/// Load the serialized index, surfacing the failure
pub async fn try_load_index(path: &Path) -> Result<Vec<PostSummary>, LoadError> {
    let content = tokio::fs::read_to_string(path).await?;
    let posts = serde_json::from_str(&content)?;
    Ok(posts)
}

/// Load the raw text of a single post from the content root
pub async fn load_document(root: &Path, file: &str) -> Result<String, LoadError> {
    if !is_plain_file_name(file) {
        return Err(LoadError::InvalidFile(file.to_string()));
    }

    let path = root.join(file);
    let text = match tokio::fs::read_to_string(&path).await {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(LoadError::NotFound(file.to_string()));
        }
        Err(e) => return Err(LoadError::Io(e)),
    };

    Ok(strip_bom(&text).to_string())
}

/// Check if a file name carries the markdown extension
pub fn is_markdown_file(path: &Path) -> bool {
    path.to_str().map(|p| p.ends_with(".md")).unwrap_or(false)
}

/// A single relative path component, so a post id can never leave the root
fn is_plain_file_name(file: &str) -> bool {
    let mut components = Path::new(file).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
