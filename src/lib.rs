//! postdeck: a markdown content pipeline for static blogs
//!
//! The build step turns a directory of markdown documents with front-matter
//! into a single `posts.json` index. The runtime side loads that index to
//! filter and search posts, renders single posts on demand and keeps the
//! reader's theme preference.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod search;
pub mod server;
pub mod theme;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The main application, rooted at a site directory
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown documents directory
    pub pages_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Site {
    /// Create a new site from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a site with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let pages_dir = base_dir.join(&config.pages_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            pages_dir,
            public_dir,
        }
    }

    /// Path of the serialized post index
    pub fn index_path(&self) -> PathBuf {
        self.public_dir.join(&self.config.index_file)
    }

    /// Path of the saved theme preference
    pub fn theme_store_path(&self) -> PathBuf {
        self.base_dir.join(&self.config.theme.store_file)
    }

    /// Build the post index
    pub fn build(&self) -> Result<Vec<content::PostSummary>> {
        commands::build::run(self)
    }

    /// Remove the generated index
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
