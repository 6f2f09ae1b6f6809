//! Light/dark theme preference
//!
//! The preference is persisted through a [`ThemeStore`]. Storage is best
//! effort: when it cannot be read or written the manager keeps working on
//! its in-memory value. Every change is broadcast as a [`ThemeChange`] so
//! embedded widgets can follow along.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;
use tokio::sync::broadcast;

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => bail!("Unknown theme: {}. Available: light, dark", other),
        }
    }
}

/// Notification sent whenever the theme changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeChange {
    pub theme: Theme,
}

/// Where the preference is kept
pub trait ThemeStore {
    /// The saved theme, `None` when nothing was saved yet
    fn load(&self) -> Result<Option<Theme>>;
    fn save(&self, theme: Theme) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct SavedTheme {
    theme: Theme,
}

/// Preference stored as a small JSON file
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Result<Option<Theme>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let saved: SavedTheme = serde_json::from_str(&content)?;
        Ok(Some(saved.theme))
    }

    fn save(&self, theme: Theme) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string(&SavedTheme { theme })?)?;
        Ok(())
    }
}

/// Preference kept only for the life of the process
#[derive(Default)]
pub struct MemoryThemeStore {
    theme: Mutex<Option<Theme>>,
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Result<Option<Theme>> {
        Ok(*self.theme.lock().unwrap_or_else(|e| e.into_inner()))
    }

    fn save(&self, theme: Theme) -> Result<()> {
        *self.theme.lock().unwrap_or_else(|e| e.into_inner()) = Some(theme);
        Ok(())
    }
}

/// Resolves, changes and announces the current theme
pub struct ThemeManager<S: ThemeStore> {
    store: S,
    current: Theme,
    changes: broadcast::Sender<ThemeChange>,
}

impl<S: ThemeStore> ThemeManager<S> {
    /// Start from the saved theme, or `default` when there is none or the
    /// store is unavailable
    pub fn new(store: S, default: Theme) -> Self {
        let current = match store.load() {
            Ok(Some(theme)) => theme,
            Ok(None) => default,
            Err(e) => {
                tracing::warn!("Theme preference unavailable, using {}: {}", default, e);
                default
            }
        };
        let (changes, _) = broadcast::channel(16);

        Self {
            store,
            current,
            changes,
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Listen for theme changes
    pub fn subscribe(&self) -> broadcast::Receiver<ThemeChange> {
        self.changes.subscribe()
    }

    /// Switch theme, persist it if possible and notify listeners
    pub fn set(&mut self, theme: Theme) {
        self.current = theme;

        if let Err(e) = self.store.save(theme) {
            tracing::warn!("Failed to save theme preference: {}", e);
        }

        // No subscribers is fine
        let _ = self.changes.send(ThemeChange { theme });
    }

    pub fn toggle(&mut self) -> Theme {
        let next = self.current.toggled();
        self.set(next);
        next
    }
}
