//! Show or change the saved theme preference

use anyhow::Result;

use crate::theme::{FileThemeStore, Theme, ThemeManager};
use crate::Site;

/// Open the site's theme manager
pub fn manager(site: &Site) -> ThemeManager<FileThemeStore> {
    let default = site.config.theme.default.parse().unwrap_or_else(|e| {
        tracing::warn!("{}; using light", e);
        Theme::Light
    });
    ThemeManager::new(FileThemeStore::new(site.theme_store_path()), default)
}

/// `action` is one of light, dark or toggle. Without one the current theme is printed.
pub fn run(site: &Site, action: Option<&str>) -> Result<Theme> {
    let mut manager = manager(site);

    match action {
        None => {}
        Some("toggle") => {
            manager.toggle();
        }
        Some(name) => manager.set(name.parse()?),
    }

    println!("{}", manager.current());
    Ok(manager.current())
}
