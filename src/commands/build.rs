//! Build the post index

use anyhow::Result;
use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;
use std::fs;
use std::time::{Duration, Instant};

use crate::content::loader::DirectorySource;
use crate::content::PostSummary;
use crate::generator::{write_index, IndexBuilder};
use crate::Site;

/// Rebuild the index from the pages directory and write it out
pub fn run(site: &Site) -> Result<Vec<PostSummary>> {
    let start = Instant::now();

    let documents = DirectorySource::new(&site.pages_dir).documents()?;
    let posts = IndexBuilder::new().build(&documents);

    let index_path = site.index_path();
    write_index(&index_path, &posts)?;

    tracing::info!(
        "Generated {:?} with {} posts in {:.2}s",
        index_path,
        posts.len(),
        start.elapsed().as_secs_f64()
    );

    Ok(posts)
}

/// Watch the pages directory and config, rebuilding on every change
///
/// Blocks the calling thread. `on_rebuilt` receives each fresh index.
pub fn watch<F>(site: &Site, mut on_rebuilt: F) -> Result<()>
where
    F: FnMut(Vec<PostSummary>),
{
    let (tx, rx) = std::sync::mpsc::channel();

    // Create debouncer to avoid multiple rapid rebuilds
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if !site.pages_dir.exists() {
        fs::create_dir_all(&site.pages_dir)?;
        tracing::info!("Created {:?}", site.pages_dir);
    }
    debouncer
        .watcher()
        .watch(&site.pages_dir, RecursiveMode::NonRecursive)?;
    tracing::debug!("Watching: {:?}", site.pages_dir);

    let config_path = site.base_dir.join("_config.yml");
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events.iter().any(|e| {
                    let path = e.path.to_string_lossy();
                    path.ends_with(".md") || path.ends_with("_config.yml")
                });
                if !relevant {
                    continue;
                }

                tracing::info!("Content changed, rebuilding index...");
                match run(site) {
                    Ok(posts) => on_rebuilt(posts),
                    Err(e) => tracing::error!("Index build failed: {}", e),
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}
