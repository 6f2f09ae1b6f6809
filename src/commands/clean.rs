//! Clean the generated index

use anyhow::Result;
use std::fs;

use crate::Site;

/// Delete the serialized post index
pub fn run(site: &Site) -> Result<()> {
    let index_path = site.index_path();
    if index_path.exists() {
        fs::remove_file(&index_path)?;
        tracing::info!("Deleted: {:?}", index_path);
    } else {
        tracing::debug!("Nothing to clean at {:?}", index_path);
    }

    Ok(())
}
