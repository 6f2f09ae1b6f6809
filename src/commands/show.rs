//! Render a single post to the terminal

use anyhow::Result;

use crate::content::page::load_post_page;
use crate::content::MarkdownRenderer;
use crate::Site;

/// Print a post's metadata and rendered HTML
///
/// Load failures are reported to the user, not returned as errors.
pub async fn run(site: &Site, file: Option<&str>) -> Result<()> {
    let renderer = MarkdownRenderer::from_config(&site.config.highlight);

    match load_post_page(&site.pages_dir, &renderer, file).await {
        Ok(page) => {
            println!("{}", page.title);
            if let Some(date) = &page.display_date {
                println!("{}", date);
            }
            if let Some(category) = &page.category {
                println!("Category: {}", category);
            }
            if !page.tags.is_empty() {
                println!("Tags: {}", page.tags.join(", "));
            }
            println!();
            println!("{}", page.html);
        }
        Err(e) => {
            tracing::debug!("Post page failed: {:?}", e);
            eprintln!("Unable to load this post: {}", e);
        }
    }

    Ok(())
}
