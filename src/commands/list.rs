//! List site content

use anyhow::Result;

use crate::content::loader::DirectorySource;
use crate::generator::IndexBuilder;
use crate::helpers::{count_categories, count_tags};
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let documents = DirectorySource::new(&site.pages_dir).documents()?;
    let posts = IndexBuilder::new().build(&documents);

    match content_type {
        "post" | "posts" => {
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!("  {} - {} [{}]", post.date, post.title, post.file);
            }
        }
        "tag" | "tags" => {
            let tags = count_tags(&posts);
            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        "category" | "categories" => {
            let categories = count_categories(&posts);
            println!("Categories ({}):", categories.len());
            for (cat, count) in categories {
                println!("  {} ({})", cat, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, category",
                content_type
            );
        }
    }

    Ok(())
}
