//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Site;

/// Create a new post file named `YYYY-MM-DD-<slug>.md` in the pages directory
pub fn create_post(site: &Site, title: &str, path: Option<&str>) -> Result<PathBuf> {
    let now = chrono::Local::now();
    let date = now.format("%Y-%m-%d").to_string();

    fs::create_dir_all(&site.pages_dir)?;

    let filename = match path {
        Some(p) if p.ends_with(".md") => p.to_string(),
        Some(p) => format!("{}.md", p),
        None => format!("{}-{}.md", date, slug::slugify(title)),
    };
    let file_path = site.pages_dir.join(&filename);

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let title = title.replace('"', "\\\"");
    let content = format!(
        "---\ntitle: \"{}\"\ndate: {}\ntags: []\ncategory: \ndescription: \n---\n\n",
        title, date
    );
    fs::write(&file_path, content)?;

    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::IndexBuilder;
    use crate::content::Document;
    use tempfile::TempDir;

    #[test]
    fn test_create_post_is_indexable() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();

        let path = create_post(&site, "My New Post", None).unwrap();
        let file = path.file_name().unwrap().to_str().unwrap().to_string();
        assert!(file.ends_with("-my-new-post.md"));

        let content = fs::read_to_string(&path).unwrap();
        let posts = IndexBuilder::with_today("2000-01-01").build(&[Document::new(file, content)]);
        assert_eq!(posts[0].title, "My New Post");
        assert!(posts[0].tags.is_empty());
        assert_ne!(posts[0].date, "2000-01-01");
    }

    #[test]
    fn test_create_post_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();

        create_post(&site, "Twice", Some("twice")).unwrap();
        assert!(create_post(&site, "Twice", Some("twice.md")).is_err());
    }
}
