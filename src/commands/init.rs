//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::Site;

const DEFAULT_CONFIG: &str = r#"# postdeck configuration

# Site
title: Blog
description: ''
author: John Doe

# URL
root: /

# Directory
pages_dir: pages
public_dir: .
index_file: posts.json

# Search box
search:
  debounce_ms: 200

# Code highlighting on post pages
highlight:
  theme: base16-ocean.dark
  line_number: true

# Light/dark preference
theme:
  default: light
  store_file: .postdeck/theme.json
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("pages"))?;

    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        tracing::info!("Keeping existing {:?}", config_path);
    } else {
        fs::write(&config_path, DEFAULT_CONFIG)?;
    }

    // Create a sample post
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let sample_post = format!(
        r#"---
title: Hello World
date: {today}
tags: ["welcome"]
category: General
description: The first post on this blog
---

Welcome! Every markdown file in `pages/` becomes a post.

## Writing

Start a file with a `---` header holding `title`, `date`, `tags`,
`category` and `description`, then write the body in markdown.

```bash
$ postdeck new "My New Post"
$ postdeck build
```
"#
    );

    let sample_path = target_dir
        .join("pages")
        .join(format!("{}-hello-world.md", today));
    if !sample_path.exists() {
        fs::write(sample_path, sample_post)?;
    }

    Ok(())
}

/// Run the init command on an existing site
pub fn run(site: &Site) -> Result<()> {
    init_site(&site.base_dir)
}
