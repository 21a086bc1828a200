//! Initialize a new blog

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG: &str = r#"# folio configuration

# Site
title: My Blog
description: ''
author: ''

# Directory
posts_dir: posts
pages_dir: pages
public_dir: public

# Listing
page_size: 6
default_view_mode: grid      # grid | list

# Routing
routing_style: fragment_path # fragment_path (#/posts/slug) | hash_flag (#post/file.md)
static_pages:
  - about

# Date format (strftime)
date_format: '%b %-d, %Y'
long_date_format: '%B %-d, %Y'

# Theme
default_theme: dark          # light | dark
storage_file: .folio/storage.json
theme_key: theme

# Rendering
sanitize: true
highlight:
  enable: true
  theme: base16-ocean.dark
  line_number: false

# Markdown files under posts_dir to load. Every .md file is loaded when empty.
post_files: []

# Static post table. When set, front-matter is not read at load time.
# posts:
#   - title: Welcome
#     date: 2024-01-15
#     file: welcome.md
#     tags: [welcome]
"#;

const ABOUT: &str = r#"---
title: About
---

# About

This blog is built with folio. Edit `pages/about.md` to change this page.
"#;

const STYLESHEET: &str = r#":root {
  --bg: #ffffff;
  --fg: #1f2328;
  --muted: #656d76;
  --accent: #0969da;
  --card: #f6f8fa;
  --border: #d0d7de;
}

[data-theme="dark"] {
  --bg: #0d1117;
  --fg: #e6edf3;
  --muted: #8d96a0;
  --accent: #4493f8;
  --card: #161b22;
  --border: #30363d;
}

body { margin: 0 auto; max-width: 60rem; padding: 0 1rem; background: var(--bg); color: var(--fg); font-family: system-ui, sans-serif; }
a { color: var(--accent); text-decoration: none; }
button { cursor: pointer; font: inherit; }

.site-header { display: flex; align-items: center; gap: 1rem; padding: 1rem 0; border-bottom: 1px solid var(--border); }
.site-nav { display: flex; gap: 1rem; flex: 1; }
.theme-toggle { background: none; border: 1px solid var(--border); border-radius: 6px; }
.site-footer { padding: 2rem 0; color: var(--muted); text-align: center; }

.tags-filter { display: flex; flex-wrap: wrap; gap: .5rem; margin: 1rem 0; }
.tag-btn, .view-toggle, .back-btn, .pagination-btn { padding: .25rem .75rem; border: 1px solid var(--border); border-radius: 6px; background: var(--card); color: var(--fg); }
.tag-btn.active, .pagination-btn.active { background: var(--accent); color: var(--bg); }

.posts-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(16rem, 1fr)); gap: 1rem; }
.posts-list { display: flex; flex-direction: column; gap: 1rem; }
.post-card { padding: 1rem; border: 1px solid var(--border); border-radius: 8px; background: var(--card); }
.post-card.list-view { display: flex; flex-direction: column; }
.post-date, .post-meta, .pagination-info { color: var(--muted); font-size: .9rem; }
.post-tag, .tag-item { margin-right: .5rem; font-size: .85rem; }
.tag-cloud { display: flex; flex-wrap: wrap; gap: .75rem; }

.pagination { display: flex; flex-wrap: wrap; align-items: center; gap: .5rem; margin: 2rem 0; }
.pagination-btn.disabled { opacity: .4; cursor: default; }
.pagination-info { width: 100%; }

.post-nav { display: flex; justify-content: space-between; margin-top: 2rem; }
.post-content pre { padding: 1rem; overflow-x: auto; border-radius: 6px; }
.no-posts, .not-found, .loading { padding: 3rem 0; text-align: center; color: var(--muted); }
"#;

/// Scaffold a blog in `target_dir`. Existing files are left untouched.
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("posts"))?;
    fs::create_dir_all(target_dir.join("pages"))?;
    fs::create_dir_all(target_dir.join("public/assets"))?;

    let today = chrono::Local::now().format("%Y-%m-%d");
    let welcome = format!(
        r#"---
title: Welcome to folio
date: {}
tags: welcome, blog
excerpt: Your very first post.
---

Welcome! This is your first post. Posts live in `posts/` as Markdown files
with an optional front-matter block.

## Quick Start

### Create a new post

```bash
$ folio new "My New Post" --tags rust,notes
```

### Preview the blog

```bash
$ folio server --open
```

### Switch the theme

```bash
$ folio theme toggle
```
"#,
        today
    );

    write_new(&target_dir.join("_config.yml"), CONFIG)?;
    write_new(&target_dir.join("posts/welcome.md"), &welcome)?;
    write_new(&target_dir.join("pages/about.md"), ABOUT)?;
    write_new(&target_dir.join("public/assets/style.css"), STYLESHEET)?;

    Ok(())
}

fn write_new(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        tracing::info!("Keeping existing {:?}", path);
        return Ok(());
    }
    fs::write(path, content)?;
    tracing::debug!("Created {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Folio;

    #[tokio::test]
    async fn test_init_produces_a_loadable_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        assert!(dir.path().join("public/assets/style.css").exists());

        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.config.page_size, 6);
        let store = folio.load_store(&folio.source()).await.unwrap();
        assert_eq!(store.len(), 1);
        let post = store.get("welcome").unwrap();
        assert_eq!(post.title, "Welcome to folio");
        assert_eq!(post.tags, vec!["welcome", "blog"]);
    }

    #[test]
    fn test_init_keeps_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_config.yml"), "title: Mine\n").unwrap();
        init_site(dir.path()).unwrap();

        let config = fs::read_to_string(dir.path().join("_config.yml")).unwrap();
        assert_eq!(config, "title: Mine\n");
    }
}
