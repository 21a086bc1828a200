//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Folio;

/// Write `posts/<slug>.md` with a front-matter block and return its path
pub fn create_post(
    folio: &Folio,
    title: &str,
    tags: &[String],
    path: Option<&str>,
) -> Result<PathBuf> {
    let slug = match path {
        Some(p) => p.trim_end_matches(".md").to_string(),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    let file_path = folio.posts_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let now = chrono::Local::now();
    let mut content = format!("---\ntitle: {}\ndate: {}\n", title, now.format("%Y-%m-%d"));
    if !tags.is_empty() {
        content.push_str(&format!("tags: {}\n", tags.join(", ")));
    }
    content.push_str("---\n\n");

    fs::write(&file_path, content)?;
    tracing::debug!("Created post {:?}", file_path);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;

    #[test]
    fn test_create_post() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        let tags = vec!["rust".to_string(), "notes".to_string()];
        let path = create_post(&folio, "Hello, World!", &tags, None).unwrap();
        assert_eq!(path, dir.path().join("posts/hello-world.md"));

        let text = fs::read_to_string(&path).unwrap();
        let (fm, body) = FrontMatter::parse(&text);
        assert_eq!(fm.title(), Some("Hello, World!"));
        assert_eq!(fm.tags.as_deref(), Some(&tags[..]));
        assert!(fm.date().is_some());
        assert_eq!(body, "");

        assert!(create_post(&folio, "Hello, World!", &[], None).is_err());
    }

    #[test]
    fn test_create_post_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        let path = create_post(&folio, "Anything", &[], Some("2024/notes.md")).unwrap();
        assert_eq!(path, dir.path().join("posts/2024/notes.md"));
        let text = fs::read_to_string(&path).unwrap();
        assert!(!text.contains("tags:"));
    }
}
