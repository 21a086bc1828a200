//! List site content

use anyhow::Result;

use crate::content::{ContentSource, FetchError, PostStore};
use crate::helpers::format_date;
use crate::Folio;

/// List site content by type
pub async fn run(folio: &Folio, content_type: &str) -> Result<()> {
    let source = folio.source();

    match content_type {
        "post" | "posts" => {
            let store = folio.load_store(&source).await?;
            print!("{}", posts(&store));
        }
        "tag" | "tags" => {
            let store = folio.load_store(&source).await?;
            print!("{}", tags(&store));
        }
        "page" | "pages" => {
            let files = match source.list(&folio.config.pages_dir) {
                Ok(files) => files,
                Err(FetchError::NotFound(_)) => Vec::new(),
                Err(e) => return Err(e.into()),
            };
            println!("Pages ({}):", folio.config.static_pages.len());
            for name in &folio.config.static_pages {
                let file = format!("{}.md", name);
                let status = if files.contains(&file) { "" } else { " (missing)" };
                println!("  {} [{}/{}]{}", name, folio.config.pages_dir, file, status);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, tag, page", content_type);
        }
    }

    Ok(())
}

fn posts(store: &PostStore) -> String {
    let mut out = format!("Posts ({}):\n", store.len());
    for post in store.posts() {
        let date = match post.date {
            Some(_) => format_date(post.date, "%Y-%m-%d"),
            None => "----------".to_string(),
        };
        let tags = if post.tags.is_empty() {
            String::new()
        } else {
            format!(" ({})", post.tags.join(", "))
        };
        out.push_str(&format!(
            "  {} - {} [{}]{}\n",
            date,
            post.title,
            post.expected_file(),
            tags
        ));
    }
    out
}

/// Tags by post count, most used first
fn tags(store: &PostStore) -> String {
    let mut counts = store.tag_counts();
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let mut out = format!("Tags ({}):\n", counts.len());
    for (tag, count) in counts {
        out.push_str(&format!("  {} ({})\n", tag, count));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Post;
    use chrono::NaiveDate;

    fn store() -> PostStore {
        let mut a = Post::new("a", "Alpha");
        a.date = NaiveDate::from_ymd_opt(2024, 3, 1);
        a.tags = vec!["rust".to_string(), "web".to_string()];
        let mut b = Post::new("b", "Beta");
        b.tags = vec!["rust".to_string()];
        PostStore::new(vec![b, a])
    }

    #[test]
    fn test_posts_listing() {
        let out = posts(&store());
        assert_eq!(
            out,
            "Posts (2):\n  2024-03-01 - Alpha [a.md] (rust, web)\n  ---------- - Beta [b.md] (rust)\n"
        );
    }

    #[test]
    fn test_tags_by_count() {
        let out = tags(&store());
        assert_eq!(out, "Tags (2):\n  rust (2)\n  web (1)\n");
    }
}
