//! Post model

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::frontmatter::{parse_date, FrontMatter};

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier, usually the file stem
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date (display and ordering only)
    pub date: Option<NaiveDate>,

    /// Post tags, without duplicates
    pub tags: Vec<String>,

    /// Short summary shown in listings
    pub excerpt: Option<String>,

    /// Inline markdown body. `None` means the body is fetched from `file`.
    pub content: Option<String>,

    /// Markdown file, relative to the posts directory
    pub file: Option<String>,

    /// Remaining front-matter fields
    #[serde(default)]
    pub extra: IndexMap<String, String>,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            date: None,
            tags: Vec::new(),
            excerpt: None,
            content: None,
            file: None,
            extra: IndexMap::new(),
        }
    }

    /// Build a post from a parsed markdown file
    pub fn from_markdown(file: &str, front_matter: FrontMatter, body: &str) -> Self {
        let slug = slug_from_file(file);
        let mut fields = front_matter.fields;

        let title = fields
            .shift_remove("title")
            .unwrap_or_else(|| slug.clone());
        let date = fields.shift_remove("date").as_deref().and_then(parse_date);
        let excerpt = fields.shift_remove("excerpt");
        fields.shift_remove("slug");

        Self {
            slug,
            title,
            date,
            tags: front_matter.tags.unwrap_or_default(),
            excerpt,
            content: Some(body.to_string()),
            file: Some(file.to_string()),
            extra: fields,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Path of the markdown file a reader is expected to create for this post
    pub fn expected_file(&self) -> String {
        self.file
            .clone()
            .unwrap_or_else(|| format!("{}.md", self.slug))
    }
}

/// One row of the static post table in `_config.yml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PostEntry {
    pub title: String,
    pub date: Option<String>,
    pub excerpt: Option<String>,
    pub file: Option<String>,
    pub slug: Option<String>,
    pub tags: Vec<String>,
    pub content: Option<String>,
}

impl PostEntry {
    /// Convert into a post. The slug comes from `slug`, then `file`, then the title.
    pub fn into_post(self) -> Post {
        let slug = self
            .slug
            .clone()
            .or_else(|| self.file.as_deref().map(slug_from_file))
            .unwrap_or_else(|| slug::slugify(&self.title));

        let mut tags: Vec<String> = Vec::new();
        for tag in self.tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
            if !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }

        let title = if self.title.trim().is_empty() {
            slug.clone()
        } else {
            self.title
        };

        Post {
            slug,
            title,
            date: self.date.as_deref().and_then(parse_date),
            tags,
            excerpt: self.excerpt,
            content: self.content,
            file: self.file,
            extra: IndexMap::new(),
        }
    }
}

/// Derive a slug from a file name: `2024/welcome.md` -> `welcome`
pub fn slug_from_file(file: &str) -> String {
    let name = file.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(file);
    name.strip_suffix(".markdown")
        .or_else(|| name.strip_suffix(".md"))
        .unwrap_or(name)
        .to_string()
}
