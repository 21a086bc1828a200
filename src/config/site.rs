//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::content::PostEntry;
use crate::router::RoutingStyle;
use crate::state::ViewMode;
use crate::theme::Theme;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,

    // Directory
    pub posts_dir: String,
    pub pages_dir: String,
    pub public_dir: String,

    // Listing
    pub page_size: usize,
    pub default_view_mode: ViewMode,

    // Routing
    pub routing_style: RoutingStyle,
    pub static_pages: Vec<String>,

    // Date format (chrono strftime)
    pub date_format: String,
    pub long_date_format: String,

    // Theme
    pub default_theme: Theme,
    pub storage_file: String,
    pub theme_key: String,

    // Rendering
    pub sanitize: bool,
    #[serde(default)]
    pub highlight: HighlightConfig,

    /// Markdown files to load, relative to `posts_dir`. Scanned when empty.
    #[serde(default)]
    pub post_files: Vec<String>,

    /// Static post table. Takes precedence over markdown front-matter when set.
    #[serde(default)]
    pub posts: Vec<PostEntry>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            description: String::new(),
            author: String::new(),

            posts_dir: "posts".to_string(),
            pages_dir: "pages".to_string(),
            public_dir: "public".to_string(),

            page_size: 6,
            default_view_mode: ViewMode::Grid,

            routing_style: RoutingStyle::FragmentPath,
            static_pages: vec!["about".to_string()],

            date_format: "%b %-d, %Y".to_string(),
            long_date_format: "%B %-d, %Y".to_string(),

            default_theme: Theme::Dark,
            storage_file: ".folio/storage.json".to_string(),
            theme_key: "theme".to_string(),

            sanitize: true,
            highlight: HighlightConfig::default(),

            post_files: Vec::new(),
            posts: Vec::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let mut config: SiteConfig = serde_yaml::from_str(&content)?;
        if config.page_size == 0 {
            tracing::warn!("page_size must be at least 1, using default");
            config.page_size = SiteConfig::default().page_size;
        }
        Ok(config)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}
