//! folio: a small Markdown blog with hash routing, tag filtering and theming
//!
//! Posts are loaded once into an ordered [`content::PostStore`]; the
//! [`app::BlogApp`] controller turns navigation events into rendered views.
//! A preview server and a CLI drive it.

pub mod app;
pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod render;
pub mod router;
pub mod server;
pub mod state;
pub mod theme;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{ContentSource, FetchError, FsSource, PostStore};
use theme::{FileStorage, ThemeController};

/// A blog site on disk
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown posts
    pub posts_dir: PathBuf,
    /// Static page markdown
    pub pages_dir: PathBuf,
    /// Static assets served as-is
    pub public_dir: PathBuf,
}

impl Folio {
    /// Open a site directory, using defaults when `_config.yml` is absent
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir);
            config::SiteConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);
        let pages_dir = base_dir.join(&config.pages_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
            pages_dir,
            public_dir,
        })
    }

    /// Content source rooted at the site directory
    pub fn source(&self) -> FsSource {
        FsSource::new(&self.base_dir)
    }

    /// Preference storage file
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.base_dir.join(&self.config.storage_file))
    }

    /// Theme controller over the site's preference storage
    pub fn theme(&self) -> ThemeController {
        ThemeController::load(
            Box::new(self.storage()),
            &self.config.theme_key,
            self.config.default_theme,
        )
    }

    /// Load the posts: the static table when configured, otherwise the
    /// listed markdown files, otherwise every markdown file under `posts_dir`.
    pub async fn load_store<S: ContentSource>(&self, source: &S) -> Result<PostStore> {
        if !self.config.posts.is_empty() {
            return Ok(PostStore::from_table(self.config.posts.clone()));
        }

        let files = if self.config.post_files.is_empty() {
            match source.list(&self.config.posts_dir) {
                Ok(files) => files,
                Err(FetchError::NotFound(dir)) => {
                    tracing::warn!("Posts directory {:?} does not exist", dir);
                    Vec::new()
                }
                Err(e) => return Err(e.into()),
            }
        } else {
            self.config.post_files.clone()
        };

        Ok(PostStore::load(source, &self.config.posts_dir, &files).await)
    }

    /// Controller with posts loaded and the stored theme applied
    pub async fn app(&self) -> Result<app::BlogApp> {
        let store = self.load_store(&self.source()).await?;
        Ok(app::BlogApp::new(self.config.clone(), store, self.theme()))
    }
}
