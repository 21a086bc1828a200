//! Content sources - where markdown text is fetched from

use std::collections::HashMap;
use std::future::Future;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

/// Errors raised while fetching content
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A place markdown files can be fetched from by relative path
pub trait ContentSource: Send + Sync {
    /// Fetch the text of a file
    fn fetch(&self, path: &str) -> impl Future<Output = Result<String, FetchError>> + Send;

    /// List markdown files under a directory, relative to that directory
    fn list(&self, dir: &str) -> Result<Vec<String>, FetchError>;
}

/// Filesystem-backed source rooted at the site directory
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, FetchError> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if path.is_empty() || escapes {
            return Err(FetchError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl ContentSource for FsSource {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<String, FetchError>> + Send {
        let resolved = self.resolve(path);
        let path = path.to_string();

        async move {
            let full = resolved?;
            match tokio::fs::read_to_string(&full).await {
                Ok(text) => Ok(text),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    Err(FetchError::NotFound(path))
                }
                Err(source) => Err(FetchError::Io { path, source }),
            }
        }
    }

    fn list(&self, dir: &str) -> Result<Vec<String>, FetchError> {
        let base = self.resolve(dir)?;
        if !base.is_dir() {
            return Err(FetchError::NotFound(dir.to_string()));
        }

        let mut files: Vec<String> = WalkDir::new(&base)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && is_markdown_file(e.path()))
            .filter_map(|e| {
                e.path()
                    .strip_prefix(&base)
                    .ok()
                    .map(|p| p.to_string_lossy().replace('\\', "/"))
            })
            .collect();
        files.sort();

        Ok(files)
    }
}

/// In-memory source, keyed by relative path
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.files.insert(path.into(), text.into());
        self
    }
}

impl ContentSource for MemorySource {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<String, FetchError>> + Send {
        let result = self
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(path.to_string()));
        async move { result }
    }

    fn list(&self, dir: &str) -> Result<Vec<String>, FetchError> {
        let prefix = format!("{}/", dir.trim_end_matches('/'));
        let mut files: Vec<String> = self
            .files
            .keys()
            .filter_map(|k| k.strip_prefix(&prefix))
            .filter(|k| is_markdown_file(Path::new(k)))
            .map(str::to_string)
            .collect();
        files.sort();
        Ok(files)
    }
}

/// Check if a file is a markdown file
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
