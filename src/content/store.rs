//! Post store - the immutable, date-ordered post collection

use super::source::ContentSource;
use super::tags;
use super::{FrontMatter, Post, PostEntry};

/// Ordered, read-only list of posts
#[derive(Debug, Clone, Default)]
pub struct PostStore {
    posts: Vec<Post>,
    tags: Vec<String>,
}

impl PostStore {
    /// Build a store from already-constructed posts.
    /// Sorts by date descending; later posts with a duplicate slug are dropped.
    pub fn new(posts: Vec<Post>) -> Self {
        let mut unique: Vec<Post> = Vec::with_capacity(posts.len());
        for post in posts {
            if unique.iter().any(|p| p.slug == post.slug) {
                tracing::warn!("Skipping post with duplicate slug {:?}", post.slug);
                continue;
            }
            unique.push(post);
        }

        // Stable: equal dates keep their original order. Undated posts go last.
        unique.sort_by(|a, b| b.date.cmp(&a.date));

        let tags = tags::distinct_tags(&unique);
        Self {
            posts: unique,
            tags,
        }
    }

    /// Load the static post table
    pub fn from_table(entries: Vec<PostEntry>) -> Self {
        let posts = entries.into_iter().map(PostEntry::into_post).collect();
        let store = Self::new(posts);
        tracing::debug!("Loaded {} posts from the post table", store.len());
        store
    }

    /// Fetch and parse each markdown file under `dir`.
    /// A file that fails to load is logged and skipped.
    pub async fn load<S: ContentSource>(source: &S, dir: &str, files: &[String]) -> Self {
        let mut posts = Vec::with_capacity(files.len());

        for file in files {
            let path = join_path(dir, file);
            match source.fetch(&path).await {
                Ok(text) => {
                    let (fm, body) = FrontMatter::parse(&text);
                    posts.push(Post::from_markdown(file, fm, body));
                }
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {}", path, e);
                }
            }
        }

        let store = Self::new(posts);
        tracing::debug!("Loaded {} of {} post files", store.len(), files.len());
        store
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Find a post by slug
    pub fn get(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// Find a post by its markdown file name
    pub fn get_by_file(&self, file: &str) -> Option<&Post> {
        self.posts
            .iter()
            .find(|p| p.file.as_deref() == Some(file))
    }

    /// Sorted distinct tags
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.binary_search_by(|t| t.as_str().cmp(tag)).is_ok()
    }

    /// Posts carrying `tag`, in store order
    pub fn with_tag(&self, tag: &str) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.has_tag(tag)).collect()
    }

    /// (tag, post count) pairs, sorted by tag
    pub fn tag_counts(&self) -> Vec<(&str, usize)> {
        tags::tag_counts(&self.posts)
    }

    /// The newer and older neighbours of a post
    pub fn neighbours(&self, slug: &str) -> (Option<&Post>, Option<&Post>) {
        let Some(pos) = self.posts.iter().position(|p| p.slug == slug) else {
            return (None, None);
        };
        let newer = pos.checked_sub(1).and_then(|i| self.posts.get(i));
        let older = self.posts.get(pos + 1);
        (newer, older)
    }
}

fn join_path(dir: &str, file: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        file.to_string()
    } else {
        format!("{}/{}", dir, file.trim_start_matches('/'))
    }
}

/// Relative path of a post file under the posts directory
pub fn post_path(posts_dir: &str, file: &str) -> String {
    join_path(posts_dir, file)
}
