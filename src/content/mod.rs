//! Content module - posts, front-matter, markdown and the post store

mod frontmatter;
mod markdown;
mod post;
pub mod source;
pub mod store;
pub mod tags;

pub use frontmatter::{parse_date, FrontMatter};
pub use markdown::MarkdownRenderer;
pub use post::{slug_from_file, Post, PostEntry};
pub use source::{ContentSource, FetchError, FsSource, MemorySource};
pub use store::PostStore;
