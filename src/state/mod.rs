//! View state - tag filter, page and view mode as an immutable value
//!
//! Transitions return a new [`ViewState`]; nothing here touches markup.

mod pagination;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use pagination::{clamp_page, page_range, total_pages, PageItem, Pagination};

use crate::content::{Post, PostStore};
use crate::router::Route;

/// Layout of the post listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }
}

/// Which posts the listing shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TagFilter {
    #[default]
    All,
    Tag(String),
}

impl TagFilter {
    /// `"all"` selects everything, anything else a single tag
    pub fn parse(tag: &str) -> Self {
        if tag == "all" {
            TagFilter::All
        } else {
            TagFilter::Tag(tag.to_string())
        }
    }

    pub fn matches(&self, post: &Post) -> bool {
        match self {
            TagFilter::All => true,
            TagFilter::Tag(tag) => post.has_tag(tag),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TagFilter::All => "all",
            TagFilter::Tag(tag) => tag,
        }
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete UI state of the blog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub current_tag: TagFilter,
    pub current_page: usize,
    pub view_mode: ViewMode,
    pub route: Route,
}

impl ViewState {
    pub fn new(view_mode: ViewMode) -> Self {
        Self {
            current_tag: TagFilter::All,
            current_page: 1,
            view_mode,
            route: Route::List { page: 1 },
        }
    }

    /// Filter by `tag` (or `"all"`) and go back to page 1.
    /// Returns `None` for a tag no post carries.
    pub fn select_tag(&self, tag: &str, store: &PostStore) -> Option<Self> {
        let filter = TagFilter::parse(tag);
        if let TagFilter::Tag(name) = &filter {
            if !store.has_tag(name) {
                return None;
            }
        }

        Some(Self {
            current_tag: filter,
            current_page: 1,
            ..self.clone()
        })
    }

    /// Move to page `n`, clamped to the pages of the current filter
    pub fn goto_page(&self, n: usize, store: &PostStore, page_size: usize) -> Self {
        let filtered = self.filtered(store).len();
        Self {
            current_page: clamp_page(n, filtered, page_size),
            ..self.clone()
        }
    }

    /// Flip between grid and list; filter and page are kept
    pub fn toggle_view(&self) -> Self {
        Self {
            view_mode: self.view_mode.toggled(),
            ..self.clone()
        }
    }

    /// Switch to another route, leaving filter and page alone
    pub fn with_route(&self, route: Route) -> Self {
        Self {
            route,
            ..self.clone()
        }
    }

    /// Posts matching the current tag filter, in store order
    pub fn filtered<'a>(&self, store: &'a PostStore) -> Vec<&'a Post> {
        store
            .posts()
            .iter()
            .filter(|p| self.current_tag.matches(p))
            .collect()
    }

    /// The visible page of the filtered posts
    pub fn listing<'a>(&self, store: &'a PostStore, page_size: usize) -> Listing<'a> {
        let filtered = self.filtered(store);
        let pagination = Pagination::new(self.current_page, filtered.len(), page_size);
        let range = page_range(pagination.current, filtered.len(), page_size);
        Listing {
            posts: filtered[range].to_vec(),
            pagination,
        }
    }
}

/// One page of posts plus its pagination
#[derive(Debug, Clone)]
pub struct Listing<'a> {
    pub posts: Vec<&'a Post>,
    pub pagination: Pagination,
}

impl Listing<'_> {
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    /// 12 posts, newest first: p00 .. p11. Even posts are tagged "even".
    fn store_of_twelve() -> PostStore {
        let posts = (0..12)
            .map(|i| {
                let mut p = Post::new(format!("p{:02}", i), format!("Post {}", i));
                p.date = NaiveDate::from_ymd_opt(2024, 1, 31 - i as u32);
                if i % 2 == 0 {
                    p.tags.push("even".to_string());
                }
                if i == 7 {
                    p.tags.push("seven".to_string());
                }
                p
            })
            .collect();
        PostStore::new(posts)
    }

    fn slugs(listing: &Listing<'_>) -> Vec<String> {
        listing.posts.iter().map(|p| p.slug.clone()).collect()
    }

    #[test]
    fn test_twelve_posts_page_three() {
        let store = store_of_twelve();
        let state = ViewState::new(ViewMode::Grid).goto_page(3, &store, 5);
        assert_eq!(state.current_page, 3);
        assert_eq!(slugs(&state.listing(&store, 5)), vec!["p10", "p11"]);
    }

    #[test]
    fn test_goto_page_clamps() {
        let store = store_of_twelve();
        let state = ViewState::new(ViewMode::Grid);
        assert_eq!(state.goto_page(10, &store, 5).current_page, 3);
        assert_eq!(state.goto_page(0, &store, 5).current_page, 1);
    }

    #[test]
    fn test_select_tag_is_exact_subset() {
        let store = store_of_twelve();
        let state = ViewState::new(ViewMode::Grid)
            .goto_page(2, &store, 5)
            .select_tag("even", &store)
            .unwrap();
        assert_eq!(state.current_page, 1);
        assert_eq!(state.current_tag, TagFilter::Tag("even".into()));

        let filtered = state.filtered(&store);
        assert_eq!(filtered.len(), 6);
        assert!(filtered.iter().all(|p| p.has_tag("even")));

        for tag in store.tags() {
            let state = ViewState::new(ViewMode::Grid).select_tag(tag, &store).unwrap();
            let filtered = state.filtered(&store);
            assert!(!filtered.is_empty());
            assert_eq!(filtered.len(), store.with_tag(tag).len());
        }
    }

    #[test]
    fn test_select_all_returns_store_order() {
        let store = store_of_twelve();
        let state = ViewState::new(ViewMode::Grid)
            .select_tag("seven", &store)
            .unwrap()
            .select_tag("all", &store)
            .unwrap();
        let filtered: Vec<_> = state.filtered(&store).into_iter().cloned().collect();
        assert_eq!(filtered, store.posts());
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let store = store_of_twelve();
        assert!(ViewState::new(ViewMode::Grid)
            .select_tag("missing", &store)
            .is_none());
    }

    #[test]
    fn test_goto_page_respects_filter() {
        let store = store_of_twelve();
        let state = ViewState::new(ViewMode::Grid)
            .select_tag("even", &store)
            .unwrap()
            .goto_page(5, &store, 5);
        assert_eq!(state.current_page, 2);
        assert_eq!(slugs(&state.listing(&store, 5)), vec!["p10"]);
    }

    #[test]
    fn test_toggle_view_keeps_page_and_tag() {
        let store = store_of_twelve();
        let state = ViewState::new(ViewMode::Grid)
            .select_tag("even", &store)
            .unwrap()
            .goto_page(2, &store, 5);
        let toggled = state.toggle_view();
        assert_eq!(toggled.view_mode, ViewMode::List);
        assert_eq!(toggled.current_page, 2);
        assert_eq!(toggled.current_tag, state.current_tag);
        assert_eq!(toggled.toggle_view(), state);
    }

    #[test]
    fn test_empty_store_listing() {
        let store = PostStore::default();
        let state = ViewState::new(ViewMode::List).goto_page(4, &store, 5);
        assert_eq!(state.current_page, 1);
        let listing = state.listing(&store, 5);
        assert!(listing.is_empty());
        assert_eq!(listing.pagination.total_pages, 1);
    }
}
