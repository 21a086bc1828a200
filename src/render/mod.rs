//! Markup rendering
//!
//! Every function here is a pure mapping from state and posts to escaped
//! HTML. Nothing is fetched, stored, or mutated while rendering.

mod shell;

use serde::Serialize;

pub use shell::document;

use crate::config::SiteConfig;
use crate::content::{Post, PostStore};
use crate::helpers::{format_date, html_escape, link_to, time_tag};
use crate::router::{Route, RoutingStyle};
use crate::state::{PageItem, Pagination, TagFilter, ViewMode, ViewState};

/// What a rendered view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    List,
    Empty,
    Post,
    PostMissing,
    Tag,
    AllTags,
    Page,
    NotFound,
    Loading,
}

/// Rendered markup for the content area plus the document title
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub kind: ViewKind,
    pub title: String,
    pub body: String,
}

/// Renders views using the site settings
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    config: &'a SiteConfig,
}

impl<'a> Renderer<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    fn style(&self) -> RoutingStyle {
        self.config.routing_style
    }

    fn title(&self, prefix: &str) -> String {
        format!("{} | {}", prefix, self.config.title)
    }

    fn post_href(&self, post: &Post) -> String {
        Route::for_post(post, self.style()).fragment(self.style())
    }

    fn tag_href(&self, tag: &str) -> String {
        Route::Tag(tag.to_string()).fragment(self.style())
    }

    fn tag_links(&self, tags: &[String], class: &str) -> String {
        tags.iter()
            .map(|tag| link_to(&self.tag_href(tag), tag, Some(class)))
            .collect::<Vec<_>>()
            .join("")
    }

    /// Post listing: filter bar, view toggle, cards and pagination
    pub fn post_list(&self, state: &ViewState, store: &PostStore) -> View {
        let listing = state.listing(store, self.config.page_size);

        let mut html = String::from(r#"<section class="posts">"#);
        html.push_str(&self.tag_filter(store, &state.current_tag));
        html.push_str(&self.view_toggle(state.view_mode));

        let kind = if listing.is_empty() {
            html.push_str(&self.empty_state());
            ViewKind::Empty
        } else {
            let container = match state.view_mode {
                ViewMode::Grid => "posts-grid",
                ViewMode::List => "posts-list",
            };
            html.push_str(&format!(r#"<div class="{}">"#, container));
            for post in &listing.posts {
                html.push_str(&self.post_card(post, state.view_mode));
            }
            html.push_str("</div>");
            html.push_str(&self.pagination(&listing.pagination));
            ViewKind::List
        };
        html.push_str("</section>");

        let title = match &state.current_tag {
            TagFilter::All => self.config.title.clone(),
            TagFilter::Tag(tag) => self.title(&format!("Posts tagged \"{}\"", tag)),
        };

        View {
            kind,
            title,
            body: html,
        }
    }

    /// Tag buttons, with the active filter highlighted
    pub fn tag_filter(&self, store: &PostStore, current: &TagFilter) -> String {
        let button = |tag: &str, label: &str| {
            let active = if current.as_str() == tag { " active" } else { "" };
            format!(
                r#"<button class="tag-btn{}" data-event="select_tag" data-tag="{}">{}</button>"#,
                active,
                html_escape(tag),
                html_escape(label)
            )
        };

        let mut html = String::from(r#"<nav class="tags-filter">"#);
        html.push_str(&button("all", "All Posts"));
        for tag in store.tags() {
            html.push_str(&button(tag.as_str(), tag.as_str()));
        }
        html.push_str("</nav>");
        html
    }

    fn view_toggle(&self, mode: ViewMode) -> String {
        let label = match mode {
            ViewMode::Grid => "List View",
            ViewMode::List => "Grid View",
        };
        format!(
            r#"<button class="view-toggle" data-event="toggle_view" data-mode="{}">{}</button>"#,
            mode.as_str(),
            label
        )
    }

    fn empty_state(&self) -> String {
        r#"<div class="no-posts"><h3>No posts found</h3><p>Try selecting a different tag or check back later for new content.</p></div>"#
            .to_string()
    }

    /// One card in the listing
    pub fn post_card(&self, post: &Post, mode: ViewMode) -> String {
        let list_class = match mode {
            ViewMode::Grid => "",
            ViewMode::List => " list-view",
        };
        let excerpt = post
            .excerpt
            .as_deref()
            .map(|e| format!(r#"<p class="post-excerpt">{}</p>"#, html_escape(e)))
            .unwrap_or_default();

        format!(
            concat!(
                r#"<article class="post-card{}">"#,
                r#"<div class="post-meta"><h2 class="post-title">{}</h2>"#,
                r#"<div class="post-date">{}</div></div>"#,
                "{}",
                r#"<div class="post-tags">{}</div>"#,
                "</article>"
            ),
            list_class,
            link_to(&self.post_href(post), &post.title, Some("post-link")),
            time_tag(post.date, &self.config.date_format),
            excerpt,
            self.tag_links(&post.tags, "post-tag"),
        )
    }

    /// Pagination bar. Prev/next stay visible and are disabled at the ends.
    pub fn pagination(&self, pagination: &Pagination) -> String {
        let page_href = |n: usize| Route::List { page: n }.fragment(self.style());

        let mut html = String::from(r#"<nav class="pagination">"#);
        for item in pagination.window() {
            match item {
                PageItem::Prev { target, disabled } => {
                    html.push_str(&self.step_control(page_href(target), "\u{2039}", "prev", disabled))
                }
                PageItem::Next { target, disabled } => {
                    html.push_str(&self.step_control(page_href(target), "\u{203a}", "next", disabled))
                }
                PageItem::Page { number, current } => {
                    let class = if current {
                        "pagination-btn active"
                    } else {
                        "pagination-btn"
                    };
                    html.push_str(&link_to(&page_href(number), &number.to_string(), Some(class)));
                }
                PageItem::Ellipsis => html.push_str(r#"<span class="pagination-ellipsis">...</span>"#),
            }
        }

        let (first, last) = pagination.item_span();
        html.push_str(&format!(
            r#"<div class="pagination-info">{}-{} of {} posts</div>"#,
            first, last, pagination.total_items
        ));
        html.push_str("</nav>");
        html
    }

    fn step_control(&self, href: String, label: &str, rel: &str, disabled: bool) -> String {
        if disabled {
            format!(
                r#"<span class="pagination-btn {} disabled" aria-disabled="true">{}</span>"#,
                rel, label
            )
        } else {
            format!(
                r#"<a class="pagination-btn {}" rel="{}" href="{}">{}</a>"#,
                rel,
                rel,
                html_escape(&href),
                label
            )
        }
    }

    /// Full post with rendered body and newer/older links
    pub fn single_post(&self, post: &Post, body_html: &str, store: &PostStore) -> View {
        let tags = if post.tags.is_empty() {
            String::new()
        } else {
            format!(
                r#"<div class="post-tags">Tagged: {}</div>"#,
                self.tag_links(&post.tags, "post-tag")
            )
        };

        let (newer, older) = store.neighbours(&post.slug);
        let neighbour = |p: Option<&Post>, class: &str| {
            p.map(|p| link_to(&self.post_href(p), &p.title, Some(class)))
                .unwrap_or_default()
        };

        let html = format!(
            concat!(
                r#"<article class="post">"#,
                r#"<button class="back-btn" data-event="back">Back</button>"#,
                "<h1>{}</h1>",
                r#"<p class="post-meta">{}</p>"#,
                "{}",
                r#"<div class="post-content">{}</div>"#,
                r#"<nav class="post-nav">{}{}</nav>"#,
                "</article>"
            ),
            html_escape(&post.title),
            time_tag(post.date, &self.config.long_date_format),
            tags,
            body_html,
            neighbour(newer, "newer"),
            neighbour(older, "older"),
        );

        View {
            kind: ViewKind::Post,
            title: self.title(&post.title),
            body: html,
        }
    }

    /// Shown when a known post's markdown file cannot be fetched
    pub fn post_missing(&self, post: &Post) -> View {
        let dir = self.config.posts_dir.trim_end_matches('/');
        let html = format!(
            concat!(
                r#"<article class="post post-missing">"#,
                r#"<button class="back-btn" data-event="back">Back</button>"#,
                "<h1>Post Not Found</h1>",
                "<p>Sorry, this post could not be loaded. ",
                "This might be because the markdown file doesn't exist yet.</p>",
                "<p><strong>To add this post:</strong></p>",
                "<ol>",
                "<li>Create a file named <code>{}</code> in the <code>{}/</code> directory</li>",
                "<li>Start it with an optional front-matter block between <code>---</code> lines ",
                "(<code>title: ...</code>, <code>date: YYYY-MM-DD</code>, <code>tags: a, b</code>)</li>",
                "<li>Write your content in Markdown format</li>",
                "<li>Refresh the page</li>",
                "</ol>",
                "</article>"
            ),
            html_escape(&post.expected_file()),
            html_escape(dir),
        );

        View {
            kind: ViewKind::PostMissing,
            title: self.title("Not Found"),
            body: html,
        }
    }

    /// Every post carrying `tag`
    pub fn tag_page(&self, tag: &str, posts: &[&Post]) -> View {
        let mut html = format!(
            r#"<section class="tag-page"><h2>Posts Tagged &ldquo;{}&rdquo;</h2><ul class="post-list">"#,
            html_escape(tag)
        );
        for post in posts {
            html.push_str(&format!(
                r#"<li><span class="post-date">{}</span><h3>{}</h3></li>"#,
                html_escape(&format_date(post.date, &self.config.date_format)),
                link_to(&self.post_href(post), &post.title, Some("post-link"))
            ));
        }
        html.push_str("</ul></section>");

        View {
            kind: ViewKind::Tag,
            title: self.title(&format!("Posts tagged \"{}\"", tag)),
            body: html,
        }
    }

    /// Tag cloud with post counts
    pub fn all_tags(&self, store: &PostStore) -> View {
        let mut html = String::from(r#"<section class="all-tags"><h1>All Tags</h1><div class="tag-cloud">"#);
        for (tag, count) in store.tag_counts() {
            html.push_str(&link_to(
                &self.tag_href(tag),
                &format!("{} ({})", tag, count),
                Some("tag-item"),
            ));
        }
        html.push_str("</div></section>");

        View {
            kind: ViewKind::AllTags,
            title: self.title("All Tags"),
            body: html,
        }
    }

    /// A static markdown page
    pub fn static_page(&self, name: &str, body_html: &str) -> View {
        let mut heading = name.to_string();
        if let Some(first) = heading.get(..1) {
            let upper = first.to_uppercase();
            heading.replace_range(..1, &upper);
        }

        View {
            kind: ViewKind::Page,
            title: self.title(&heading),
            body: format!(
                r#"<article class="page"><div class="page-content">{}</div></article>"#,
                body_html
            ),
        }
    }

    /// 404 view. `what` names the missing thing ("Post", "Page", "Tag").
    pub fn not_found(&self, what: Option<&str>) -> View {
        let heading = match what {
            Some(what) => format!("404 - {} Not Found", html_escape(what)),
            None => "404 - Not Found".to_string(),
        };
        View {
            kind: ViewKind::NotFound,
            title: self.title("Not Found"),
            body: format!(
                r#"<section class="not-found"><h2>{}</h2><p>{}</p></section>"#,
                heading,
                link_to(&Route::List { page: 1 }.fragment(self.style()), "Back to all posts", None)
            ),
        }
    }

    /// Placeholder while a fetch is in flight
    pub fn loading(&self) -> View {
        View {
            kind: ViewKind::Loading,
            title: self.config.title.clone(),
            body: r#"<div class="loading">Loading...</div>"#.to_string(),
        }
    }
}
