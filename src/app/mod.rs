//! Application controller
//!
//! Owns the view state and turns events into views. Fetching markdown is the
//! only suspending step; it is split into [`BlogApp::begin`] and
//! [`BlogApp::complete`] so a caller can release the controller while the
//! fetch is in flight. Each navigation bumps a generation counter and a
//! completion for an older generation is discarded.

use serde::Deserialize;

use crate::config::SiteConfig;
use crate::content::store::post_path;
use crate::content::{ContentSource, FetchError, FrontMatter, MarkdownRenderer, Post, PostStore};
use crate::render::{Renderer, View};
use crate::router::{History, Route, RoutingStyle};
use crate::state::ViewState;
use crate::theme::{Theme, ThemeController};

/// Something the user did
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Initial load or hash change
    Navigate { fragment: String },
    SelectTag { tag: String },
    GotoPage { page: usize },
    ToggleView,
    ToggleTheme,
    Back,
}

/// A markdown file the current view is waiting for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub path: String,
    pub target: FetchTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchTarget {
    Post { slug: String },
    Page { name: String },
}

/// Result of starting to handle an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Ready(View),
    /// `placeholder` is shown until the request completes
    Pending {
        placeholder: View,
        request: FetchRequest,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub generation: u64,
    pub outcome: Outcome,
}

/// How an event changes the navigation history
enum HistoryUpdate {
    Push,
    Replace,
    Keep,
}

/// The blog controller
pub struct BlogApp {
    config: SiteConfig,
    store: PostStore,
    state: ViewState,
    theme: ThemeController,
    history: History,
    markdown: MarkdownRenderer,
    generation: u64,
}

impl BlogApp {
    pub fn new(config: SiteConfig, store: PostStore, theme: ThemeController) -> Self {
        let markdown = MarkdownRenderer::with_options(&config.highlight, config.sanitize);
        let state = ViewState::new(config.default_view_mode);
        Self {
            config,
            store,
            state,
            theme,
            history: History::new(),
            markdown,
            generation: 0,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn store(&self) -> &PostStore {
        &self.store
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Fragment of the current route
    pub fn fragment(&self) -> String {
        self.state.route.fragment(self.config.routing_style)
    }

    fn renderer(&self) -> Renderer<'_> {
        Renderer::new(&self.config)
    }

    /// Start handling an event. Views that need no fetch are ready at once.
    pub fn begin(&mut self, event: Event) -> Navigation {
        tracing::debug!("Handling {:?}", event);

        // Theme and view toggles re-render the current view in place.
        let (route, record) = match event {
            Event::Navigate { fragment } => (
                Route::parse(
                    &fragment,
                    self.config.routing_style,
                    &self.config.static_pages,
                ),
                HistoryUpdate::Push,
            ),
            Event::Back => {
                let previous = self.history.back().map(str::to_string);
                match previous {
                    Some(fragment) => (
                        Route::parse(
                            &fragment,
                            self.config.routing_style,
                            &self.config.static_pages,
                        ),
                        HistoryUpdate::Keep,
                    ),
                    // Nothing to go back to: the list replaces the only entry.
                    None => (Route::List { page: 1 }, HistoryUpdate::Replace),
                }
            }
            Event::SelectTag { tag } => {
                match self.state.select_tag(&tag, &self.store) {
                    Some(state) => self.state = state,
                    None => tracing::warn!("Ignoring unknown tag {:?}", tag),
                }
                (Route::List { page: 1 }, HistoryUpdate::Push)
            }
            Event::GotoPage { page } => (Route::List { page }, HistoryUpdate::Push),
            Event::ToggleView => {
                self.state = self.state.toggle_view();
                (self.state.route.clone(), HistoryUpdate::Keep)
            }
            Event::ToggleTheme => {
                let theme = self.theme.toggle();
                tracing::debug!("Theme switched to {}", theme);
                (self.state.route.clone(), HistoryUpdate::Keep)
            }
        };

        self.generation += 1;
        let outcome = self.enter(route);

        // Recorded after entering so clamped pages are stored as shown.
        let fragment = self.fragment();
        match record {
            HistoryUpdate::Push => self.history.push(&fragment),
            HistoryUpdate::Replace => self.history.replace(&fragment),
            HistoryUpdate::Keep => {}
        }

        Navigation {
            generation: self.generation,
            outcome,
        }
    }

    /// Move to `route` and render it, or describe the fetch it needs
    fn enter(&mut self, route: Route) -> Outcome {
        tracing::debug!("Entering {} route", route.kind());
        self.state = self.state.with_route(route.clone());
        let renderer = self.renderer();

        match route {
            Route::List { page } => {
                let state = self
                    .state
                    .goto_page(page, &self.store, self.config.page_size);
                let state = state.with_route(Route::List {
                    page: state.current_page,
                });
                let view = renderer.post_list(&state, &self.store);
                self.state = state;
                Outcome::Ready(view)
            }
            Route::Post(id) => {
                let Some(post) = self.find_post(&id) else {
                    tracing::debug!("No post matches {:?}", id);
                    return Outcome::Ready(self.renderer().not_found(Some("Post")));
                };
                match &post.content {
                    Some(body) => {
                        let html = self.markdown.render(body);
                        Outcome::Ready(renderer.single_post(post, &html, &self.store))
                    }
                    None => Outcome::Pending {
                        placeholder: renderer.loading(),
                        request: FetchRequest {
                            path: post_path(&self.config.posts_dir, &post.expected_file()),
                            target: FetchTarget::Post {
                                slug: post.slug.clone(),
                            },
                        },
                    },
                }
            }
            Route::Tag(tag) => {
                if !self.store.has_tag(&tag) {
                    return Outcome::Ready(renderer.not_found(Some("Tag")));
                }
                Outcome::Ready(renderer.tag_page(&tag, &self.store.with_tag(&tag)))
            }
            Route::AllTags => Outcome::Ready(renderer.all_tags(&self.store)),
            Route::StaticPage(name) => Outcome::Pending {
                placeholder: renderer.loading(),
                request: FetchRequest {
                    path: post_path(&self.config.pages_dir, &format!("{}.md", name)),
                    target: FetchTarget::Page { name },
                },
            },
            Route::NotFound => Outcome::Ready(renderer.not_found(None)),
        }
    }

    fn find_post(&self, id: &str) -> Option<&Post> {
        match self.config.routing_style {
            RoutingStyle::FragmentPath => self.store.get(id),
            RoutingStyle::HashFlag => self
                .store
                .get_by_file(id)
                .or_else(|| self.store.get(id)),
        }
    }

    /// Finish a pending navigation. Returns `None` when a newer navigation
    /// has started since `generation`; the result is then dropped.
    pub fn complete(
        &self,
        generation: u64,
        request: &FetchRequest,
        result: Result<String, FetchError>,
    ) -> Option<View> {
        if generation != self.generation {
            tracing::debug!(
                "Discarding stale fetch of {} (generation {} < {})",
                request.path,
                generation,
                self.generation
            );
            return None;
        }

        let renderer = self.renderer();
        let view = match (&request.target, result) {
            (FetchTarget::Post { slug }, result) => {
                let Some(post) = self.store.get(slug) else {
                    return Some(renderer.not_found(Some("Post")));
                };
                match result {
                    Ok(text) => {
                        let (_, body) = FrontMatter::parse(&text);
                        let html = self.markdown.render(body);
                        renderer.single_post(post, &html, &self.store)
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load post {:?}: {}", request.path, e);
                        renderer.post_missing(post)
                    }
                }
            }
            (FetchTarget::Page { name }, Ok(text)) => {
                let (_, body) = FrontMatter::parse(&text);
                renderer.static_page(name, &self.markdown.render(body))
            }
            (FetchTarget::Page { name }, Err(e)) => {
                tracing::warn!("Failed to load page {:?}: {}", name, e);
                renderer.not_found(Some("Page"))
            }
        };
        Some(view)
    }

    /// Handle an event to completion, fetching through `source` if needed
    pub async fn handle<S: ContentSource>(&mut self, source: &S, event: Event) -> View {
        let navigation = self.begin(event);
        match navigation.outcome {
            Outcome::Ready(view) => view,
            Outcome::Pending {
                placeholder,
                request,
            } => {
                let result = source.fetch(&request.path).await;
                self.complete(navigation.generation, &request, result)
                    .unwrap_or(placeholder)
            }
        }
    }
}
