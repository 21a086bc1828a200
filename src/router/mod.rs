//! Hash router - maps URL fragments to routes and back

mod history;

use serde::{Deserialize, Serialize};

pub use history::History;

use crate::content::Post;
use crate::helpers::{decode_segment, encode_segment};

/// Fragment grammar in use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingStyle {
    /// `#/`, `#/page/2`, `#/posts/<slug>`, `#/tag/<tag>`, `#/tags`, `#/about`
    #[default]
    FragmentPath,
    /// `#`, `#page/2`, `#post/<file>`, `#tag/<tag>`, `#tags`, `#about`
    HashFlag,
}

/// A view the router can show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Post listing at a page number (clamped later)
    List { page: usize },
    /// Single post. A slug for fragment paths, a file name for hash flags.
    Post(String),
    /// Posts carrying one tag
    Tag(String),
    /// Tag cloud
    AllTags,
    /// Markdown page from the pages directory
    StaticPage(String),
    NotFound,
}

impl Route {
    /// Parse a fragment (with or without the leading `#`)
    pub fn parse(fragment: &str, style: RoutingStyle, static_pages: &[String]) -> Route {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);

        let path = match style {
            RoutingStyle::FragmentPath => {
                if fragment.is_empty() {
                    return Route::List { page: 1 };
                }
                match fragment.strip_prefix('/') {
                    Some(path) => path,
                    None => return Route::NotFound,
                }
            }
            RoutingStyle::HashFlag => {
                if fragment.starts_with('/') {
                    return Route::NotFound;
                }
                fragment
            }
        };

        let path = path.strip_suffix('/').unwrap_or(path);
        if path.is_empty() {
            return Route::List { page: 1 };
        }

        let post_keyword = match style {
            RoutingStyle::FragmentPath => "posts",
            RoutingStyle::HashFlag => "post",
        };

        let segments: Vec<&str> = path.split('/').collect();
        match segments.as_slice() {
            ["page", n] => match n.parse::<usize>() {
                Ok(page) => Route::List { page },
                Err(_) => Route::NotFound,
            },
            [keyword, id] if *keyword == post_keyword && !id.is_empty() => {
                Route::Post(decode_segment(id))
            }
            ["tag", tag] if !tag.is_empty() => Route::Tag(decode_segment(tag)),
            ["tags"] => Route::AllTags,
            [name] if static_pages.iter().any(|p| p == name) => {
                Route::StaticPage(name.to_string())
            }
            _ => Route::NotFound,
        }
    }

    /// Route to a post, identified the way `style` expects
    pub fn for_post(post: &Post, style: RoutingStyle) -> Route {
        match style {
            RoutingStyle::FragmentPath => Route::Post(post.slug.clone()),
            RoutingStyle::HashFlag => Route::Post(post.expected_file()),
        }
    }

    /// Build the fragment (including `#`) that parses back to this route
    pub fn fragment(&self, style: RoutingStyle) -> String {
        let prefix = match style {
            RoutingStyle::FragmentPath => "#/",
            RoutingStyle::HashFlag => "#",
        };
        let post_keyword = match style {
            RoutingStyle::FragmentPath => "posts",
            RoutingStyle::HashFlag => "post",
        };

        let path = match self {
            Route::List { page } if *page <= 1 => String::new(),
            Route::List { page } => format!("page/{}", page),
            Route::Post(id) => format!("{}/{}", post_keyword, encode_segment(id)),
            Route::Tag(tag) => format!("tag/{}", encode_segment(tag)),
            Route::AllTags => "tags".to_string(),
            Route::StaticPage(name) => encode_segment(name),
            Route::NotFound => "not-found".to_string(),
        };

        format!("{}{}", prefix, path)
    }

    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Route::List { .. } => "list",
            Route::Post(_) => "single-post",
            Route::Tag(_) => "tag-page",
            Route::AllTags => "all-tags",
            Route::StaticPage(_) => "static-page",
            Route::NotFound => "not-found",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages() -> Vec<String> {
        vec!["about".to_string()]
    }

    fn path(fragment: &str) -> Route {
        Route::parse(fragment, RoutingStyle::FragmentPath, &pages())
    }

    fn flag(fragment: &str) -> Route {
        Route::parse(fragment, RoutingStyle::HashFlag, &pages())
    }

    #[test]
    fn test_fragment_path_routes() {
        assert_eq!(path(""), Route::List { page: 1 });
        assert_eq!(path("#"), Route::List { page: 1 });
        assert_eq!(path("#/"), Route::List { page: 1 });
        assert_eq!(path("#/page/3"), Route::List { page: 3 });
        assert_eq!(path("#/posts/hello-world"), Route::Post("hello-world".into()));
        assert_eq!(path("#/tag/web%20dev"), Route::Tag("web dev".into()));
        assert_eq!(path("#/tags"), Route::AllTags);
        assert_eq!(path("#/tags/"), Route::AllTags);
        assert_eq!(path("#/about"), Route::StaticPage("about".into()));
    }

    #[test]
    fn test_fragment_path_not_found() {
        assert_eq!(path("#/contact"), Route::NotFound);
        assert_eq!(path("#/page/abc"), Route::NotFound);
        assert_eq!(path("#/page/"), Route::NotFound);
        assert_eq!(path("#/posts/"), Route::NotFound);
        assert_eq!(path("#/posts/a/b"), Route::NotFound);
        assert_eq!(path("#/post/hello"), Route::NotFound);
        assert_eq!(path("#posts/hello"), Route::NotFound);
    }

    #[test]
    fn test_hash_flag_routes() {
        assert_eq!(flag(""), Route::List { page: 1 });
        assert_eq!(flag("#post/welcome.md"), Route::Post("welcome.md".into()));
        assert_eq!(flag("#page/2"), Route::List { page: 2 });
        assert_eq!(flag("#tag/css"), Route::Tag("css".into()));
        assert_eq!(flag("#tags"), Route::AllTags);
        assert_eq!(flag("#about"), Route::StaticPage("about".into()));
        assert_eq!(flag("#/posts/welcome"), Route::NotFound);
        assert_eq!(flag("#posts/welcome.md"), Route::NotFound);
    }

    #[test]
    fn test_fragment_round_trip() {
        let routes = [
            Route::List { page: 1 },
            Route::List { page: 4 },
            Route::Post("vanilla-js".into()),
            Route::Tag("c++ & web/dev".into()),
            Route::AllTags,
            Route::StaticPage("about".into()),
        ];
        for style in [RoutingStyle::FragmentPath, RoutingStyle::HashFlag] {
            for route in &routes {
                let fragment = route.fragment(style);
                assert_eq!(&Route::parse(&fragment, style, &pages()), route, "{}", fragment);
            }
        }
        assert_eq!(Route::NotFound.fragment(RoutingStyle::FragmentPath), "#/not-found");
        assert_eq!(path(&Route::NotFound.fragment(RoutingStyle::FragmentPath)), Route::NotFound);
    }

    #[test]
    fn test_for_post() {
        let mut post = Post::new("welcome", "Welcome");
        post.file = Some("welcome.md".into());
        assert_eq!(
            Route::for_post(&post, RoutingStyle::FragmentPath).fragment(RoutingStyle::FragmentPath),
            "#/posts/welcome"
        );
        assert_eq!(
            Route::for_post(&post, RoutingStyle::HashFlag).fragment(RoutingStyle::HashFlag),
            "#post/welcome.md"
        );
    }
}
