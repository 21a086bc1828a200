//! Render a single view to stdout

use anyhow::Result;

use crate::app::{BlogApp, Event};
use crate::content::ContentSource;
use crate::render::document;
use crate::Folio;

/// Render the view for `fragment`. With `full` the page shell is included.
pub async fn run(folio: &Folio, fragment: &str, full: bool) -> Result<()> {
    let source = folio.source();
    let mut app = folio.app().await?;
    print!("{}", render(&mut app, &source, fragment, full).await);
    Ok(())
}

async fn render<S: ContentSource>(
    app: &mut BlogApp,
    source: &S,
    fragment: &str,
    full: bool,
) -> String {
    let view = app
        .handle(
            source,
            Event::Navigate {
                fragment: fragment.to_string(),
            },
        )
        .await;
    tracing::debug!("Rendered {} ({:?})", fragment, view.kind);

    if full {
        document(app.config(), &view, app.theme())
    } else {
        format!("{}\n", view.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::{MemorySource, PostStore};
    use crate::theme::{MemoryStorage, Theme, ThemeController};

    #[tokio::test]
    async fn test_render_fragment() {
        let source = MemorySource::new()
            .with_file("posts/one.md", "---\ntitle: One\ntags: x\n---\nFirst *post*")
            .with_file("pages/about.md", "About page");
        let files = source.list("posts").unwrap();
        let store = PostStore::load(&source, "posts", &files).await;
        let theme = ThemeController::load(Box::new(MemoryStorage::new()), "theme", Theme::Light);
        let mut app = BlogApp::new(SiteConfig::default(), store, theme);

        let body = render(&mut app, &source, "#/posts/one", false).await;
        assert!(body.contains("<em>post</em>"));

        let html = render(&mut app, &source, "#/about", true).await;
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"data-theme="light""#));
        assert!(html.contains(r#"data-view="page""#));
    }
}
