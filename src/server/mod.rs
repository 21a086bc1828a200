//! Preview server
//!
//! Serves the page shell, forwards routing and UI events to the blog
//! controller and serves everything else from the public directory.

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::app::{BlogApp, Event, Outcome};
use crate::content::ContentSource;
use crate::render::{document, Renderer, View};
use crate::Folio;

/// Server state
struct ServerState<S> {
    app: Mutex<BlogApp>,
    source: S,
}

/// Body of `/__view` and `/__event` responses
#[derive(Debug, Serialize)]
struct ViewResponse {
    generation: u64,
    title: String,
    html: String,
    theme: String,
    fragment: String,
}

#[derive(Debug, Deserialize)]
struct ViewQuery {
    #[serde(default)]
    fragment: String,
}

/// Start the preview server
pub async fn start(folio: &Folio, ip: &str, port: u16, open: bool) -> Result<()> {
    let source = folio.source();
    let app = folio.app().await?;
    tracing::info!("Loaded {} posts", app.store().len());

    let router = router(app, source, folio.public_dir.clone());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

/// Routes of the preview server
pub fn router<S>(app: BlogApp, source: S, public_dir: PathBuf) -> Router
where
    S: ContentSource + 'static,
{
    let state = Arc::new(ServerState {
        app: Mutex::new(app),
        source,
    });

    Router::new()
        .route("/", get(shell_handler::<S>))
        .route("/index.html", get(shell_handler::<S>))
        .route("/__view", get(view_handler::<S>))
        .route("/__event", post(event_handler::<S>))
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The page shell
async fn shell_handler<S: ContentSource + 'static>(
    State(state): State<Arc<ServerState<S>>>,
) -> Response {
    // The script asks for the real view as soon as it runs.
    let app = state.app.lock().await;
    let view = Renderer::new(app.config()).loading();
    Html(document(app.config(), &view, app.theme())).into_response()
}

async fn view_handler<S: ContentSource + 'static>(
    State(state): State<Arc<ServerState<S>>>,
    Query(query): Query<ViewQuery>,
) -> Response {
    dispatch(
        &state,
        Event::Navigate {
            fragment: query.fragment,
        },
    )
    .await
}

async fn event_handler<S: ContentSource + 'static>(
    State(state): State<Arc<ServerState<S>>>,
    Json(event): Json<Event>,
) -> Response {
    dispatch(&state, event).await
}

/// Run an event through the controller. The lock is released while a
/// markdown file is fetched; a result overtaken by a newer event yields 204.
/// Theme and fragment are read under the same lock that produced the view.
async fn dispatch<S: ContentSource>(state: &ServerState<S>, event: Event) -> Response {
    let (generation, request) = {
        let mut app = state.app.lock().await;
        let navigation = app.begin(event);
        match navigation.outcome {
            Outcome::Ready(view) => {
                return Json(response(&app, navigation.generation, view)).into_response()
            }
            Outcome::Pending { request, .. } => (navigation.generation, request),
        }
    };

    let result = state.source.fetch(&request.path).await;

    let app = state.app.lock().await;
    match app.complete(generation, &request, result) {
        Some(view) => Json(response(&app, generation, view)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

fn response(app: &BlogApp, generation: u64, view: View) -> ViewResponse {
    ViewResponse {
        generation,
        title: view.title,
        html: view.body,
        theme: app.theme().as_str().to_string(),
        fragment: app.fragment(),
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::{MemorySource, Post, PostStore};
    use crate::theme::{MemoryStorage, ThemeController};
    use crate::content::FetchError;
    use axum::body::to_bytes;
    use std::future::Future;
    use tokio::sync::Notify;

    /// Holds every fetch until the gate is opened
    struct GatedSource {
        files: MemorySource,
        gate: Arc<Notify>,
    }

    impl ContentSource for GatedSource {
        fn fetch(&self, path: &str) -> impl Future<Output = Result<String, FetchError>> + Send {
            let gate = self.gate.clone();
            let fetched = self.files.fetch(path);
            async move {
                gate.notified().await;
                fetched.await
            }
        }

        fn list(&self, dir: &str) -> Result<Vec<String>, FetchError> {
            self.files.list(dir)
        }
    }

    fn app() -> BlogApp {
        let mut post = Post::new("hello", "Hello");
        post.file = Some("hello.md".to_string());
        post.tags = vec!["greeting".to_string()];
        let config = SiteConfig::default();
        let theme = ThemeController::load(
            Box::new(MemoryStorage::new()),
            &config.theme_key,
            config.default_theme,
        );
        BlogApp::new(config, PostStore::new(vec![post]), theme)
    }

    fn files() -> MemorySource {
        MemorySource::new().with_file("posts/hello.md", "Hello *world*")
    }

    fn state() -> ServerState<MemorySource> {
        ServerState {
            app: Mutex::new(app()),
            source: files(),
        }
    }

    async fn json(response: Response) -> serde_json::Value {
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_dispatch_fetches_post() {
        let state = state();
        let event = Event::Navigate {
            fragment: "#/posts/hello".to_string(),
        };
        let body = json(dispatch(&state, event).await).await;
        assert_eq!(body["generation"], 1);
        assert_eq!(body["theme"], "dark");
        assert_eq!(body["fragment"], "#/posts/hello");
        assert!(body["html"].as_str().unwrap().contains("<em>world</em>"));
    }

    #[tokio::test]
    async fn test_dispatch_theme_toggle() {
        let state = state();
        let body = json(dispatch(&state, Event::ToggleTheme).await).await;
        assert_eq!(body["theme"], "light");
        assert_eq!(body["fragment"], "#/");
    }

    #[tokio::test]
    async fn test_overtaken_fetch_yields_no_content() {
        let gate = Arc::new(Notify::new());
        let state = Arc::new(ServerState {
            app: Mutex::new(app()),
            source: GatedSource {
                files: files(),
                gate: gate.clone(),
            },
        });

        let slow = tokio::spawn({
            let state = state.clone();
            async move {
                let event = Event::Navigate {
                    fragment: "#/posts/hello".to_string(),
                };
                dispatch(&state, event).await.status()
            }
        });
        while state.app.lock().await.generation() == 0 {
            tokio::task::yield_now().await;
        }

        let event = Event::Navigate {
            fragment: "#/tags".to_string(),
        };
        let body = json(dispatch(&state, event).await).await;
        assert_eq!(body["generation"], 2);
        assert_eq!(body["fragment"], "#/tags");

        gate.notify_one();
        assert_eq!(slow.await.unwrap(), StatusCode::NO_CONTENT);
    }
}
