//! The HTML document that hosts the rendered views

use crate::config::SiteConfig;
use crate::helpers::html_escape;
use crate::router::Route;
use crate::theme::Theme;

use super::View;

/// Forwards hash changes and `data-event` clicks to the preview server and
/// swaps the returned markup in. Responses older than the newest applied
/// one are dropped.
const SHELL_SCRIPT: &str = r#"<script>
(function () {
  var applied = 0;
  var content = document.getElementById('content');

  function receive(response) {
    if (response.status === 204) return null;
    return response.json();
  }

  function apply(view) {
    if (!view || view.generation < applied) return;
    applied = view.generation;
    document.documentElement.setAttribute('data-theme', view.theme);
    content.innerHTML = view.html;
    document.title = view.title;
    if (view.fragment !== undefined && view.fragment !== location.hash) {
      history.replaceState(null, '', view.fragment || location.pathname);
    }
  }

  function route() {
    fetch('/__view?fragment=' + encodeURIComponent(location.hash))
      .then(receive).then(apply);
  }

  function send(event) {
    fetch('/__event', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify(event)
    }).then(receive).then(apply);
  }

  document.addEventListener('click', function (e) {
    var el = e.target.closest('[data-event]');
    if (!el) return;
    e.preventDefault();
    var event = { type: el.dataset.event };
    if (el.dataset.tag !== undefined) event.tag = el.dataset.tag;
    if (el.dataset.page !== undefined) event.page = Number(el.dataset.page);
    send(event);
  });

  document.addEventListener('keydown', function (e) {
    if (e.key === 'Escape' && content.querySelector('.back-btn')) send({ type: 'back' });
  });

  window.addEventListener('hashchange', route);
  route();
})();
</script>"#;

/// Full page: header with theme toggle, the content area holding `view`,
/// and the routing script. `theme` is applied on the root element so the
/// first paint already uses it.
pub fn document(config: &SiteConfig, view: &View, theme: Theme) -> String {
    let home = Route::List { page: 1 }.fragment(config.routing_style);
    let tags = Route::AllTags.fragment(config.routing_style);

    let mut nav = format!(
        r#"<a href="{}">Home</a><a href="{}">Tags</a>"#,
        html_escape(&home),
        html_escape(&tags)
    );
    for page in &config.static_pages {
        let href = Route::StaticPage(page.clone()).fragment(config.routing_style);
        nav.push_str(&format!(
            r#"<a href="{}">{}</a>"#,
            html_escape(&href),
            html_escape(page)
        ));
    }

    let description = if config.description.is_empty() {
        String::new()
    } else {
        format!(
            r#"<meta name="description" content="{}">"#,
            html_escape(&config.description)
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en" data-theme="{theme}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="generator" content="folio {version}">
{description}
<title>{title}</title>
<link rel="stylesheet" href="/assets/style.css">
</head>
<body>
<header class="site-header">
<h1 class="site-title"><a href="{home}">{site}</a></h1>
<nav class="site-nav">{nav}</nav>
<button class="theme-toggle" data-event="toggle_theme" aria-label="Toggle theme">{icon}</button>
</header>
<main id="content" data-view="{kind}">{body}</main>
<footer class="site-footer">{site}</footer>
{script}
</body>
</html>
"#,
        theme = theme.as_str(),
        version = env!("CARGO_PKG_VERSION"),
        description = description,
        title = html_escape(&view.title),
        home = html_escape(&home),
        site = html_escape(&config.title),
        nav = nav,
        icon = match theme {
            Theme::Light => "\u{1f319}",
            Theme::Dark => "\u{2600}\u{fe0f}",
        },
        kind = serde_json::to_value(view.kind)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default(),
        body = view.body,
        script = SHELL_SCRIPT,
    )
}
