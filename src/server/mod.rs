//! Preview server
//!
//! Serves the public directory as static files, renders single posts at
//! `/post.html?file=` and answers filtered searches at `/api/search`.

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::commands;
use crate::content::loader::load_index;
use crate::content::page::{load_post_page, PageError, PostPage};
use crate::content::{MarkdownRenderer, PostSummary};
use crate::helpers::{error_state, escape_html, post_url, tag_list, url_for};
use crate::search::{SearchEngine, TagSelection};
use crate::theme::Theme;
use crate::Site;

/// Server state
struct ServerState {
    site: Site,
    renderer: MarkdownRenderer,
    engine: RwLock<SearchEngine>,
}

#[derive(Debug, Deserialize)]
struct PostQuery {
    file: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
    tag: Option<String>,
}

/// A search result with its page link
#[derive(Debug, Serialize)]
struct SearchHit<'a> {
    #[serde(flatten)]
    post: &'a PostSummary,
    url: String,
}

/// Start the preview server
pub async fn start(site: &Site, ip: &str, port: u16, watch: bool, open: bool) -> Result<()> {
    let posts = load_index(&site.index_path()).await;
    tracing::info!("Serving {} posts", posts.len());

    let state = Arc::new(ServerState {
        site: site.clone(),
        renderer: MarkdownRenderer::from_config(&site.config.highlight),
        engine: RwLock::new(SearchEngine::with_posts(posts)),
    });

    let app = Router::new()
        .route("/post.html", get(post_handler))
        .route("/api/search", get(search_handler))
        .fallback_service(ServeDir::new(&site.public_dir).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::clone(&state));

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

    if watch {
        let site = site.clone();
        let state = Arc::clone(&state);
        tokio::task::spawn_blocking(move || {
            let result = commands::build::watch(&site, |posts| {
                state.engine.blocking_write().set_posts(posts);
            });
            if let Err(e) = result {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<PostQuery>,
) -> Response {
    let result = load_post_page(&state.site.pages_dir, &state.renderer, query.file.as_deref()).await;
    let theme = commands::theme::manager(&state.site).current();

    let engine = state.engine.read().await;
    let (status, body) = render_post(&state.site, engine.all_posts(), result, theme);
    (status, Html(body)).into_response()
}

async fn search_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    let engine = state.engine.read().await;
    let results = search_posts(&engine, &query);

    let hits: Vec<_> = results
        .into_iter()
        .map(|post| SearchHit {
            post,
            url: post_url(&state.site.config, &post.file),
        })
        .collect();
    Json(serde_json::json!(hits))
}

/// Apply the request's tag and query without changing the shared engine
fn search_posts<'a>(engine: &'a SearchEngine, query: &SearchQuery) -> Vec<&'a PostSummary> {
    let selection = query
        .tag
        .as_deref()
        .map(TagSelection::parse)
        .unwrap_or(TagSelection::All);
    engine.search_with_tag(&selection, &query.q)
}

/// Render the post page, or its error state
fn render_post(
    site: &Site,
    posts: &[PostSummary],
    result: Result<PostPage, PageError>,
    theme: Theme,
) -> (StatusCode, String) {
    let config = &site.config;

    let (status, title, main) = match result {
        Ok(page) => {
            let mut meta = String::new();
            if let Some(date) = &page.display_date {
                meta.push_str(&format!(r#"<time class="post-date">{}</time>"#, escape_html(date)));
            }
            if let Some(category) = &page.category {
                meta.push_str(&format!(
                    r#"<span class="post-category">{}</span>"#,
                    escape_html(category)
                ));
            }

            let mut nav = String::new();
            if let Some(current) = posts.iter().find(|p| p.file == page.file) {
                if let Some(prev) = current.prev(posts) {
                    nav.push_str(&nav_link(site, prev, "prev", "&larr;"));
                }
                if let Some(next) = current.next(posts) {
                    nav.push_str(&nav_link(site, next, "next", "&rarr;"));
                }
            }

            let main = format!(
                r#"<article class="post">
<header><h1 class="post-title">{}</h1><div class="post-meta">{}</div><div class="post-tags">{}</div></header>
<div class="post-content">{}</div>
<nav class="post-nav">{}</nav>
</article>"#,
                escape_html(&page.title),
                meta,
                tag_list(&page.tags),
                page.html,
                nav
            );
            (StatusCode::OK, page.title, main)
        }
        Err(e) => {
            tracing::warn!("Post page failed: {}", e);
            let status = match &e {
                PageError::MissingFile => StatusCode::BAD_REQUEST,
                PageError::Load(crate::content::loader::LoadError::NotFound(_)) => {
                    StatusCode::NOT_FOUND
                }
                PageError::Load(crate::content::loader::LoadError::InvalidFile(_)) => {
                    StatusCode::BAD_REQUEST
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let main = error_state(&e.to_string(), &url_for(config, "index.html"));
            (status, "Error".to_string(), main)
        }
    };

    let body = format!(
        r#"<!DOCTYPE html>
<html lang="en" data-theme="{}">
<head>
<meta charset="utf-8">
<title>{} | {}</title>
</head>
<body>
{}
</body>
</html>
"#,
        theme,
        escape_html(&title),
        escape_html(&config.title),
        main
    );

    (status, body)
}

fn nav_link(site: &Site, post: &PostSummary, class: &str, arrow: &str) -> String {
    format!(
        r#"<a href="{}" class="post-nav-link {}">{} {}</a>"#,
        escape_html(&post_url(&site.config, &post.file)),
        class,
        arrow,
        escape_html(&post.title)
    )
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
