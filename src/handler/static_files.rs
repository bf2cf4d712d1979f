//! Static file serving module
//!
//! Serves the single-page UI and its assets. Paths are resolved inside the
//! configured directory only; anything that canonicalizes outside it is a 404.

use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, HttpResponse};
use crate::knowledge::{KnowledgeBase, Language};
use crate::logger;
use hyper::body::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Serve the UI page, or a generated page if it is missing
pub async fn serve_index(ctx: &RequestContext<'_>, state: &AppState) -> HttpResponse {
    let index = state.index_path();
    match load_file(&index).await {
        Some((content, content_type)) => respond_with_file(ctx, content, content_type),
        None => {
            logger::log_warning(&format!(
                "Index page '{}' not found, serving built-in page",
                index.display()
            ));
            http::build_html_response(fallback_page(state.knowledge, state.default_lang), ctx.is_head)
        }
    }
}

/// Serve `relative` from `static_dir`
pub async fn serve_asset(ctx: &RequestContext<'_>, static_dir: &str, relative: &str) -> HttpResponse {
    let Some(file_path) = resolve_in_dir(static_dir, relative).await else {
        return http::build_404_response();
    };
    match load_file(&file_path).await {
        Some((content, content_type)) => respond_with_file(ctx, content, content_type),
        None => http::build_404_response(),
    }
}

fn respond_with_file(ctx: &RequestContext<'_>, content: Vec<u8>, content_type: &str) -> HttpResponse {
    let etag = cache::generate_etag(&content);
    if cache::etag_matches(ctx.if_none_match.as_deref(), &etag) {
        logger::log_debug(&format!("Not modified: {}", ctx.path));
        return http::build_304_response(&etag);
    }
    http::build_static_response(Bytes::from(content), content_type, &etag, ctx.is_head)
}

/// Canonical path of `relative` if it is a regular file inside `dir`
pub async fn resolve_in_dir(dir: &str, relative: &str) -> Option<PathBuf> {
    let relative = relative.trim_start_matches('/');
    if relative.is_empty() || relative.split('/').any(|segment| segment == "..") {
        return None;
    }

    let root = match fs::canonicalize(dir).await {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static directory not found or inaccessible '{dir}': {e}"
            ));
            return None;
        }
    };

    // Missing files are ordinary 404s
    let candidate = fs::canonicalize(root.join(relative)).await.ok()?;
    if !candidate.starts_with(&root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {relative} -> {}",
            candidate.display()
        ));
        return None;
    }

    let metadata = fs::metadata(&candidate).await.ok()?;
    metadata.is_file().then_some(candidate)
}

async fn load_file(path: &Path) -> Option<(Vec<u8>, &'static str)> {
    let content = match fs::read(path).await {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
            return None;
        }
    };
    let content_type = mime::get_content_type(path.extension().and_then(|e| e.to_str()));
    Some((content, content_type))
}

/// Minimal page built from the knowledge base
pub fn fallback_page(kb: &KnowledgeBase, lang: Language) -> String {
    let features: String = kb
        .features(lang)
        .iter()
        .map(|item| format!("        <li>{}</li>\n", escape_html(item)))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
</head>
<body>
    <h1>{title}</h1>
    <p>{short}</p>
    <ul>
{features}    </ul>
    <p>Chat: <code>POST /chat</code> with <code>{{"message": "features", "lang": "en"}}</code></p>
</body>
</html>"#,
        title = escape_html(kb.title(lang)),
        short = escape_html(kb.short(lang)),
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
