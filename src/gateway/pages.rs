//! Locally served documents: HTML shell, manifest, locale tables, runtime config.

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use serde_json::json;

use crate::config::AppConfig;
use crate::config::i18n::Locale;

use super::GatewayState;

/// GET /manifest.json
pub(super) async fn manifest(State(state): State<GatewayState>) -> Response {
    (
        [(header::CONTENT_TYPE, "application/manifest+json")],
        Json(state.config.pwa.clone()),
    )
        .into_response()
}

/// GET /_i18n/locales
pub(super) async fn locales(State(state): State<GatewayState>) -> Json<serde_json::Value> {
    let l = &state.config.localization;
    Json(json!({
        "locales": l.locales,
        "defaultLocale": l.default_locale,
        "fallbackLocale": l.fallback_locale,
        "strategy": l.strategy,
    }))
}

/// GET /_i18n/{code}
pub(super) async fn messages(State(state): State<GatewayState>, Path(code): Path<String>) -> Response {
    match state.config.localization.resolved_messages(&code) {
        Some(table) => Json(table).into_response(),
        None => (StatusCode::NOT_FOUND, "unknown locale\n").into_response(),
    }
}

/// GET /_runtime-config: the public half only.
pub(super) async fn runtime_config(State(state): State<GatewayState>) -> Response {
    Json(state.config.runtime.public.clone()).into_response()
}

/// HTML shell for client-rendered pages, localised via `Accept-Language`.
pub(super) fn shell(config: &AppConfig, headers: &HeaderMap) -> Response {
    let accept = headers.get(header::ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok());
    let locale = config.localization.negotiate(accept);
    Html(render_shell(config, locale)).into_response()
}

pub(super) fn render_shell(config: &AppConfig, locale: &Locale) -> String {
    let head = &config.head;
    let mut meta = String::new();
    for tag in &head.meta {
        meta.push_str("  <meta");
        if let Some(hid) = tag.hid {
            meta.push_str(&format!(" data-hid=\"{}\"", escape_attr(hid)));
        }
        if let Some(charset) = tag.charset {
            meta.push_str(&format!(" charset=\"{}\"", escape_attr(charset)));
        }
        if let Some(name) = tag.name {
            meta.push_str(&format!(" name=\"{}\"", escape_attr(name)));
        }
        if let Some(content) = tag.content {
            meta.push_str(&format!(" content=\"{}\"", escape_attr(content)));
        }
        meta.push_str(">\n");
    }

    let bootstrap = json!({
        "config": config.runtime.public,
        "env": config.client_env,
        "locale": locale.code,
    })
    .to_string()
    .replace("</", "<\\/");

    let loading_class = if config.loading.continuous { "continuous" } else { "" };

    format!(
        r#"<!doctype html>
<html dir="{dir}" lang="{lang}">
<head>
{meta}  <title>{title}</title>
  <meta name="theme-color" content="{color}">
  <link rel="manifest" href="/manifest.json">
  <style>#loading{{position:fixed;top:0;left:0;height:2px;background:{color}}}</style>
</head>
<body>
  <div id="loading" class="{loading_class}"></div>
  <div id="app"></div>
  <script>window.__HANGAR__={bootstrap};</script>
</body>
</html>
"#,
        dir = escape_attr(head.dir),
        lang = escape_attr(locale.code),
        title = escape_attr(&head.title("")),
        color = escape_attr(config.loading.color),
    )
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
