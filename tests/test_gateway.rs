//! Router-level tests: security headers, local documents, proxying.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, Uri},
};
use tokio::net::TcpListener;
use tower::ServiceExt;

use hangar_front::config::{AppConfig, assemble};
use hangar_front::error::AppError;
use hangar_front::gateway::Gateway;

fn config_with(pairs: &[(&str, &str)]) -> Arc<AppConfig> {
    let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    Arc::new(assemble(&env))
}

fn router(config: Arc<AppConfig>) -> Router {
    Gateway::new(config).unwrap().router()
}

async fn get(router: Router, uri: &str) -> axum::response::Response {
    router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_string(resp: axum::response::Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Upstream that echoes the request line it received.
async fn spawn_echo_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().fallback(|method: axum::http::Method, uri: Uri| async move {
        ([("x-upstream", "echo")], format!("{method} {uri}"))
    });
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Upstream with fixed responses: a large download and one carrying
/// connection-scoped headers.
async fn spawn_fixture_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new()
        .route(
            "/api/v1/download",
            axum::routing::get(|| async { vec![7u8; LARGE_DOWNLOAD] }),
        )
        .route(
            "/statusz",
            axum::routing::get(|| async {
                (
                    [("keep-alive", "timeout=5"), ("proxy-authenticate", "Basic"), ("x-upstream", "fixture")],
                    "ok",
                )
            }),
        );
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Larger than the request body cap, so nothing on the response path is capped.
const LARGE_DOWNLOAD: usize = 20 * 1024 * 1024;

#[tokio::test]
async fn unrenderable_security_header_fails_startup() {
    let cfg = config_with(&[("authHost", "http://a\nb")]);
    match Gateway::new(cfg) {
        Err(AppError::Config(msg)) => assert!(msg.contains("content-security-policy"), "{msg}"),
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("gateway started without its CSP header"),
    }
}

#[tokio::test]
async fn every_response_carries_security_headers() {
    let cfg = config_with(&[("authHost", "https://auth.papermc.io")]);
    for uri in ["/", "/projects/paper", "/manifest.json", "/_i18n/nope", "/favicon.ico"] {
        let resp = get(router(cfg.clone()), uri).await;
        let h = resp.headers();
        let csp = h.get("content-security-policy").unwrap().to_str().unwrap();
        assert!(csp.contains("img-src 'self'"), "{uri}");
        assert!(csp.contains("https://auth.papermc.io"), "{uri}");
        assert_eq!(
            h.get("strict-transport-security").unwrap(),
            "max-age=15552000; includeSubDomains; preload"
        );
        assert_eq!(h.get("referrer-policy").unwrap(), "same-origin");
        assert_eq!(h.get("x-content-type-options").unwrap(), "nosniff");
    }
}

#[tokio::test]
async fn shell_is_localised_from_accept_language() {
    let req = Request::builder()
        .uri("/")
        .header("accept-language", "fr-FR,fr;q=0.9")
        .body(Body::empty())
        .unwrap();
    let resp = router(config_with(&[])).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_string(resp).await;
    assert!(html.contains(r#"lang="fr""#));
    assert!(html.contains("<title>Hangar</title>"));
}

#[tokio::test]
async fn non_get_outside_proxy_routes_is_rejected() {
    let req = Request::builder().method("POST").uri("/projects").body(Body::empty()).unwrap();
    let resp = router(config_with(&[])).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(resp.headers().get("content-security-policy").is_some());
}

#[tokio::test]
async fn manifest_is_served() {
    let resp = get(router(config_with(&[])), "/manifest.json").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let v: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(v["name"], "Hangar | PaperMC");
    assert_eq!(v["short_name"], "Hangar");
    assert_eq!(v["lang"], "en");
}

#[tokio::test]
async fn locale_endpoints() {
    let resp = get(router(config_with(&[])), "/_i18n/locales").await;
    let v: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(v["defaultLocale"], "en");
    assert_eq!(v["fallbackLocale"], "en");
    assert_eq!(v["strategy"], "no_prefix");
    assert_eq!(v["locales"].as_array().unwrap().len(), 2);

    let resp = get(router(config_with(&[])), "/_i18n/fr").await;
    let v: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(v["nav"]["login"], "Connexion");
    assert_eq!(v["general"]["statusz"], "Status");

    let resp = get(router(config_with(&[])), "/_i18n/de").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn runtime_config_hides_private_half() {
    let cfg = config_with(&[("PUBLIC_HOST", "https://hangar.papermc.io"), ("proxyHost", "http://backend:9999")]);
    let resp = get(router(cfg), "/_runtime-config").await;
    let body = body_string(resp).await;
    let v: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["browserBaseURL"], "https://hangar.papermc.io");
    assert!(!body.contains("backend:9999"));
}

#[tokio::test]
async fn proxy_routes_reach_upstream_unmodified() {
    let upstream = spawn_echo_upstream().await;
    let cfg = config_with(&[("proxyHost", upstream.as_str())]);

    let resp = get(router(cfg.clone()), "/api/v1/projects?limit=5").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("x-upstream").unwrap(), "echo");
    assert!(resp.headers().get("content-security-policy").is_some());
    assert_eq!(body_string(resp).await, "GET /api/v1/projects?limit=5");

    let resp = get(router(cfg.clone()), "/paper/sitemap.xml").await;
    assert_eq!(body_string(resp).await, "GET /paper/sitemap.xml");

    let req = Request::builder().method("POST").uri("/logout").body(Body::empty()).unwrap();
    let resp = router(cfg).oneshot(req).await.unwrap();
    assert_eq!(body_string(resp).await, "POST /logout");
}

#[tokio::test]
async fn unreachable_upstream_is_bad_gateway() {
    // Grab a free port, then close it so nothing is listening there.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let auth_host = format!("http://{addr}");
    let cfg = config_with(&[("authHost", auth_host.as_str())]);
    let resp = get(router(cfg), "/avatar/paper").await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    assert!(resp.headers().get("strict-transport-security").is_some());
}

#[tokio::test]
async fn oversized_request_body_is_rejected() {
    let upstream = spawn_echo_upstream().await;
    let cfg = config_with(&[("proxyHost", upstream.as_str())]);

    let req = Request::builder()
        .method("POST")
        .uri("/api/v1/projects/paper/upload")
        .body(Body::from(vec![0u8; 16 * 1024 * 1024 + 1]))
        .unwrap();
    let resp = router(cfg.clone()).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(resp.headers().get("content-security-policy").is_some());

    let req = Request::builder()
        .method("POST")
        .uri("/api/v1/projects")
        .body(Body::from(vec![0u8; 1024]))
        .unwrap();
    let resp = router(cfg).oneshot(req).await.unwrap();
    assert_eq!(body_string(resp).await, "POST /api/v1/projects");
}

#[tokio::test]
async fn upstream_hop_by_hop_headers_are_dropped() {
    let upstream = spawn_fixture_upstream().await;
    let cfg = config_with(&[("proxyHost", upstream.as_str())]);

    let resp = get(router(cfg), "/statusz").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let h = resp.headers();
    assert_eq!(h.get("x-upstream").unwrap(), "fixture");
    assert!(h.get("keep-alive").is_none());
    assert!(h.get("proxy-authenticate").is_none());
    assert!(h.get("transfer-encoding").is_none());
    assert_eq!(body_string(resp).await, "ok");
}

#[tokio::test]
async fn large_upstream_body_is_relayed_whole() {
    let upstream = spawn_fixture_upstream().await;
    let cfg = config_with(&[("proxyHost", upstream.as_str())]);

    let resp = get(router(cfg), "/api/v1/download").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(bytes.len(), LARGE_DOWNLOAD);
    assert!(bytes.iter().all(|b| *b == 7));
}

#[tokio::test]
async fn protocol_upgrade_on_proxy_route_is_refused() {
    let upstream = spawn_echo_upstream().await;
    let cfg = config_with(&[("proxyHost", upstream.as_str())]);

    let req = Request::builder()
        .uri("/api/v1/events")
        .header("connection", "upgrade")
        .header("upgrade", "websocket")
        .body(Body::empty())
        .unwrap();
    let resp = router(cfg).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);
    assert!(resp.headers().get("strict-transport-security").is_some());
}

#[tokio::test]
async fn shell_bootstrap_exposes_client_env() {
    let cfg = config_with(&[
        ("authHost", "https://auth.papermc.io"),
        ("proxyHost", "http://backend:9999"),
        ("NODE_ENV", "production"),
    ]);
    let html = body_string(get(router(cfg), "/projects").await).await;
    assert!(html.contains(r#""authHost":"https://auth.papermc.io""#));
    assert!(html.contains(r#""nodeEnv":"production""#));
    assert!(!html.contains("backend:9999"));
}
