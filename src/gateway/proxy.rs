//! Request forwarding for proxy routes.
//!
//! Request bodies are buffered up to [`MAX_BODY_BYTES`]; upstream response
//! bodies are streamed through without buffering. Protocol upgrades
//! (WebSocket) are not tunnelled and are refused with `501`.

use axum::{
    body::{self, Body, Bytes},
    extract::Request,
    http::{HeaderMap, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::config::proxy::ProxyRoute;
use crate::error::AppError;

const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Connection-scoped headers never passed through a proxy.
const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

pub(super) async fn forward(client: &reqwest::Client, route: &ProxyRoute, req: Request) -> Response {
    if req.headers().contains_key(header::UPGRADE) {
        warn!(path = %req.uri().path(), "refusing protocol upgrade on proxy route");
        return (StatusCode::NOT_IMPLEMENTED, "protocol upgrades are not proxied\n").into_response();
    }

    let (parts, body) = req.into_parts();
    let path_and_query = parts.uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    let url = route.forward_url(path_and_query);

    let body = match body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(b) => b,
        Err(e) => {
            warn!(%url, "rejecting proxied request body: {e}");
            return (StatusCode::PAYLOAD_TOO_LARGE, "request body too large\n").into_response();
        }
    };

    let mut headers = strip_hop_by_hop(parts.headers);
    headers.remove(header::HOST);
    headers.remove(header::CONTENT_LENGTH);

    match send(client, parts.method, &url, headers, body).await {
        Ok(response) => {
            debug!(upstream = route.upstream.as_str(), %url, status = %response.status(), "proxied");
            response
        }
        Err(e) => {
            warn!(upstream = route.upstream.as_str(), %url, "proxy request failed: {e}");
            (StatusCode::BAD_GATEWAY, "upstream unavailable\n").into_response()
        }
    }
}

async fn send(
    client: &reqwest::Client,
    method: Method,
    url: &str,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let upstream = client.request(method, url).headers(headers).body(body).send().await?;

    let status = upstream.status();
    let headers = strip_hop_by_hop(upstream.headers().clone());

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}

fn strip_hop_by_hop(mut headers: HeaderMap) -> HeaderMap {
    for name in HOP_BY_HOP {
        headers.remove(name);
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn hop_by_hop_headers_are_removed() {
        let mut headers = HeaderMap::new();
        headers.insert("connection", HeaderValue::from_static("keep-alive"));
        headers.insert("transfer-encoding", HeaderValue::from_static("chunked"));
        headers.insert("cookie", HeaderValue::from_static("HangarAuth=abc"));
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let kept = strip_hop_by_hop(headers);
        assert!(kept.get("connection").is_none());
        assert!(kept.get("transfer-encoding").is_none());
        assert_eq!(kept.get("cookie").unwrap(), "HangarAuth=abc");
        assert_eq!(kept.len(), 2);
    }
}
