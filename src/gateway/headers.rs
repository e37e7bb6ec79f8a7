//! Security header middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::GatewayState;

/// Attach the pre-rendered policy headers, replacing any an upstream set.
pub(super) async fn apply_security_headers(
    State(state): State<GatewayState>,
    req: Request,
    next: Next,
) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();
    for (name, value) in state.security_headers.iter() {
        headers.insert(name.clone(), value.clone());
    }
    response
}
