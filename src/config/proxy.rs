//! Proxy route table: path patterns forwarded verbatim to an upstream host.

/// Paths owned by the backend API (`proxyHost`).
pub const BACKEND_ROUTES: [&str; 13] = [
    "/api/",
    "/signup",
    "/login",
    "/logout",
    // Post-logout callback; newer than the other backend paths.
    "/handle-logout",
    "/refresh",
    "/invalidate",
    "/v2/api-docs/",
    "/robots.txt",
    "/sitemap.xml",
    "/global-sitemap.xml",
    "/*/sitemap.xml",
    "/statusz",
];

/// Paths owned by the auth service (`authHost`).
pub const AUTH_ROUTES: [&str; 1] = ["/avatar"];

/// Which configured host a route forwards to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    Backend,
    Auth,
}

impl Upstream {
    pub fn as_str(&self) -> &'static str {
        match self {
            Upstream::Backend => "backend",
            Upstream::Auth => "auth",
        }
    }
}

/// One entry of the proxy table: `target` + `pattern` is the literal route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRoute {
    pub upstream: Upstream,
    /// Resolved host, e.g. `http://localhost:8080`.
    pub target: String,
    /// Literal path suffix, e.g. `/api/` or `/*/sitemap.xml`.
    pub pattern: &'static str,
}

impl ProxyRoute {
    pub fn new(upstream: Upstream, target: &str, pattern: &'static str) -> Self {
        Self { upstream, target: target.to_string(), pattern }
    }

    /// The route as configured: host concatenated with the path suffix.
    pub fn url(&self) -> String {
        format!("{}{}", self.target, self.pattern)
    }

    /// Whether a request path belongs to this route.
    ///
    /// Plain patterns are string prefixes. A `*` segment matches exactly one
    /// non-empty path segment, and the whole path must match.
    pub fn matches(&self, path: &str) -> bool {
        if !self.pattern.contains('*') {
            return path.starts_with(self.pattern);
        }

        let mut want = self.pattern.split('/');
        let mut got = path.split('/');
        loop {
            match (want.next(), got.next()) {
                (None, None) => return true,
                (Some("*"), Some(seg)) if !seg.is_empty() => {}
                (Some(w), Some(g)) if w == g => {}
                _ => return false,
            }
        }
    }

    /// Upstream URL for a request's path and query.
    pub fn forward_url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.target.trim_end_matches('/'), path_and_query)
    }
}

/// Build the full route table for the resolved hosts.
pub fn build_routes(proxy_host: &str, auth_host: &str) -> Vec<ProxyRoute> {
    BACKEND_ROUTES
        .iter()
        .map(|p| ProxyRoute::new(Upstream::Backend, proxy_host, p))
        .chain(AUTH_ROUTES.iter().map(|p| ProxyRoute::new(Upstream::Auth, auth_host, p)))
        .collect()
}

/// First route claiming `path`, if any.
pub fn find_route<'a>(routes: &'a [ProxyRoute], path: &str) -> Option<&'a ProxyRoute> {
    routes.iter().find(|r| r.matches(path))
}
