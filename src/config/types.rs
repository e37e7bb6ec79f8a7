//! Public configuration structs consumed by the gateway.

use serde::Serialize;

use super::i18n::Localization;
use super::proxy::ProxyRoute;
use super::security::SecurityPolicy;

/// Fully-assembled front-end configuration.
///
/// Built once at startup by [`super::assemble`] and shared read-only for the
/// lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend API host (`proxyHost`).
    pub proxy_host: String,
    /// Auth service host (`authHost`).
    pub auth_host: String,
    /// Externally reachable URL of this front-end (`PUBLIC_HOST`).
    pub public_host: String,
    /// Interface name the server binds to (`host`).
    pub host: String,
    /// Raw `NODE_ENV` pass-through. No default.
    pub environment: Option<String>,
    pub head: HeadDefaults,
    /// Backend routes first, then auth routes.
    pub proxy_routes: Vec<ProxyRoute>,
    pub localization: Localization,
    pub security: SecurityPolicy,
    pub server: ServerBinding,
    pub runtime: RuntimeConfig,
    pub client_env: ClientEnv,
    pub pwa: PwaManifest,
    pub loading: LoadingIndicator,
    /// Default tracing filter (`HANGAR_LOG_LEVEL`); `RUST_LOG` wins when set.
    pub log_level: String,
}

impl AppConfig {
    /// `true` when `NODE_ENV` is exactly `production`.
    pub fn is_production(&self) -> bool {
        self.environment.as_deref() == Some("production")
    }
}

/// Document-level defaults rendered into every HTML shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadDefaults {
    /// Text direction for `<html dir>`.
    pub dir: &'static str,
    /// Appended to page titles by [`HeadDefaults::title`].
    pub title_suffix: &'static str,
    pub meta: Vec<MetaTag>,
}

impl HeadDefaults {
    /// Apply the title template: `"{chunk} | Hangar"`, or just `"Hangar"`
    /// when there is no page-specific chunk.
    pub fn title(&self, chunk: &str) -> String {
        if chunk.is_empty() {
            self.title_suffix.to_string()
        } else {
            format!("{chunk} | {}", self.title_suffix)
        }
    }
}

/// A `<meta>` tag. `hid` is the dedupe key pages use to override a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTag {
    pub hid: Option<&'static str>,
    pub charset: Option<&'static str>,
    pub name: Option<&'static str>,
    pub content: Option<&'static str>,
}

impl MetaTag {
    pub fn charset(charset: &'static str) -> Self {
        Self { hid: None, charset: Some(charset), name: None, content: None }
    }

    pub fn named(name: &'static str, content: &'static str) -> Self {
        Self { hid: None, charset: None, name: Some(name), content: Some(content) }
    }

    pub fn with_hid(mut self, hid: &'static str) -> Self {
        self.hid = Some(hid);
        self
    }
}

/// Listener address for the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerBinding {
    pub port: u16,
    pub host: String,
}

impl ServerBinding {
    /// `host:port`, suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Runtime config split by audience.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Embedded in client-served output.
    pub public: PublicRuntimeConfig,
    /// Server-only. Never serialized into a response.
    pub private: PrivateRuntimeConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicRuntimeConfig {
    #[serde(rename = "browserBaseURL")]
    pub browser_base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateRuntimeConfig {
    pub base_url: String,
}

/// Build-time host values exposed to client code as `window.__HANGAR__.env`.
///
/// `proxyHost` is not exposed; the backend address stays server-side, as with
/// [`PrivateRuntimeConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientEnv {
    pub auth_host: String,
    pub public_host: String,
    pub host: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_env: Option<String>,
}

/// Web app manifest served to browsers installing the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PwaManifest {
    pub name: &'static str,
    pub short_name: &'static str,
    pub description: &'static str,
    pub lang: &'static str,
}

/// Page-transition progress bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingIndicator {
    /// CSS colour.
    pub color: &'static str,
    /// Keep animating while a navigation is pending instead of stopping at 100%.
    pub continuous: bool,
}
