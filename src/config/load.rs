//! Assembly of [`AppConfig`] from an environment map.

use std::collections::HashMap;
use std::env;

use super::i18n::Localization;
use super::proxy::build_routes;
use super::security::SecurityPolicy;
use super::types::*;

pub const DEFAULT_PROXY_HOST: &str = "http://localhost:8080";
pub const DEFAULT_AUTH_HOST: &str = "http://localhost:8000";
pub const DEFAULT_PUBLIC_HOST: &str = "http://localhost:3000";
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Snapshot the process environment and assemble from it.
pub fn from_env() -> AppConfig {
    let vars: HashMap<String, String> = env::vars().collect();
    assemble(&vars)
}

/// Build the config from an explicit environment map.
///
/// Never fails: a missing or empty variable falls back to its literal default.
/// Tests pass maps directly instead of mutating env vars.
pub fn assemble(env: &HashMap<String, String>) -> AppConfig {
    let proxy_host = env_or(env, "proxyHost", DEFAULT_PROXY_HOST);
    let auth_host = env_or(env, "authHost", DEFAULT_AUTH_HOST);
    let public_host = env_or(env, "PUBLIC_HOST", DEFAULT_PUBLIC_HOST);
    let host = env_or(env, "host", DEFAULT_HOST);
    let environment = env.get("NODE_ENV").cloned();
    let log_level = env_or(env, "HANGAR_LOG_LEVEL", DEFAULT_LOG_LEVEL);

    AppConfig {
        proxy_routes: build_routes(&proxy_host, &auth_host),
        security: SecurityPolicy::new(&auth_host),
        head: head_defaults(),
        localization: Localization::new(),
        server: ServerBinding { port: DEFAULT_PORT, host: host.clone() },
        runtime: RuntimeConfig {
            public: PublicRuntimeConfig { browser_base_url: public_host.clone() },
            private: PrivateRuntimeConfig { base_url: proxy_host.clone() },
        },
        client_env: ClientEnv {
            auth_host: auth_host.clone(),
            public_host: public_host.clone(),
            host: host.clone(),
            node_env: environment.clone(),
        },
        pwa: PwaManifest {
            name: "Hangar | PaperMC",
            short_name: "Hangar",
            description: "Plugin repository for Paper plugins and more!",
            lang: "en",
        },
        loading: LoadingIndicator { color: "#64B5F6", continuous: true },
        proxy_host,
        auth_host,
        public_host,
        host,
        environment,
        log_level,
    }
}

fn env_or(env: &HashMap<String, String>, key: &str, default: &str) -> String {
    env.get(key)
        .filter(|v| !v.is_empty())
        .cloned()
        .unwrap_or_else(|| default.to_string())
}

fn head_defaults() -> HeadDefaults {
    HeadDefaults {
        dir: "ltr",
        title_suffix: "Hangar",
        meta: vec![
            MetaTag::charset("utf-8"),
            MetaTag::named("viewport", "width=device-width, initial-scale=1"),
            MetaTag::named("description", "").with_hid("description"),
        ],
    }
}
