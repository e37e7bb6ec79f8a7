//! Front-end configuration assembled from environment variables.
//!
//! Reads `proxyHost`, `authHost`, `PUBLIC_HOST`, `host` and `NODE_ENV`, falls
//! back to literal defaults, and combines them with the static policy data.
//!
//! # Module layout
//!
//! - **types**: `AppConfig` and the small structs it is made of.
//! - **load**: `assemble` (pure, from an explicit map) and `from_env`.
//! - **proxy**: proxy route table and path matching.
//! - **security**: CSP / HSTS / referrer policy and header rendering.
//! - **i18n**: locale list, message lookup, `Accept-Language` negotiation.
//! - **locales**: built-in `en` / `fr` catalogues.

pub mod i18n;
mod load;
mod locales;
pub mod proxy;
pub mod security;
mod types;

pub use load::{
    assemble, from_env, DEFAULT_AUTH_HOST, DEFAULT_HOST, DEFAULT_LOG_LEVEL, DEFAULT_PORT,
    DEFAULT_PROXY_HOST, DEFAULT_PUBLIC_HOST,
};
pub use types::*;
