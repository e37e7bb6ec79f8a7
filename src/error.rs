//! Application-wide error types.
//!
//! Config assembly has no error path; everything here comes from startup
//! (logger, header rendering, listener) or from talking to an upstream host.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("logger error: {0}")]
    Logger(String),

    /// An assembled value cannot be served, e.g. a host that is not a valid
    /// header value.
    #[error("config error: {0}")]
    Config(String),

    #[error("server error: {0}")]
    Server(String),

    #[error("upstream error: {0}")]
    Upstream(String),
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Upstream(e.to_string())
    }
}
