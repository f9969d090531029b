//! Error types for the endpoint kit.
//!
//! # Design
//! Three failure classes reach callers. `InvalidArgument` is raised before
//! any I/O when a structurally required parameter is missing. `Transport`
//! wraps HTTP and key-value connectivity failures untouched; nothing here
//! retries them. `Fixture` covers template loading/rendering and fixture
//! file I/O as tagged variants, so template errors and write errors are
//! handled through the same type while staying distinguishable.
//!
//! Non-2xx HTTP statuses are not errors: the response is handed back as data.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error returned by client, store and fixture operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A required parameter was absent or empty. Raised before any I/O.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Fixture(#[from] FixtureError),
}

/// Network failure talking to the HTTP endpoint or the key-value service.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http transport failed: {0}")]
    Http(#[from] ureq::Error),

    #[error("key-value store request failed: {0}")]
    Store(#[from] redis::RedisError),
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        Error::Transport(err.into())
    }
}

impl From<redis::RedisError> for Error {
    fn from(err: redis::RedisError) -> Self {
        Error::Transport(err.into())
    }
}

/// Failure while producing or loading a JSON fixture.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The template could not be found, parsed or rendered.
    #[error("template `{name}` failed: {source}")]
    Template {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    /// The rendered fixture could not be written.
    #[error("failed to write fixture {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not valid JSON: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl FixtureError {
    /// True for failures in the write phase, the only class callers of
    /// `FixtureRenderer::replace_tags` get back as a plain `false`.
    pub fn is_write(&self) -> bool {
        matches!(self, FixtureError::Write { .. })
    }
}
