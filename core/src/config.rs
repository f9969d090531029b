//! Connection settings for the HTTP endpoint client and the transient store.
//!
//! Both are plain values injected at construction time, never module-level
//! globals, so tests can run several isolated instances side by side. Both
//! deserialize from JSON; timeouts are expressed as `timeout_ms`.

use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};
use crate::headers::HeaderSet;

/// Base URI plus headers sent with every call. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EndpointConfig {
    base_uri: String,
    #[serde(default)]
    default_headers: HeaderSet,
    #[serde(default, rename = "timeout_ms", deserialize_with = "millis")]
    timeout: Option<Duration>,
}

impl EndpointConfig {
    /// `base_uri` is used verbatim as a prefix, so it should carry its
    /// trailing `/` (e.g. `"https://api.example.com/"`).
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            default_headers: HeaderSet::new(),
            timeout: None,
        }
    }

    pub fn with_default_headers(mut self, headers: HeaderSet) -> Self {
        self.default_headers = headers;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn default_headers(&self) -> &HeaderSet {
        &self.default_headers
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_uri.trim().is_empty() {
            return Err(Error::InvalidArgument("base_uri must not be empty".to_string()));
        }
        Ok(())
    }
}

pub const DEFAULT_STORE_HOST: &str = "localhost";
pub const DEFAULT_STORE_PORT: u16 = 6379;

/// Address of the external key-value service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    host: String,
    port: u16,
    db: i64,
    #[serde(rename = "timeout_ms", deserialize_with = "millis")]
    timeout: Option<Duration>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_STORE_HOST.to_string(),
            port: DEFAULT_STORE_PORT,
            db: 0,
            timeout: None,
        }
    }
}

impl StoreConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    pub fn with_db(mut self, db: i64) -> Self {
        self.db = db;
        self
    }

    /// Bounds connection establishment only.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn db(&self) -> i64 {
        self.db
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn connection_url(&self) -> String {
        format!("redis://{}:{}/{}", self.host, self.port, self.db)
    }
}

fn millis<'de, D>(deserializer: D) -> std::result::Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
}
