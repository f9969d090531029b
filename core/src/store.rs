//! Transient key-value store used to hand values between test steps.
//!
//! # Design
//! A thin pass-through to an external Redis-compatible service. A fresh
//! connection is opened per call and nothing is cached locally. Concurrent
//! writers to the same key race; coordinating them is up to the caller.
//!
//! `get` keeps the loose textual contract: a missing key comes back as
//! `ABSENT_SENTINEL`, which callers must treat as absence. `fetch` is the
//! typed alternative.

use redis::{Commands, Connection};
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::Result;

/// Returned by `TransientStore::get` when the key does not exist.
pub const ABSENT_SENTINEL: &str = "None";

/// Returned by `TransientStore::set` once the value is stored.
pub const SET_ACK: &str = "True";

#[derive(Debug, Clone, Default)]
pub struct TransientStore {
    config: StoreConfig,
}

impl TransientStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn connect(&self) -> Result<Connection> {
        let client = redis::Client::open(self.config.connection_url().as_str())?;
        let connection = match self.config.timeout() {
            Some(timeout) => client.get_connection_with_timeout(timeout)?,
            None => client.get_connection()?,
        };
        Ok(connection)
    }

    /// The stored value, or `None` when the key does not exist.
    pub fn fetch(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connect()?;
        let value: Option<String> = conn.get(key)?;
        debug!(key, found = value.is_some(), "transient get");
        Ok(value)
    }

    /// The stored value, or `ABSENT_SENTINEL` when the key does not exist.
    pub fn get(&self, key: &str) -> Result<String> {
        Ok(self
            .fetch(key)?
            .unwrap_or_else(|| ABSENT_SENTINEL.to_string()))
    }

    /// Store `value` under `key` and return `SET_ACK`. Best effort; not
    /// transactional.
    pub fn set(&self, key: &str, value: &str) -> Result<String> {
        let mut conn = self.connect()?;
        let _: () = conn.set(key, value)?;
        debug!(key, "transient set");
        Ok(SET_ACK.to_string())
    }
}
