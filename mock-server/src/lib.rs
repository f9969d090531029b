use std::collections::BTreeMap;

use axum::{
    extract::Query,
    http::{HeaderMap, Method, StatusCode, Uri},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

pub mod kv;

pub use kv::{run_kv, Store};

/// Request header that makes the echo service answer with a given status.
pub const FORCE_STATUS_HEADER: &str = "x-echo-status";

/// What the echo service saw, reflected back as the response body.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Echo {
    pub method: String,
    pub path: String,
    pub query: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

pub fn app() -> Router {
    Router::new().fallback(echo)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(
    method: Method,
    uri: Uri,
    Query(query): Query<BTreeMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, Json<Echo>) {
    let status = headers
        .get(FORCE_STATUS_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u16>().ok())
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::OK);

    let headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();

    tracing::debug!(%method, path = uri.path(), %status, "echoing request");

    let echo = Echo {
        method: method.to_string(),
        path: uri.path().to_string(),
        query,
        headers,
        body,
    };
    (status, Json(echo))
}
