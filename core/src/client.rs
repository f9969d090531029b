//! Verb-per-method HTTP client bound to one base URI.
//!
//! # Design
//! `HttpEndpointClient` owns an immutable `EndpointConfig` and a `Transport`.
//! Every verb is split into a pure `build_*` method producing an
//! `HttpRequest` and a dispatching method that builds and executes it. The
//! target URL is computed per call by `resource_url`; the configuration is
//! never rewritten, so one client can be shared across threads.
//!
//! Identifier placement differs by verb and is spelled out with
//! `IdentifierJoin` at each call site:
//!
//! | verb   | URL                                  |
//! |--------|--------------------------------------|
//! | GET    | `base_uri + path + identifier`       |
//! | DELETE | `base_uri + path + identifier`       |
//! | PATCH  | `base_uri + path + "/" + identifier` |
//! | PUT    | `base_uri + path` (identifier unused)|
//! | POST   | `base_uri + path`                    |

use tracing::debug;

use crate::config::EndpointConfig;
use crate::error::{Error, Result};
use crate::headers::{merge, HeaderSet};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};

pub type QueryParams = std::collections::BTreeMap<String, String>;

/// How an identifier is attached to `base_uri + path`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierJoin {
    /// Identifier is ignored.
    Omit,
    /// Appended directly; `path` is expected to end in `/`.
    Concat,
    /// Appended after an inserted `/`.
    Separator,
}

/// Compose `base_uri + path`, then attach `identifier` according to `join`.
pub fn resource_url(
    base_uri: &str,
    path: &str,
    identifier: Option<&str>,
    join: IdentifierJoin,
) -> String {
    let id_len = identifier.map_or(0, |id| id.len() + 1);
    let mut url = String::with_capacity(base_uri.len() + path.len() + id_len);
    url.push_str(base_uri);
    url.push_str(path);
    match (identifier, join) {
        (Some(id), IdentifierJoin::Concat) => url.push_str(id),
        (Some(id), IdentifierJoin::Separator) => {
            url.push('/');
            url.push_str(id);
        }
        (_, IdentifierJoin::Omit) | (None, _) => {}
    }
    url
}

pub struct HttpEndpointClient<T = UreqTransport> {
    config: EndpointConfig,
    transport: T,
}

impl HttpEndpointClient<UreqTransport> {
    /// Client backed by a blocking ureq agent honouring `config.timeout()`.
    pub fn new(config: EndpointConfig) -> Result<Self> {
        let transport = UreqTransport::new(config.timeout());
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> HttpEndpointClient<T> {
    pub fn with_transport(config: EndpointConfig, transport: T) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn request(
        &self,
        method: HttpMethod,
        url: String,
        headers: Option<&HeaderSet>,
        body: Option<&str>,
    ) -> HttpRequest {
        HttpRequest {
            method,
            url,
            headers: merge(Some(self.config.default_headers()), headers),
            query: Vec::new(),
            body: body.map(str::to_string),
        }
    }

    fn url(&self, path: &str, identifier: Option<&str>, join: IdentifierJoin) -> String {
        resource_url(self.config.base_uri(), path, identifier, join)
    }

    pub fn build_post(&self, path: &str, body: &str, headers: Option<&HeaderSet>) -> HttpRequest {
        let url = self.url(path, None, IdentifierJoin::Omit);
        self.request(HttpMethod::Post, url, headers, Some(body))
    }

    /// Replaces the resource at `path`. The identifier does not take part in
    /// the URL; callers that need it there must put it in `path`.
    pub fn build_put(
        &self,
        path: &str,
        identifier: &str,
        body: &str,
        headers: Option<&HeaderSet>,
    ) -> HttpRequest {
        let url = self.url(path, Some(identifier), IdentifierJoin::Omit);
        self.request(HttpMethod::Put, url, headers, Some(body))
    }

    pub fn build_patch(
        &self,
        path: &str,
        identifier: &str,
        body: &str,
        headers: Option<&HeaderSet>,
    ) -> HttpRequest {
        let url = self.url(path, Some(identifier), IdentifierJoin::Separator);
        self.request(HttpMethod::Patch, url, headers, Some(body))
    }

    pub fn build_get(&self, path: &str, identifier: &str, headers: Option<&HeaderSet>) -> HttpRequest {
        let url = self.url(path, Some(identifier), IdentifierJoin::Concat);
        self.request(HttpMethod::Get, url, headers, None)
    }

    /// GET with a query string. `params` is mandatory: absent or empty is an
    /// `InvalidArgument`.
    pub fn build_get_with_params(
        &self,
        path: &str,
        headers: Option<&HeaderSet>,
        params: Option<&QueryParams>,
    ) -> Result<HttpRequest> {
        let params = match params {
            Some(p) if !p.is_empty() => p,
            _ => {
                return Err(Error::InvalidArgument(
                    "params is required for get_with_params and must not be empty".to_string(),
                ))
            }
        };
        let url = self.url(path, None, IdentifierJoin::Omit);
        let mut request = self.request(HttpMethod::Get, url, headers, None);
        request.query = params.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        Ok(request)
    }

    pub fn build_delete(
        &self,
        path: &str,
        identifier: &str,
        headers: Option<&HeaderSet>,
    ) -> HttpRequest {
        let url = self.url(path, Some(identifier), IdentifierJoin::Concat);
        self.request(HttpMethod::Delete, url, headers, None)
    }

    pub fn post(&self, path: &str, body: &str, headers: Option<&HeaderSet>) -> Result<HttpResponse> {
        self.dispatch(&self.build_post(path, body, headers))
    }

    pub fn put(
        &self,
        path: &str,
        identifier: &str,
        body: &str,
        headers: Option<&HeaderSet>,
    ) -> Result<HttpResponse> {
        self.dispatch(&self.build_put(path, identifier, body, headers))
    }

    pub fn patch(
        &self,
        path: &str,
        identifier: &str,
        body: &str,
        headers: Option<&HeaderSet>,
    ) -> Result<HttpResponse> {
        self.dispatch(&self.build_patch(path, identifier, body, headers))
    }

    pub fn get(&self, path: &str, identifier: &str, headers: Option<&HeaderSet>) -> Result<HttpResponse> {
        self.dispatch(&self.build_get(path, identifier, headers))
    }

    pub fn get_with_params(
        &self,
        path: &str,
        headers: Option<&HeaderSet>,
        params: Option<&QueryParams>,
    ) -> Result<HttpResponse> {
        let request = self.build_get_with_params(path, headers, params)?;
        self.dispatch(&request)
    }

    pub fn delete(&self, path: &str, identifier: &str, headers: Option<&HeaderSet>) -> Result<HttpResponse> {
        self.dispatch(&self.build_delete(path, identifier, headers))
    }

    fn dispatch(&self, request: &HttpRequest) -> Result<HttpResponse> {
        debug!(
            method = %request.method,
            url = %request.url,
            headers = request.headers.len(),
            query = request.query.len(),
            "dispatching request"
        );
        let response = self.transport.execute(request)?;
        debug!(method = %request.method, url = %request.url, status = response.status, "received response");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::error::TransportError;
    use crate::headers::header_set;

    /// Records every request and answers 200 with an empty body.
    #[derive(Default)]
    struct RecordingTransport {
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl RecordingTransport {
        fn requests(&self) -> Vec<HttpRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl Transport for RecordingTransport {
        fn execute(&self, request: &HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: String::new(),
            })
        }
    }

    fn client() -> HttpEndpointClient<RecordingTransport> {
        let config = EndpointConfig::new("http://h/")
            .with_header("accept", "application/json")
            .with_header("x-suite", "smoke");
        HttpEndpointClient::with_transport(config, RecordingTransport::default()).unwrap()
    }

    #[test]
    fn get_concatenates_identifier() {
        let c = client();
        c.get("items/", "42", None).unwrap();
        let req = &c.transport().requests()[0];
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://h/items/42");
        assert!(req.body.is_none());
    }

    #[test]
    fn delete_concatenates_identifier() {
        let c = client();
        c.delete("items/", "42", None).unwrap();
        let req = &c.transport().requests()[0];
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, "http://h/items/42");
    }

    #[test]
    fn patch_inserts_separator() {
        let c = client();
        c.patch("items", "42", r#"{"done":true}"#, None).unwrap();
        let req = &c.transport().requests()[0];
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(req.url, "http://h/items/42");
        assert_eq!(req.body.as_deref(), Some(r#"{"done":true}"#));
    }

    #[test]
    fn patch_separator_is_inserted_even_after_trailing_slash() {
        let req = client().build_patch("items/", "42", "", None);
        assert_eq!(req.url, "http://h/items//42");
    }

    #[test]
    fn put_leaves_identifier_out_of_url() {
        let c = client();
        c.put("items/", "42", "{}", None).unwrap();
        let req = &c.transport().requests()[0];
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "http://h/items/");
        assert_eq!(req.body.as_deref(), Some("{}"));
    }

    #[test]
    fn post_sends_raw_body_to_path() {
        let req = client().build_post("items/", "raw payload", None);
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://h/items/");
        assert_eq!(req.body.as_deref(), Some("raw payload"));
        assert!(req.query.is_empty());
    }

    #[test]
    fn per_call_headers_override_defaults() {
        let custom = header_set([("x-suite", "regression"), ("authorization", "Bearer t")]);
        let req = client().build_get("items/", "1", Some(&custom));
        assert_eq!(req.headers.len(), 3);
        assert_eq!(req.headers["x-suite"], "regression");
        assert_eq!(req.headers["accept"], "application/json");
        assert_eq!(req.headers["authorization"], "Bearer t");
    }

    #[test]
    fn defaults_survive_per_call_override() {
        let c = client();
        let custom = header_set([("x-suite", "regression")]);
        c.get("items/", "1", Some(&custom)).unwrap();
        c.get("items/", "1", None).unwrap();
        let reqs = c.transport().requests();
        assert_eq!(reqs[1].headers["x-suite"], "smoke");
        assert_eq!(c.config().default_headers()["x-suite"], "smoke");
    }

    #[test]
    fn get_with_params_requires_params() {
        let c = client();
        let err = c.get_with_params("search", None, None).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(c.transport().requests().is_empty(), "no request was dispatched");
    }

    #[test]
    fn get_with_params_rejects_empty_params() {
        let c = client();
        let err = c.get_with_params("search", None, Some(&QueryParams::new())).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(c.transport().requests().is_empty());
    }

    #[test]
    fn get_with_params_carries_query() {
        let c = client();
        let params = QueryParams::from([
            ("name".to_string(), "ada".to_string()),
            ("limit".to_string(), "10".to_string()),
        ]);
        c.get_with_params("search", None, Some(&params)).unwrap();
        let req = &c.transport().requests()[0];
        assert_eq!(req.url, "http://h/search");
        assert_eq!(
            req.query,
            vec![
                ("limit".to_string(), "10".to_string()),
                ("name".to_string(), "ada".to_string()),
            ]
        );
    }

    #[test]
    fn empty_base_uri_is_rejected() {
        let result = HttpEndpointClient::with_transport(EndpointConfig::new(""), RecordingTransport::default());
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn resource_url_rules() {
        assert_eq!(resource_url("http://h/", "a/", Some("1"), IdentifierJoin::Concat), "http://h/a/1");
        assert_eq!(resource_url("http://h/", "a", Some("1"), IdentifierJoin::Separator), "http://h/a/1");
        assert_eq!(resource_url("http://h/", "a/", Some("1"), IdentifierJoin::Omit), "http://h/a/");
        assert_eq!(resource_url("http://h/", "a/", None, IdentifierJoin::Separator), "http://h/a/");
    }
}
