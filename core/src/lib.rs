//! Test-support toolkit for exercising HTTP services.
//!
//! # Overview
//! - `HttpEndpointClient` issues GET/POST/PUT/PATCH/DELETE against a base URI,
//!   merging per-call headers over configured defaults.
//! - `FixtureRenderer` turns `.jt` templates into JSON fixture files.
//! - `TransientStore` passes string values between test steps through an
//!   external Redis-compatible service.
//! - `random_identifier` produces hyphen-free UUIDs for test data.
//!
//! # Design
//! - Everything is blocking; nothing is shared or mutated between calls, so
//!   separate clients can be driven from separate threads.
//! - Requests are built as plain data (`build_*`) and executed by a
//!   `Transport`, keeping URL and header rules testable without a server.
//! - The library only emits `tracing` events; installing a subscriber is up
//!   to the test binary.

pub mod client;
pub mod config;
pub mod error;
pub mod fixture;
pub mod headers;
pub mod http;
pub mod ident;
pub mod store;
pub mod transport;

pub use client::{resource_url, HttpEndpointClient, IdentifierJoin, QueryParams};
pub use config::{EndpointConfig, StoreConfig};
pub use error::{Error, FixtureError, Result, TransportError};
pub use fixture::{json_file_to_string, FixtureRenderer, FixtureRequest};
pub use headers::{header_set, merge, HeaderSet};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use ident::random_identifier;
pub use store::{TransientStore, ABSENT_SENTINEL, SET_ACK};
pub use transport::{Transport, UreqTransport};
