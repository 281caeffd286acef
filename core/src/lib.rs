//! Small blocking HTTP client bound to a base endpoint.
//!
//! # Overview
//! Builds request URLs from a path and a parameter map and sends GET, POST,
//! PUT and DELETE requests with form-encoded or JSON bodies. Response bodies
//! are returned as raw bytes; any status other than 200 is an error that
//! still carries the body.
//!
//! # Design
//! - `Params` holds caller values already resolved to text or JSON.
//! - `encode` produces the sorted `application/x-www-form-urlencoded` form.
//! - `Client` resolves every call into an `HttpRequest` first (`build_*`) and
//!   then runs it through a `Transport`; the default one is `ureq`-based with
//!   a 20 second timeout, no connection reuse and proxy settings from the
//!   environment.

pub mod client;
pub mod config;
pub mod encode;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::Client;
pub use config::{ClientConfig, HeaderPolicy};
pub use encode::encode;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{ParamValue, Params};
pub use ureq::http::{HeaderMap, HeaderName, HeaderValue};
