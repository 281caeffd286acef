//! Blocking HTTP client bound to a base endpoint.
//!
//! # Design
//! Each operation is split into a `build_*` method that resolves an
//! `HttpRequest` from the path, parameters and headers, and `send`, which runs
//! it through the `Transport` and maps the status. `Client` holds no per-call
//! state, so one instance can be cloned and shared across threads.

use std::sync::Arc;

use log::debug;
use serde_json::Value;
use ureq::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use ureq::http::{HeaderMap, HeaderValue, StatusCode};
use url::Url;

use crate::config::ClientConfig;
use crate::encode::encode;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::Params;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Clone)]
pub struct Client {
    endpoint: Url,
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Create a client for `endpoint` with the default configuration.
    ///
    /// Trailing slashes are removed before parsing. Fails with
    /// [`ApiError::InvalidEndpoint`] when the result is not an absolute URL.
    pub fn new(endpoint: &str) -> Result<Self, ApiError> {
        Self::with_config(endpoint, ClientConfig::default())
    }

    pub fn with_config(endpoint: &str, config: ClientConfig) -> Result<Self, ApiError> {
        let transport = Arc::new(UreqTransport::new(&config));
        Self::with_transport(endpoint, config, transport)
    }

    pub fn with_transport(
        endpoint: &str,
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ApiError> {
        let endpoint = Url::parse(endpoint.trim_end_matches('/'))?;
        if endpoint.cannot_be_a_base() {
            return Err(ApiError::InvalidEndpoint(format!(
                "{endpoint} cannot carry a path"
            )));
        }

        Ok(Self {
            endpoint,
            config,
            transport,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Append `path` to the endpoint path and set the encoded `params` as the
    /// query.
    ///
    /// Slashes are not normalized: `path` is expected to start with `/`.
    pub fn build_request_url(&self, path: &str, params: Option<&Params>) -> Url {
        let query = params.map(encode).unwrap_or_default();
        self.join(path, &query)
    }

    /// Like [`build_request_url`](Self::build_request_url) but with a
    /// pre-formatted query string, used when the parameter order matters.
    pub fn build_request_url_raw(&self, path: &str, raw_query: &str) -> Url {
        self.join(path, raw_query)
    }

    fn join(&self, path: &str, query: &str) -> Url {
        let joined = format!("{}{path}", self.endpoint.path().trim_end_matches('/'));
        let mut url = self.endpoint.clone();
        url.set_path(&joined);
        url.set_query((!query.is_empty()).then_some(query));
        url
    }

    pub fn build_get(
        &self,
        path: &str,
        params: Option<&Params>,
        headers: Option<&HeaderMap>,
    ) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.build_request_url(path, params),
            headers: self.config.resolve_headers(headers),
            body: None,
        }
    }

    pub fn build_get_raw(
        &self,
        path: &str,
        raw_query: &str,
        headers: Option<&HeaderMap>,
    ) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.build_request_url_raw(path, raw_query),
            headers: self.config.resolve_headers(headers),
            body: None,
        }
    }

    pub fn build_form(
        &self,
        method: HttpMethod,
        path: &str,
        params: Option<&Params>,
        headers: Option<&HeaderMap>,
    ) -> HttpRequest {
        let body = params.map(encode).unwrap_or_default();
        self.build_with_body(method, path, headers, body.into_bytes(), FORM_CONTENT_TYPE)
    }

    /// Form request whose body is already encoded by the caller.
    pub fn build_form_string(
        &self,
        method: HttpMethod,
        path: &str,
        body: &str,
        headers: Option<&HeaderMap>,
    ) -> HttpRequest {
        self.build_with_body(method, path, headers, body.as_bytes().to_vec(), FORM_CONTENT_TYPE)
    }

    /// JSON request whose body is the object view of `params`. Absent params
    /// produce `{}`.
    pub fn build_json(
        &self,
        method: HttpMethod,
        path: &str,
        params: Option<&Params>,
        headers: Option<&HeaderMap>,
    ) -> Result<HttpRequest, ApiError> {
        let object = params.map(Params::to_json_object).unwrap_or_default();
        let body = serde_json::to_vec(&Value::Object(object))
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.build_with_body(method, path, headers, body, JSON_CONTENT_TYPE))
    }

    fn build_with_body(
        &self,
        method: HttpMethod,
        path: &str,
        headers: Option<&HeaderMap>,
        body: Vec<u8>,
        content_type: &'static str,
    ) -> HttpRequest {
        let mut headers = self.config.resolve_headers(headers);
        let body = if body.is_empty() {
            None
        } else {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
            headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
            Some(body)
        };

        HttpRequest {
            method,
            url: self.build_request_url(path, None),
            headers,
            body,
        }
    }

    /// Execute `request` and return the body of a 200 response.
    pub fn send(&self, request: HttpRequest) -> Result<Vec<u8>, ApiError> {
        let response = self.transport.execute(&request)?;
        check_status(&request, response)
    }

    pub fn get(
        &self,
        path: &str,
        params: Option<&Params>,
        headers: Option<&HeaderMap>,
    ) -> Result<Vec<u8>, ApiError> {
        self.send(self.build_get(path, params, headers))
    }

    pub fn get_raw(
        &self,
        path: &str,
        raw_query: &str,
        headers: Option<&HeaderMap>,
    ) -> Result<Vec<u8>, ApiError> {
        self.send(self.build_get_raw(path, raw_query, headers))
    }

    pub fn post_form(
        &self,
        path: &str,
        params: Option<&Params>,
        headers: Option<&HeaderMap>,
    ) -> Result<Vec<u8>, ApiError> {
        self.send(self.build_form(HttpMethod::Post, path, params, headers))
    }

    pub fn put_form(
        &self,
        path: &str,
        params: Option<&Params>,
        headers: Option<&HeaderMap>,
    ) -> Result<Vec<u8>, ApiError> {
        self.send(self.build_form(HttpMethod::Put, path, params, headers))
    }

    pub fn delete_form(
        &self,
        path: &str,
        params: Option<&Params>,
        headers: Option<&HeaderMap>,
    ) -> Result<Vec<u8>, ApiError> {
        self.send(self.build_form(HttpMethod::Delete, path, params, headers))
    }

    pub fn post_form_string(
        &self,
        path: &str,
        body: &str,
        headers: Option<&HeaderMap>,
    ) -> Result<Vec<u8>, ApiError> {
        self.send(self.build_form_string(HttpMethod::Post, path, body, headers))
    }

    pub fn put_form_string(
        &self,
        path: &str,
        body: &str,
        headers: Option<&HeaderMap>,
    ) -> Result<Vec<u8>, ApiError> {
        self.send(self.build_form_string(HttpMethod::Put, path, body, headers))
    }

    pub fn delete_form_string(
        &self,
        path: &str,
        body: &str,
        headers: Option<&HeaderMap>,
    ) -> Result<Vec<u8>, ApiError> {
        self.send(self.build_form_string(HttpMethod::Delete, path, body, headers))
    }

    pub fn post_json(
        &self,
        path: &str,
        params: Option<&Params>,
        headers: Option<&HeaderMap>,
    ) -> Result<Vec<u8>, ApiError> {
        self.send(self.build_json(HttpMethod::Post, path, params, headers)?)
    }

    pub fn put_json(
        &self,
        path: &str,
        params: Option<&Params>,
        headers: Option<&HeaderMap>,
    ) -> Result<Vec<u8>, ApiError> {
        self.send(self.build_json(HttpMethod::Put, path, params, headers)?)
    }

    pub fn delete_json(
        &self,
        path: &str,
        params: Option<&Params>,
        headers: Option<&HeaderMap>,
    ) -> Result<Vec<u8>, ApiError> {
        self.send(self.build_json(HttpMethod::Delete, path, params, headers)?)
    }
}

/// Only 200 is a success; any other status keeps the body in the error.
fn check_status(request: &HttpRequest, response: HttpResponse) -> Result<Vec<u8>, ApiError> {
    if response.status == 200 {
        return Ok(response.body);
    }

    debug!(
        "{} {} returned {}: {}",
        request.method,
        request.url,
        response.status,
        String::from_utf8_lossy(&response.body)
    );
    let reason = StatusCode::from_u16(response.status)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or_default()
        .to_string();

    Err(ApiError::Status {
        status: response.status,
        reason,
        body: response.body,
    })
}
