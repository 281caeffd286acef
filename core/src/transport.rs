//! Execution of request descriptors over the network.

use log::{debug, trace};
use ureq::http::header::CONTENT_LENGTH;
use ureq::{Agent, Proxy};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes a descriptor and returns the status and buffered body.
///
/// Implementations report every status, including errors, as an
/// `HttpResponse`; only failures to obtain a response are `Err`.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// A transport based on [`ureq`].
///
/// Idle connections are never retained, so every request opens a fresh
/// connection.
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new(config: &ClientConfig) -> Self {
        let proxy = if config.proxy_from_env {
            Proxy::try_from_env()
        } else {
            None
        };
        let agent = Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .max_idle_connections(0)
            .max_idle_connections_per_host(0)
            .proxy(proxy)
            .http_status_as_error(false)
            .build()
            .new_agent();

        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        trace!("sending {} request to {}", request.method, request.url);

        let url = request.url.as_str();
        // The sized body determines content-length on the wire.
        let headers = request
            .headers
            .iter()
            .filter(|(name, _)| **name != CONTENT_LENGTH);

        let body = request.body.as_deref();
        let mut response = match request.method {
            HttpMethod::Get => headers
                .fold(self.agent.get(url), |builder, (name, value)| {
                    builder.header(name.clone(), value.clone())
                })
                .call(),
            HttpMethod::Post => {
                let builder = headers.fold(self.agent.post(url), |builder, (name, value)| {
                    builder.header(name.clone(), value.clone())
                });
                match body {
                    Some(body) => builder.send(body),
                    None => builder.send_empty(),
                }
            }
            HttpMethod::Put => {
                let builder = headers.fold(self.agent.put(url), |builder, (name, value)| {
                    builder.header(name.clone(), value.clone())
                });
                match body {
                    Some(body) => builder.send(body),
                    None => builder.send_empty(),
                }
            }
            HttpMethod::Delete => {
                let builder = headers.fold(self.agent.delete(url), |builder, (name, value)| {
                    builder.header(name.clone(), value.clone())
                });
                match body {
                    Some(body) => builder.force_send_body().send(body),
                    None => builder.call(),
                }
            }
        }?;

        let status = response.status().as_u16();
        trace!("got {status} response from {}", request.url);

        let body = match response.body_mut().with_config().limit(u64::MAX).read_to_vec() {
            Ok(body) => body,
            Err(e) if status != 200 => {
                debug!(
                    "discarding unreadable body of {status} response from {}: {e}",
                    request.url
                );
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(HttpResponse { status, body })
    }
}
