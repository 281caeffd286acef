//! Per-client settings: timeout, proxy and header handling.

use std::time::Duration;

use ureq::http::HeaderMap;

/// Total time budget of a single call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// How headers passed to a call combine with [`ClientConfig::default_headers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderPolicy {
    /// Caller headers, when given, are used instead of the defaults.
    #[default]
    Replace,
    /// Defaults first, then caller headers overwrite them name by name.
    Merge,
}

/// Configuration for `Client`.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    /// Read `HTTP_PROXY`, `HTTPS_PROXY` and `ALL_PROXY` from the environment.
    pub proxy_from_env: bool,
    pub header_policy: HeaderPolicy,
    pub default_headers: HeaderMap,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            proxy_from_env: true,
            header_policy: HeaderPolicy::default(),
            default_headers: HeaderMap::new(),
        }
    }
}

impl ClientConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_proxy_from_env(mut self, enabled: bool) -> Self {
        self.proxy_from_env = enabled;
        self
    }

    pub fn with_header_policy(mut self, policy: HeaderPolicy) -> Self {
        self.header_policy = policy;
        self
    }

    pub fn with_default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = headers;
        self
    }

    /// Headers for a call given the caller's optional set.
    pub fn resolve_headers(&self, headers: Option<&HeaderMap>) -> HeaderMap {
        match (self.header_policy, headers) {
            (_, None) => self.default_headers.clone(),
            (HeaderPolicy::Replace, Some(headers)) => headers.clone(),
            (HeaderPolicy::Merge, Some(headers)) => {
                let mut merged = self.default_headers.clone();
                for name in headers.keys() {
                    merged.remove(name);
                }
                for (name, value) in headers {
                    merged.append(name.clone(), value.clone());
                }
                merged
            }
        }
    }
}
