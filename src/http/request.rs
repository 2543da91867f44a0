//! HTTP request state

use std::collections::HashMap;
use std::time::Duration;

use url::Url;

use super::proxy::ProxyEndpoint;
use crate::config::{HttpMethod, HttpSettings};

/// Everything a transport needs to perform one request.
///
/// Mutated only through [`Http`](super::Http); transports and callers see it
/// read-only.
#[derive(Debug, Clone)]
pub struct Request {
    url: Url,
    pub(crate) method: HttpMethod,
    pub(crate) timeout: Duration,
    pub(crate) max_body_size: Option<usize>,
    pub(crate) user_agent: String,
    pub(crate) referrer: Option<String>,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) cookies: HashMap<String, String>,
    pub(crate) data: Vec<(String, String)>,
    pub(crate) proxy: Option<ProxyEndpoint>,
    pub(crate) ignore_content_type: bool,
}

impl Request {
    pub(crate) fn new(url: Url, settings: &HttpSettings) -> Self {
        Self {
            url,
            method: HttpMethod::Get,
            timeout: settings.timeout,
            max_body_size: None,
            user_agent: settings.user_agent.clone(),
            referrer: None,
            headers: HashMap::new(),
            cookies: HashMap::new(),
            data: Vec::new(),
            proxy: None,
            ignore_content_type: false,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Zero means no timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `None` reads the whole body.
    pub fn max_body_size(&self) -> Option<usize> {
        self.max_body_size
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn referrer(&self) -> Option<&str> {
        self.referrer.as_deref()
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn cookies(&self) -> &HashMap<String, String> {
        &self.cookies
    }

    /// Form data in insertion order.
    pub fn data(&self) -> &[(String, String)] {
        &self.data
    }

    pub fn proxy(&self) -> Option<&ProxyEndpoint> {
        self.proxy.as_ref()
    }

    pub fn ignore_content_type(&self) -> bool {
        self.ignore_content_type
    }

    /// Value for the `Cookie` header, or `None` without cookies.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        let mut pairs: Vec<_> = self.cookies.iter().collect();
        pairs.sort();
        Some(
            pairs
                .into_iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}
