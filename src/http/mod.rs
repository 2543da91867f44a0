//! HTTP request builder module
//!
//! [`Http`] collects the options of a single request, executes it against a
//! [`Transport`] with a bounded number of attempts, and parses the result.
//!
//! ```no_run
//! use ripper_http::http::Http;
//!
//! # fn main() -> ripper_http::Result<()> {
//! let page = Http::url("https://example.com/gallery")?
//!     .referrer("https://example.com/")
//!     .retries(3)
//!     .get()?;
//! # let _ = page;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use log::{debug, warn};
use serde_json::{Map, Value};
use url::Url;

use crate::config::{HttpMethod, HttpSettings};
use crate::error::{HttpError, Result};
use crate::utils::UrlUtils;

pub mod proxy;
pub mod request;
pub mod response;
pub mod transport;

pub use proxy::ProxyEndpoint;
pub use request::Request;
pub use response::{Document, Response};
pub use transport::{ReqwestTransport, Transport};

/// Fluent builder for one outbound request.
///
/// Setters take and return the builder by value; the execute methods consume
/// it, so a builder runs at most once.
pub struct Http<T: Transport = ReqwestTransport> {
    /// URL as given by the caller, used in failure messages.
    target: String,
    request: Request,
    retries: u32,
    transport: T,
}

impl Http<ReqwestTransport> {
    /// Builder for `url` with default settings. A missing scheme means http.
    pub fn url(url: &str) -> Result<Self> {
        let mut http = Self::from_url(UrlUtils::validate_url(url)?);
        http.target = url.to_string();
        Ok(http)
    }

    pub fn from_url(url: Url) -> Self {
        Self::with_settings(url, &HttpSettings::default())
    }

    pub fn with_settings(url: Url, settings: &HttpSettings) -> Self {
        Self::with_transport(url, settings, ReqwestTransport::new())
    }
}

impl<T: Transport> Http<T> {
    /// Builder for `url` executing through `transport`.
    ///
    /// The https proxy from `settings` only applies to https targets.
    pub fn with_transport(url: Url, settings: &HttpSettings, transport: T) -> Self {
        let mut request = Request::new(url, settings);
        if UrlUtils::is_secure(request.url()) {
            debug!("url is https, setting proxy from configuration");
            request.proxy = settings
                .https_proxy
                .as_deref()
                .and_then(ProxyEndpoint::parse);
        } else {
            debug!("url is not https, leaving proxy to the environment");
        }

        Self {
            target: request.url().to_string(),
            request,
            retries: settings.retries,
            transport,
        }
    }

    /// Per-attempt timeout. Zero disables it.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.request.timeout = timeout;
        self
    }

    /// Accept any response content type.
    pub fn ignore_content_type(mut self) -> Self {
        self.request.ignore_content_type = true;
        self
    }

    /// Accepts a string or a [`Url`].
    pub fn referrer(mut self, referrer: impl AsRef<str>) -> Self {
        self.request.referrer = Some(referrer.as_ref().to_string());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.request.user_agent = user_agent.into();
        self
    }

    /// Number of attempts made by the execute methods.
    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Set a header, replacing any existing header of the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.request
            .headers
            .retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
        self.request.headers.insert(name, value.into());
        self
    }

    pub fn cookies<I, K, V>(mut self, cookies: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.request
            .cookies
            .extend(cookies.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Append form data: query string for GET-like methods, body otherwise.
    pub fn data<I, K, V>(mut self, data: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.request
            .data
            .extend(data.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Append one form data entry.
    pub fn data_entry(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.data([(name.into(), value.into())])
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.request.method = method;
        self
    }

    /// Truncate bodies beyond `bytes`. Zero means unlimited.
    pub fn max_body_size(mut self, bytes: usize) -> Self {
        self.request.max_body_size = (bytes > 0).then_some(bytes);
        self
    }

    /// The configured request.
    pub fn connection(&self) -> &Request {
        &self.request
    }

    /// GET the page and parse it as HTML.
    pub fn get(self) -> Result<Document> {
        let response = self.method(HttpMethod::Get).response()?;
        Ok(response.parse())
    }

    /// POST the form data and parse the reply as HTML.
    pub fn post(self) -> Result<Document> {
        let response = self.method(HttpMethod::Post).response()?;
        Ok(response.parse())
    }

    /// Fetch the body as a JSON object, whatever content type is declared.
    pub fn get_json(self) -> Result<Map<String, Value>> {
        let body = self.ignore_content_type().response()?.body();
        Ok(serde_json::from_str(&body)?)
    }

    /// Execute the request, making up to `retries` attempts.
    ///
    /// Every transport fault counts as a failed attempt. Once all attempts
    /// fail, the last fault is returned as the source of
    /// [`HttpError::RetriesExhausted`]. With zero retries nothing is sent and
    /// the error has no source.
    pub fn response(self) -> Result<Response> {
        let url = self.target;
        let mut last_error = None;

        for attempt in 1..=self.retries {
            match self.transport.execute(&self.request) {
                Ok(response) => return Ok(response),
                Err(e) => {
                    warn!(
                        "Error while loading {} (attempt {}/{}): {}",
                        url, attempt, self.retries, e
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(HttpError::RetriesExhausted {
            url,
            attempts: self.retries,
            source: last_error,
        })
    }
}
