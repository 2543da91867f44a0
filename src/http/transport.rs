//! Transports that turn a [`Request`] into a [`Response`].

use std::io::Read;

use log::debug;
use reqwest::blocking::{Client, ClientBuilder};
use reqwest::header::{COOKIE, REFERER, USER_AGENT};
use reqwest::redirect::Policy;
use reqwest::Method;

use super::request::Request;
use super::response::Response;
use crate::config::HttpMethod;
use crate::error::TransportError;

const MAX_REDIRECTS: usize = 20;

/// Performs a single blocking attempt. Retrying is the caller's business.
#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    fn execute(&self, request: &Request) -> Result<Response, TransportError>;
}

/// Transport backed by a blocking reqwest client built per request.
///
/// Without a configured proxy, reqwest falls back to the system proxy
/// environment variables.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport;

impl ReqwestTransport {
    pub fn new() -> Self {
        Self
    }

    fn client(&self, request: &Request) -> Result<Client, TransportError> {
        let timeout = Some(request.timeout()).filter(|timeout| !timeout.is_zero());
        let mut builder = ClientBuilder::new()
            .timeout(timeout)
            .redirect(Policy::limited(MAX_REDIRECTS));

        if let Some(proxy) = request.proxy() {
            builder = builder.proxy(reqwest::Proxy::all(proxy.to_url())?);
        }

        Ok(builder.build()?)
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: &Request) -> Result<Response, TransportError> {
        let client = self.client(request)?;

        let mut builder = client
            .request(to_reqwest_method(request.method()), request.url().clone())
            .header(USER_AGENT, request.user_agent());

        if let Some(referrer) = request.referrer() {
            builder = builder.header(REFERER, referrer);
        }

        for (name, value) in request.headers() {
            builder = builder.header(name, value);
        }

        if let Some(cookies) = request.cookie_header() {
            builder = builder.header(COOKIE, cookies);
        }

        if !request.data().is_empty() {
            builder = if request.method().has_body() {
                builder.form(request.data())
            } else {
                builder.query(request.data())
            };
        }

        debug!("{} {}", request.method(), request.url());
        let response = builder.send()?;

        let url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();

        if !request.ignore_content_type() {
            if let Some(content_type) = headers
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
            {
                if !is_parseable_content_type(content_type) {
                    return Err(TransportError::UnsupportedContentType {
                        content_type: content_type.to_string(),
                        url: url.to_string(),
                    });
                }
            }
        }

        let mut body = Vec::new();
        match request.max_body_size() {
            Some(limit) => {
                response.take(limit as u64).read_to_end(&mut body)?;
            }
            None => {
                let mut response = response;
                response.read_to_end(&mut body)?;
            }
        }
        debug!("{} {} ({} bytes)", status, url, body.len());

        Ok(Response::new(url, status, headers, body))
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Head => Method::HEAD,
        HttpMethod::Options => Method::OPTIONS,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Trace => Method::TRACE,
    }
}

/// Text and XML types can be parsed into a document; anything else needs
/// `ignore_content_type`.
fn is_parseable_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence.starts_with("text/") || (essence.starts_with("application/") && essence.ends_with("xml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_and_xml_types_are_parseable() {
        assert!(is_parseable_content_type("text/html"));
        assert!(is_parseable_content_type("text/plain; charset=utf-8"));
        assert!(is_parseable_content_type("application/xhtml+xml"));
        assert!(is_parseable_content_type("Application/XML"));
        assert!(is_parseable_content_type("application/rss+xml; charset=utf-8"));
    }

    #[test]
    fn binary_and_json_types_are_not_parseable() {
        assert!(!is_parseable_content_type("application/json"));
        assert!(!is_parseable_content_type("image/jpeg"));
        assert!(!is_parseable_content_type("application/octet-stream"));
    }

    #[test]
    fn methods_map_to_reqwest() {
        assert_eq!(to_reqwest_method(HttpMethod::Get), Method::GET);
        assert_eq!(to_reqwest_method(HttpMethod::Post), Method::POST);
        assert_eq!(to_reqwest_method(HttpMethod::Trace), Method::TRACE);
    }
}
