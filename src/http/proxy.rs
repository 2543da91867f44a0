//! Proxy endpoint parsing

use std::fmt;

use log::{debug, warn};

use crate::utils::StringUtils;

/// Host and port of an HTTP proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyEndpoint {
    pub host: String,
    pub port: u16,
}

impl ProxyEndpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Parse `[credentials@]host:port`.
    ///
    /// Credentials are discarded. Anything that does not split into exactly
    /// one host and one port yields `None` without an error.
    pub fn parse(input: &str) -> Option<Self> {
        if StringUtils::is_blank(input) {
            return None;
        }

        let address = match input.rfind('@') {
            Some(at) => &input[at + 1..],
            None => input,
        };

        let mut parts: Vec<&str> = address.split(':').collect();
        while parts.last().is_some_and(|part| part.is_empty()) {
            parts.pop();
        }

        match parts.as_slice() {
            [host, port] => {
                let host = host.trim();
                // ":8080" passes the arity check but still applies no proxy.
                if host.is_empty() {
                    debug!("Ignoring proxy '{}' without host", address);
                    return None;
                }
                match port.trim().parse::<u16>() {
                    Ok(port) => Some(Self::new(host, port)),
                    Err(e) => {
                        warn!("Ignoring proxy '{}': invalid port: {}", address, e);
                        None
                    }
                }
            }
            _ => {
                debug!("Ignoring proxy '{}': expected host:port", address);
                None
            }
        }
    }

    /// Proxy URL understood by the transport.
    pub fn to_url(&self) -> String {
        format!("http://{}", self)
    }
}

impl fmt::Display for ProxyEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
