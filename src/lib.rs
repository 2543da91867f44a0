//! ripper-http - HTTP requests for page rippers
//!
//! This crate provides a fluent request builder that retries failed
//! attempts a configurable number of times, routes https traffic through a
//! configured proxy, and parses responses into HTML documents or JSON.

pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod utils;

pub use config::{ConfigProvider, HttpMethod, HttpSettings, PropertiesConfig};
pub use error::{HttpError, Result, TransportError};
pub use http::{Document, Http, Response};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
