//! Endpoint addresses and the ordered registry.
//!
//! # Responsibilities
//! - Parse configured endpoint strings into dialable targets
//! - Hold the ordered candidate list, immutable after construction
//!
//! # Design Decisions
//! - Earlier entries are preferred; order is the failover priority
//! - Bare "host:port" entries are accepted alongside full URLs

use std::fmt;

use thiserror::Error;
use url::Url;

/// Errors produced while parsing an endpoint address.
#[derive(Debug, Error)]
pub enum EndpointParseError {
    #[error("{0}")]
    Invalid(#[from] url::ParseError),

    #[error("missing host")]
    MissingHost,

    #[error("missing port")]
    MissingPort,
}

/// A single candidate network address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    raw: String,
    host: String,
    port: u16,
}

impl Endpoint {
    /// Parse an endpoint from a URL or a bare "host:port" pair.
    pub fn parse(address: &str) -> Result<Self, EndpointParseError> {
        // Bare host:port entries get a tcp scheme so the URL parser
        // accepts them.
        let normalized = if address.contains("://") {
            address.to_string()
        } else {
            format!("tcp://{}", address)
        };

        let url = Url::parse(&normalized)?;
        let host = url
            .host_str()
            .ok_or(EndpointParseError::MissingHost)?
            .trim_start_matches('[')
            .trim_end_matches(']')
            .to_string();
        let port = url
            .port_or_known_default()
            .ok_or(EndpointParseError::MissingPort)?;

        Ok(Self {
            raw: address.to_string(),
            host,
            port,
        })
    }

    /// The configured address string, as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Host to dial.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port to dial.
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Ordered sequence of candidate endpoints.
///
/// The sequence is fixed at construction. The connector walks it with a
/// cursor it owns; nothing here mutates after `new`.
#[derive(Debug, Default)]
pub struct EndpointRegistry {
    endpoints: Vec<Endpoint>,
}

impl EndpointRegistry {
    pub fn new(endpoints: Vec<Endpoint>) -> Self {
        Self { endpoints }
    }

    /// Build a registry from configured address strings.
    ///
    /// Invalid entries are logged and skipped; validation reports them
    /// before this point for file-loaded configs.
    pub fn from_addresses(addresses: &[String]) -> Self {
        let mut endpoints = Vec::with_capacity(addresses.len());
        for address in addresses {
            match Endpoint::parse(address) {
                Ok(endpoint) => endpoints.push(endpoint),
                Err(e) => {
                    tracing::warn!(address = %address, error = %e, "Ignoring invalid endpoint address");
                }
            }
        }
        Self { endpoints }
    }

    pub fn get(&self, index: usize) -> Option<&Endpoint> {
        self.endpoints.get(index)
    }

    pub fn as_slice(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
