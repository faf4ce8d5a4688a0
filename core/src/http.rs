//! HTTP adapter for stores reached over the network.
//!
//! # Design
//! The core still does no I/O. `HttpStore` turns each store command into a
//! `StoreRequest` (plain data: URL, body, timeout) and hands it to a
//! caller-supplied transport, which performs the round-trip and returns a
//! `StoreResponse`. Status interpretation stays here so every transport maps
//! failures the same way.

use std::time::Duration;

use crate::error::BoardError;
use crate::store::StoreClient;

/// Where the store lives and how long a call may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub base_url: String,
    /// `None` blocks until the store answers.
    pub timeout: Option<Duration>,
}

impl StoreConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A store command described as a `POST` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreRequest {
    pub url: String,
    pub body: String,
    /// The transport must give up after this long and report an error.
    pub timeout: Option<Duration>,
}

/// What the transport got back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreResponse {
    pub status: u16,
    pub body: String,
}

/// `StoreClient` over a host-provided HTTP transport.
pub struct HttpStore<T> {
    config: StoreConfig,
    transport: T,
}

impl<T> HttpStore<T>
where
    T: FnMut(StoreRequest) -> Result<StoreResponse, BoardError>,
{
    pub fn new(config: StoreConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn build_request(&self, command: &str) -> StoreRequest {
        StoreRequest {
            url: format!("{}/command", self.config.base_url),
            body: command.to_string(),
            timeout: self.config.timeout,
        }
    }
}

impl<T> StoreClient for HttpStore<T>
where
    T: FnMut(StoreRequest) -> Result<StoreResponse, BoardError>,
{
    fn run_command(&mut self, command: &str) -> Result<String, BoardError> {
        let request = self.build_request(command);
        let response = (self.transport)(request)?;
        check_status(response)
    }
}

/// Map non-200 answers to `StoreUnavailable`.
fn check_status(response: StoreResponse) -> Result<String, BoardError> {
    if response.status == 200 {
        return Ok(response.body);
    }
    Err(BoardError::StoreUnavailable(format!(
        "HTTP {}: {}",
        response.status,
        response.body.trim()
    )))
}
