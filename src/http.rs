//! Blocking HTTP transport for the Routific API.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::traits::Transport;

/// Per-request timeout. Each call returns quickly even while a long job runs.
pub const DEFAULT_TIMEOUT_SECS: u64 = 3;

/// Default user agent for API requests.
pub const DEFAULT_USER_AGENT: &str = concat!("routific-rs/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    config: HttpConfig,
    client: Client,
}

impl HttpTransport {
    pub fn new(config: HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(Error::Build)?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }
}

impl HttpTransport {
    fn post_request(&self, url: &str, token: &str, body: Vec<u8>) -> RequestBuilder {
        self.client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, bearer(token))
            .body(body)
    }

    fn get_request(&self, url: &str, token: &str) -> RequestBuilder {
        self.client.get(url).header(AUTHORIZATION, bearer(token))
    }
}

impl Transport for HttpTransport {
    fn post(&self, url: &str, token: &str, body: Vec<u8>) -> Result<String> {
        debug!(url, bytes = body.len(), "POST");
        let response = self
            .post_request(url, token, body)
            .send()
            .map_err(|source| transport_error(url, source))?;

        read_body(url, response)
    }

    fn get(&self, url: &str, token: &str) -> Result<String> {
        debug!(url, "GET");
        let response = self
            .get_request(url, token)
            .send()
            .map_err(|source| transport_error(url, source))?;

        read_body(url, response)
    }
}

/// Serialize `payload` to JSON and POST it through `transport`.
pub fn post_json<T, P>(transport: &T, url: &str, token: &str, payload: &P) -> Result<String>
where
    T: Transport + ?Sized,
    P: Serialize + ?Sized,
{
    let body = serde_json::to_vec(payload).map_err(Error::Serialize)?;
    transport.post(url, token, body)
}

fn bearer(token: &str) -> String {
    format!("bearer {token}")
}

fn transport_error(url: &str, source: reqwest::Error) -> Error {
    Error::Transport {
        url: url.to_string(),
        source,
    }
}

fn read_body(url: &str, response: Response) -> Result<String> {
    check_status(url, response.status())?;
    response.text().map_err(|source| transport_error(url, source))
}

/// Only 200 and 202 carry a usable body.
fn check_status(url: &str, status: StatusCode) -> Result<()> {
    if status == StatusCode::OK || status == StatusCode::ACCEPTED {
        return Ok(());
    }

    debug!(url, status = status.as_u16(), "rejected response");
    Err(Error::Status {
        url: url.to_string(),
        status: status.as_u16(),
    })
}
