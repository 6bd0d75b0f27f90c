//! The user source: where the raw records come from.
//!
//! The session only depends on [`UserSource`]. [`HttpUserSource`] is the production
//! implementation; tests use `test_utils::StaticSource`.

use crate::config::SessionConfig;
use crate::error::{Error, Result};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde_json::Value;
use std::time::Duration;

pub trait UserSource {
    /// Fetches the raw user entries. Entries are validated by the caller.
    fn fetch(&self) -> Result<Vec<Value>>;
}

/// GETs the users listing over HTTP with a fixed total timeout.
pub struct HttpUserSource {
    client: Client,
    endpoint: String,
}

impl HttpUserSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(map_transport_error)?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        Self::new(config.endpoint.clone(), config.timeout)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl UserSource for HttpUserSource {
    fn fetch(&self) -> Result<Vec<Value>> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::FetchHttp(status.as_u16()));
        }

        let body = response.bytes().map_err(map_transport_error)?;
        parse_body(&body)
    }
}

/// The listing must be a JSON array; its entries are checked later by the validator.
pub fn parse_body(body: &[u8]) -> Result<Vec<Value>> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Array(entries)) => Ok(entries),
        Ok(other) => Err(Error::InvalidResponse(format!(
            "expected a JSON array, got {}",
            kind_of(&other)
        ))),
        Err(e) => Err(Error::InvalidResponse(e.to_string())),
    }
}

fn map_transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::FetchTimeout
    } else if let Some(status) = err.status() {
        Error::FetchHttp(status.as_u16())
    } else if err.is_decode() || err.is_body() {
        Error::InvalidResponse(err.to_string())
    } else {
        Error::FetchConnection(err.to_string())
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
