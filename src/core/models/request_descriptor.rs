use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::models::{HttpMethod, RequestError};

/// Describes one outbound call. Built once, then handed by value to a
/// dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    url: String,
    method: HttpMethod,
    data: Option<serde_json::Value>,
    headers: BTreeMap<String, String>,
    timeout_ms: Option<u64>,
}

impl RequestDescriptor {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            data: None,
            headers: BTreeMap::new(),
            timeout_ms: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    pub fn with_json<P: Serialize + ?Sized>(mut self, payload: &P) -> Result<Self, RequestError> {
        let value = serde_json::to_value(payload).map_err(|e| {
            RequestError::serialization(
                self.url.clone(),
                format!("failed to encode request payload: {}", e),
            )
        })?;
        self.data = Some(value);
        Ok(self)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn data(&self) -> Option<&serde_json::Value> {
        self.data.as_ref()
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn timeout_ms(&self) -> Option<u64> {
        self.timeout_ms
    }

    pub fn validate(&self) -> Result<(), RequestError> {
        if self.url.trim().is_empty() {
            return Err(RequestError::invalid_request(
                self.url.clone(),
                "request URL must not be empty",
            ));
        }

        if self.data.is_some() && !self.method.allows_body() {
            return Err(RequestError::invalid_request(
                self.url.clone(),
                format!("{} requests cannot carry a body", self.method),
            ));
        }

        if self.timeout_ms == Some(0) {
            return Err(RequestError::invalid_request(
                self.url.clone(),
                "timeout must be greater than zero",
            ));
        }

        Ok(())
    }
}
