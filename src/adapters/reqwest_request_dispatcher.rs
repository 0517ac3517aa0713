use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;
use std::collections::BTreeMap;
use std::time::Duration;
use uuid::Uuid;

use crate::core::interfaces::adapters::RequestDispatcher;
use crate::core::models::{RequestDescriptor, RequestError, ResponsePayload, TransportSettings};
use crate::global_constants;

pub struct ReqwestRequestDispatcher {
    client: reqwest::Client,
    base_url: String,
    default_headers: HeaderMap,
    default_timeout_ms: u64,
}

impl ReqwestRequestDispatcher {
    pub fn build(settings: &TransportSettings) -> Result<Self> {
        let base_url = sanitize_base_url(&settings.base_url)?;
        let default_headers = build_header_map(&settings.headers)
            .map_err(|e| anyhow::anyhow!("invalid default header: {}", e.message))?;

        if settings.timeout_ms == 0 {
            anyhow::bail!("default timeout must be greater than zero");
        }

        let client = reqwest::Client::builder()
            .build()
            .context("failed to build HTTP client")?;

        log::info!(
            "[DISPATCH] Dispatcher ready: base_url={}, timeout={} ms",
            base_url,
            settings.timeout_ms
        );

        Ok(Self {
            client,
            base_url,
            default_headers,
            default_timeout_ms: settings.timeout_ms,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn resolve_url(&self, raw_url: &str) -> Result<Url, RequestError> {
        let raw_url = raw_url.trim();
        let full_url = if is_absolute_url(raw_url) {
            raw_url.to_string()
        } else {
            format!("{}/{}", self.base_url, raw_url.trim_start_matches('/'))
        };

        Url::parse(&full_url).map_err(|e| {
            RequestError::invalid_request(full_url.clone(), format!("invalid URL: {}", e))
        })
    }

    fn merge_headers(
        &self,
        descriptor: &RequestDescriptor,
        url: &str,
        request_id: &str,
    ) -> Result<HeaderMap, RequestError> {
        let mut headers = self.default_headers.clone();
        let overrides = build_header_map(descriptor.headers())
            .map_err(|e| RequestError::invalid_request(url, e.message))?;

        for (name, value) in overrides.iter() {
            headers.insert(name.clone(), value.clone());
        }

        if !headers.contains_key(global_constants::HEADER_REQUEST_ID) {
            if let Ok(value) = HeaderValue::from_str(request_id) {
                headers.insert(
                    HeaderName::from_static(global_constants::HEADER_REQUEST_ID),
                    value,
                );
            }
        }

        if descriptor.data().is_some() && !headers.contains_key(reqwest::header::CONTENT_TYPE) {
            headers.insert(
                reqwest::header::CONTENT_TYPE,
                HeaderValue::from_static(global_constants::CONTENT_TYPE_JSON),
            );
        }

        Ok(headers)
    }

    fn classify_error(url: &str, timeout_ms: u64, error: reqwest::Error) -> RequestError {
        if error.is_timeout() {
            RequestError::timeout(url, timeout_ms)
        } else if error.is_decode() {
            RequestError::serialization(url, error.to_string())
        } else {
            RequestError::network(url, describe_error_chain(&error))
        }
    }
}

#[async_trait]
impl RequestDispatcher for ReqwestRequestDispatcher {
    async fn dispatch(
        &self,
        descriptor: RequestDescriptor,
    ) -> Result<ResponsePayload, RequestError> {
        descriptor.validate()?;

        let url = self.resolve_url(descriptor.url())?;
        let url_text = url.to_string();
        let request_id = Uuid::new_v4().to_string();
        let headers = self.merge_headers(&descriptor, &url_text, &request_id)?;
        let timeout_ms = descriptor.timeout_ms().unwrap_or(self.default_timeout_ms);

        log::info!(
            "[DISPATCH] {} {} (request {})",
            descriptor.method(),
            url_text,
            request_id
        );

        let mut request = self
            .client
            .request(descriptor.method().into(), url)
            .headers(headers)
            .timeout(Duration::from_millis(timeout_ms));

        if let Some(data) = descriptor.data() {
            request = request.json(data);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Self::classify_error(&url_text, timeout_ms, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Self::classify_error(&url_text, timeout_ms, e))?;

        log::debug!(
            "[DISPATCH] Request {} finished with status {} ({} bytes)",
            request_id,
            status.as_u16(),
            body.len()
        );

        if !status.is_success() {
            log::warn!(
                "[DISPATCH] {} {} failed with status {}",
                descriptor.method(),
                url_text,
                status.as_u16()
            );
            return Err(RequestError::http_status(
                url_text,
                status.as_u16(),
                String::from_utf8_lossy(&body),
            ));
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(ResponsePayload::Null);
        }

        serde_json::from_slice(&body).map_err(|e| {
            RequestError::serialization(url_text, format!("response is not valid JSON: {}", e))
        })
    }
}

fn is_absolute_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn sanitize_base_url(base_url: &str) -> Result<String> {
    let mut base = base_url.trim().to_string();
    if !is_absolute_url(&base) {
        base = format!("http://{base}");
    }
    while base.ends_with('/') {
        base.pop();
    }
    Url::parse(&base).with_context(|| format!("invalid base URL: {}", base))?;
    Ok(base)
}

fn build_header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap, RequestError> {
    let mut header_map = HeaderMap::new();
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            RequestError::invalid_request("", format!("header name {:?}: {}", name, e))
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            RequestError::invalid_request("", format!("header {:?}: {}", name, e))
        })?;
        header_map.insert(header_name, header_value);
    }
    Ok(header_map)
}

fn describe_error_chain(error: &reqwest::Error) -> String {
    let mut description = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        description.push_str(": ");
        description.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    description
}
