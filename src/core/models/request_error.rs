use thiserror::Error;

use crate::global_constants;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestErrorKind {
    /// No response was received.
    Network,
    HttpStatus { status: u16, body: String },
    Timeout,
    Serialization,
    Cancelled,
    /// Rejected before any I/O took place.
    InvalidRequest,
}

#[derive(Debug, Clone, Error)]
#[error("{} for {url}: {message}", kind_label(.kind))]
pub struct RequestError {
    pub kind: RequestErrorKind,
    pub url: String,
    pub message: String,
}

fn kind_label(kind: &RequestErrorKind) -> String {
    match kind {
        RequestErrorKind::Network => "network error".to_string(),
        RequestErrorKind::HttpStatus { status, .. } => format!("http status {}", status),
        RequestErrorKind::Timeout => "timeout".to_string(),
        RequestErrorKind::Serialization => "serialization error".to_string(),
        RequestErrorKind::Cancelled => "cancelled".to_string(),
        RequestErrorKind::InvalidRequest => "invalid request".to_string(),
    }
}

impl RequestError {
    pub fn new(kind: RequestErrorKind, url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(RequestErrorKind::Network, url, message)
    }

    pub fn http_status(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        let mut body = body.into();
        if body.chars().count() > global_constants::MAX_ERROR_BODY_CHARS {
            body = body
                .chars()
                .take(global_constants::MAX_ERROR_BODY_CHARS)
                .collect();
        }
        let message = format!("server responded with status {}", status);
        Self::new(RequestErrorKind::HttpStatus { status, body }, url, message)
    }

    pub fn timeout(url: impl Into<String>, timeout_ms: u64) -> Self {
        Self::new(
            RequestErrorKind::Timeout,
            url,
            format!("no response within {} ms", timeout_ms),
        )
    }

    pub fn serialization(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(RequestErrorKind::Serialization, url, message)
    }

    pub fn cancelled(url: impl Into<String>) -> Self {
        Self::new(RequestErrorKind::Cancelled, url, "request was cancelled")
    }

    pub fn invalid_request(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(RequestErrorKind::InvalidRequest, url, message)
    }

    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            RequestErrorKind::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn response_body(&self) -> Option<&str> {
        match &self.kind {
            RequestErrorKind::HttpStatus { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == RequestErrorKind::Timeout
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind == RequestErrorKind::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_error_exposes_status_and_body() {
        let error = RequestError::http_status("http://host/api/inpaint", 500, "boom");

        assert_eq!(error.status(), Some(500));
        assert_eq!(error.response_body(), Some("boom"));
        assert_eq!(error.url, "http://host/api/inpaint");
    }

    #[test]
    fn test_non_status_errors_have_no_status() {
        assert_eq!(RequestError::network("u", "refused").status(), None);
        assert_eq!(RequestError::timeout("u", 10).status(), None);
        assert_eq!(RequestError::cancelled("u").response_body(), None);
    }

    #[test]
    fn test_display_includes_kind_and_url() {
        let error = RequestError::timeout("http://host/api/inpaint", 250);
        let rendered = error.to_string();

        assert!(rendered.starts_with("timeout for http://host/api/inpaint"));
        assert!(rendered.contains("250 ms"));
    }

    #[test]
    fn test_http_status_body_is_truncated() {
        let long_body = "x".repeat(global_constants::MAX_ERROR_BODY_CHARS + 100);
        let error = RequestError::http_status("u", 502, long_body);

        assert_eq!(
            error.response_body().unwrap().len(),
            global_constants::MAX_ERROR_BODY_CHARS
        );
    }

    #[test]
    fn test_kind_predicates() {
        assert!(RequestError::timeout("u", 1).is_timeout());
        assert!(RequestError::cancelled("u").is_cancelled());
        assert!(!RequestError::network("u", "down").is_timeout());
    }
}
