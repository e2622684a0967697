//! HTTP transport seam.
//!
//! The marketplace client only needs to GET and POST JSON against paths
//! relative to an API base URL. `Transport` abstracts that so the pipeline
//! can run against any HTTP stack, or against an in-memory fake in tests.
//! Timeouts, if any, belong to the implementation.

use serde_json::Value;

/// Failure to complete a request, or a non-2xx response.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("transport failure: {0}")]
    Io(String),
}

/// A blocking JSON-over-HTTP client.
///
/// Both methods return the raw response body of a 2xx response. Any other
/// status is reported as `TransportError::Status`.
pub trait Transport {
    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<String, TransportError>;

    fn post(&self, path: &str, body: &Value) -> Result<String, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<String, TransportError> {
        (**self).get(path, query)
    }

    fn post(&self, path: &str, body: &Value) -> Result<String, TransportError> {
        (**self).post(path, body)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<String, TransportError> {
        (**self).get(path, query)
    }

    fn post(&self, path: &str, body: &Value) -> Result<String, TransportError> {
        (**self).post(path, body)
    }
}

/// `ureq`-backed transport against a fixed API base URL.
#[cfg(feature = "http")]
pub struct HttpTransport {
    base_url: String,
    agent: ureq::Agent,
}

#[cfg(feature = "http")]
impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpTransport {
            base_url: base_url.into(),
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn read(result: Result<ureq::Response, ureq::Error>) -> Result<String, TransportError> {
        match result {
            Ok(response) => response
                .into_string()
                .map_err(|e| TransportError::Io(e.to_string())),
            Err(ureq::Error::Status(status, response)) => Err(TransportError::Status {
                status,
                body: response.into_string().unwrap_or_default(),
            }),
            Err(ureq::Error::Transport(t)) => Err(TransportError::Io(t.to_string())),
        }
    }
}

#[cfg(feature = "http")]
impl Transport for HttpTransport {
    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<String, TransportError> {
        let url = self.url(path);
        log::debug!("GET {}", url);
        let request = query
            .iter()
            .fold(self.agent.get(&url), |req, (k, v)| req.query(k, v));
        Self::read(request.call())
    }

    fn post(&self, path: &str, body: &Value) -> Result<String, TransportError> {
        let url = self.url(path);
        log::debug!("POST {} {}", url, body);
        let request = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json");
        Self::read(request.send_string(&body.to_string()))
    }
}
