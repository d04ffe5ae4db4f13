//! Physical request execution.
//!
//! A [`Candidate`] describes one physical HTTP attempt. A [`Transport`]
//! executes it and reports the outcome as bytes or an explicit error. The
//! production implementation is [`HttpTransport`], which owns a
//! `reqwest::Client` configured with the connection timeout.

use std::fmt;
use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::trace;

use photobridge_core::defaults::{API_KEY_HEADER, API_PATH_SUFFIX, UPSTREAM_ERROR_BODY_LIMIT};
use photobridge_core::{Error, ImmichConfig, Result};

use crate::proxy::ForwardHeaders;

/// One physical request for a logical operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub method: Method,
    /// Path relative to the API root, starting with `/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Candidate {
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Attach query parameters.
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Attach a JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)?;
        if !self.query.is_empty() {
            let pairs: Vec<String> = self
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            write!(f, "?{}", pairs.join("&"))?;
        }
        Ok(())
    }
}

/// Executes physical requests against one deployment.
///
/// Implementations hold no mutable state and are shared read-only across
/// concurrent calls.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a JSON request and return the raw body of a 2xx response.
    ///
    /// Non-2xx responses are [`Error::UpstreamStatus`]; connection problems
    /// are [`Error::Transport`].
    async fn execute(&self, candidate: &Candidate) -> Result<Vec<u8>>;

    /// Open a streaming response, forwarding range headers.
    ///
    /// The response is returned whatever its status so that the caller can
    /// pass partial-content semantics through untouched.
    async fn open(
        &self,
        candidate: &Candidate,
        forward: &ForwardHeaders,
    ) -> Result<reqwest::Response>;
}

/// Normalize a configured base URL into the API root.
///
/// Trailing `/` is removed and `/api` appended unless already present.
pub fn api_base_url(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if base.ends_with(API_PATH_SUFFIX) {
        base.to_string()
    } else {
        format!("{}{}", base, API_PATH_SUFFIX)
    }
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    api_base_url: String,
    api_key: String,
}

impl HttpTransport {
    /// Create a transport with its own HTTP client.
    pub fn new(config: &ImmichConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self::with_client(client, config))
    }

    /// Create a transport around an existing, shared HTTP client.
    pub fn with_client(client: Client, config: &ImmichConfig) -> Self {
        Self {
            client,
            api_base_url: api_base_url(&config.base_url),
            api_key: config.api_key.clone(),
        }
    }

    /// The resolved API root.
    pub fn api_base(&self) -> &str {
        &self.api_base_url
    }

    fn build_request(&self, candidate: &Candidate) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.api_base_url, candidate.path);
        let mut req = self
            .client
            .request(candidate.method.clone(), &url)
            .header(API_KEY_HEADER, &self.api_key);

        if !candidate.query.is_empty() {
            req = req.query(&candidate.query);
        }
        if let Some(ref body) = candidate.body {
            // Sets Content-Type: application/json
            req = req.json(body);
        }
        req
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, candidate: &Candidate) -> Result<Vec<u8>> {
        let start = Instant::now();
        let mut response = self
            .build_request(candidate)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("{} failed: {}", candidate, e)))?;

        let status = response.status();
        trace!(
            candidate = %candidate,
            status = status.as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Upstream responded"
        );

        if !status.is_success() {
            let mut body = Vec::new();
            while body.len() < UPSTREAM_ERROR_BODY_LIMIT {
                match response.chunk().await {
                    Ok(Some(chunk)) => body.extend_from_slice(&chunk),
                    _ => break,
                }
            }
            return Err(Error::upstream(
                status.as_u16(),
                &String::from_utf8_lossy(&body),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(format!("Failed to read response body: {}", e)))?;
        Ok(bytes.to_vec())
    }

    async fn open(
        &self,
        candidate: &Candidate,
        forward: &ForwardHeaders,
    ) -> Result<reqwest::Response> {
        let mut req = self.build_request(candidate);
        for (name, value) in forward.iter() {
            req = req.header(name, value);
        }
        req.send()
            .await
            .map_err(|e| Error::Transport(format!("{} failed: {}", candidate, e)))
    }
}
