//! `reqwest` transports.
//!
//! [`ReqwestPipeline`] implements [`HttpPipeline`] over `reqwest::Client`;
//! [`BlockingReqwestPipeline`] implements [`BlockingPipeline`] over
//! `reqwest::blocking::Client`. Both resolve operation paths against the
//! configured endpoint, attach the bearer token, and return every answer the
//! service gives, success or not. Status handling stays with the executor.

use std::sync::Arc;

use async_trait::async_trait;
use datacatalog::{BlockingPipeline, Error, HttpPipeline, HttpRequest, Method, Payload, Response};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use tracing::{debug, warn};

use crate::auth::TokenCredential;

/// What both transports share: where to send and how to authenticate.
#[derive(Clone)]
struct Target {
    endpoint: Arc<str>,
    credential: Option<Arc<dyn TokenCredential>>,
}

impl Target {
    fn new(endpoint: &str, credential: Option<Arc<dyn TokenCredential>>) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').into(),
            credential,
        }
    }

    /// Endpoint plus [`HttpRequest::path_and_query`], so the wire URL is
    /// exactly the string the request reports.
    fn url(&self, request: &HttpRequest) -> String {
        format!("{}{}", self.endpoint, request.path_and_query())
    }

    fn token(&self) -> Result<Option<String>, Error> {
        self.credential.as_ref().map(|c| c.token()).transpose()
    }
}

fn method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

fn content_type(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn log_outcome(request: &HttpRequest, status: u16) {
    if (200..300).contains(&status) {
        debug!(method = %request.method, path = %request.path, status, "catalog responded");
    } else {
        warn!(method = %request.method, path = %request.path, status, "catalog returned non-success status");
    }
}

// ---------------------------------------------------------------------------
// Async
// ---------------------------------------------------------------------------

/// Asynchronous transport over a pooled `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestPipeline {
    client: reqwest::Client,
    target: Target,
}

impl ReqwestPipeline {
    /// # Arguments
    ///
    /// * `client`: pre-configured `reqwest::Client` (e.g. with a timeout).
    /// * `endpoint`: catalog base URL; operation paths are appended to it.
    /// * `credential`: bearer token source, or `None` for anonymous calls.
    pub fn new(
        client: reqwest::Client,
        endpoint: &str,
        credential: Option<Arc<dyn TokenCredential>>,
    ) -> Self {
        Self {
            client,
            target: Target::new(endpoint, credential),
        }
    }
}

#[async_trait]
impl HttpPipeline for ReqwestPipeline {
    async fn send(&self, request: HttpRequest) -> Result<Response, Error> {
        debug!(method = %request.method, path = %request.path, "sending catalog request");

        let mut builder = self
            .client
            .request(method(request.method), self.target.url(&request));
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(token) = self.target.token()? {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.as_bytes().to_vec());
        }

        let response = builder.send().await.map_err(Error::transport)?;
        let status = response.status().as_u16();
        log_outcome(&request, status);

        let headers = header_pairs(response.headers());
        let content_type = content_type(response.headers());
        let bytes = response.bytes().await.map_err(Error::transport)?;
        Ok(Response::new(status, headers, Payload::new(bytes.to_vec(), content_type)))
    }
}

// ---------------------------------------------------------------------------
// Blocking
// ---------------------------------------------------------------------------

/// Blocking transport over `reqwest::blocking::Client`.
///
/// Do not create or use this inside an async runtime; `reqwest` runs its own
/// internal runtime for blocking calls.
#[derive(Clone)]
pub struct BlockingReqwestPipeline {
    client: reqwest::blocking::Client,
    target: Target,
}

impl BlockingReqwestPipeline {
    pub fn new(
        client: reqwest::blocking::Client,
        endpoint: &str,
        credential: Option<Arc<dyn TokenCredential>>,
    ) -> Self {
        Self {
            client,
            target: Target::new(endpoint, credential),
        }
    }
}

impl BlockingPipeline for BlockingReqwestPipeline {
    fn send(&self, request: HttpRequest) -> Result<Response, Error> {
        debug!(method = %request.method, path = %request.path, "sending catalog request");

        let mut builder = self
            .client
            .request(method(request.method), self.target.url(&request));
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(token) = self.target.token()? {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.as_bytes().to_vec());
        }

        let response = builder.send().map_err(Error::transport)?;
        let status = response.status().as_u16();
        log_outcome(&request, status);

        let headers = header_pairs(response.headers());
        let content_type = content_type(response.headers());
        let bytes = response.bytes().map_err(Error::transport)?;
        Ok(Response::new(status, headers, Payload::new(bytes.to_vec(), content_type)))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
