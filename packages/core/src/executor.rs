//! Calling conventions.
//!
//! Facades shape a request once and hand it to an [`Executor`]. The executor
//! decides *how* the request runs (blocking or async) and returns a call
//! handle; the handle decides *what* comes back:
//!
//! | Executor | Handle | raw | wrapped |
//! |----------|--------|-----|---------|
//! | [`AsyncExecutor`] | [`AsyncCall`] | `send().await` → [`Payload`] | `send_with_response().await` → [`Response`] |
//! | [`BlockingExecutor`] | [`BlockingCall`] | `send()` → [`Payload`] | `send_with_response()` → [`Response`] |
//!
//! Shaping errors travel inside the handle and surface on send without
//! touching the transport.

use std::sync::Arc;

use crate::error::Error;
use crate::options::ErrorPolicy;
use crate::payload::Payload;
use crate::pipeline::{BlockingPipeline, HttpPipeline};
use crate::request::{HttpRequest, PreparedRequest};
use crate::response::Response;

/// Turns shaped requests into call handles.
pub trait Executor: Clone + Send + Sync {
    type Call;

    fn call(&self, prepared: Result<PreparedRequest, Error>) -> Self::Call;
}

/// Apply the call's error policy to a transport response.
fn check_status(prepared: &PreparedRequest, response: Response) -> Result<Response, Error> {
    if response.is_success() || prepared.error_policy == ErrorPolicy::Return {
        return Ok(response);
    }
    let status = response.status();
    Err(Error::Status {
        operation: prepared.operation.name(),
        status,
        payload: response.into_payload(),
    })
}

// ---------------------------------------------------------------------------
// Async
// ---------------------------------------------------------------------------

/// Runs calls on the caller's async runtime through an [`HttpPipeline`].
#[derive(Clone)]
pub struct AsyncExecutor {
    pipeline: Arc<dyn HttpPipeline>,
}

impl AsyncExecutor {
    pub fn new(pipeline: Arc<dyn HttpPipeline>) -> Self {
        Self { pipeline }
    }
}

impl Executor for AsyncExecutor {
    type Call = AsyncCall;

    fn call(&self, prepared: Result<PreparedRequest, Error>) -> AsyncCall {
        AsyncCall {
            pipeline: Arc::clone(&self.pipeline),
            prepared,
        }
    }
}

/// A shaped async call. Nothing happens until one of the `send` methods is
/// awaited; dropping the future cancels the request.
#[must_use = "a call does nothing until it is sent"]
pub struct AsyncCall {
    pipeline: Arc<dyn HttpPipeline>,
    prepared: Result<PreparedRequest, Error>,
}

impl AsyncCall {
    /// The request this call will send, or the shaping error it will report.
    pub fn request(&self) -> Result<&HttpRequest, &Error> {
        self.prepared.as_ref().map(|p| &p.request)
    }

    /// Send and return the response envelope.
    pub async fn send_with_response(self) -> Result<Response, Error> {
        let prepared = self.prepared?;
        let response = self.pipeline.send(prepared.request.clone()).await?;
        check_status(&prepared, response)
    }

    /// Send and return only the payload.
    pub async fn send(self) -> Result<Payload, Error> {
        self.send_with_response().await.map(Response::into_payload)
    }
}

// ---------------------------------------------------------------------------
// Blocking
// ---------------------------------------------------------------------------

/// Runs calls on the calling thread through a [`BlockingPipeline`].
#[derive(Clone)]
pub struct BlockingExecutor {
    pipeline: Arc<dyn BlockingPipeline>,
}

impl BlockingExecutor {
    pub fn new(pipeline: Arc<dyn BlockingPipeline>) -> Self {
        Self { pipeline }
    }
}

impl Executor for BlockingExecutor {
    type Call = BlockingCall;

    fn call(&self, prepared: Result<PreparedRequest, Error>) -> BlockingCall {
        BlockingCall {
            pipeline: Arc::clone(&self.pipeline),
            prepared,
        }
    }
}

/// A shaped blocking call.
#[must_use = "a call does nothing until it is sent"]
pub struct BlockingCall {
    pipeline: Arc<dyn BlockingPipeline>,
    prepared: Result<PreparedRequest, Error>,
}

impl BlockingCall {
    /// The request this call will send, or the shaping error it will report.
    pub fn request(&self) -> Result<&HttpRequest, &Error> {
        self.prepared.as_ref().map(|p| &p.request)
    }

    /// Send and return the response envelope.
    pub fn send_with_response(self) -> Result<Response, Error> {
        let prepared = self.prepared?;
        let response = self.pipeline.send(prepared.request.clone())?;
        check_status(&prepared, response)
    }

    /// Send and return only the payload.
    pub fn send(self) -> Result<Payload, Error> {
        self.send_with_response().map(Response::into_payload)
    }
}
