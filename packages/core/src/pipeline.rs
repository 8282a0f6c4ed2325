//! Transport seams.
//!
//! The SDK does not open sockets. A transport implements one of these traits
//! and is injected into an executor; `datacatalog-client` ships `reqwest`
//! implementations of both.
//!
//! Contract for implementors: send the request as given, return whatever the
//! service answered (any status) as a [`Response`], and report only failures
//! that produced no response as [`Error::Transport`]. Retrying, redirect
//! handling, and authentication are the transport's own business.

use async_trait::async_trait;

use crate::error::Error;
use crate::request::HttpRequest;
use crate::response::Response;

/// An asynchronous transport.
#[async_trait]
pub trait HttpPipeline: Send + Sync + 'static {
    async fn send(&self, request: HttpRequest) -> Result<Response, Error>;
}

/// A blocking transport. Calls block the current thread for the round trip.
pub trait BlockingPipeline: Send + Sync + 'static {
    fn send(&self, request: HttpRequest) -> Result<Response, Error>;
}
