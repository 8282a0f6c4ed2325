//! Request shaping and calling conventions for the data catalog REST API.
//!
//! This crate has **no I/O**. It knows, for every catalog operation, which
//! HTTP request to build, and it exposes each operation in four calling
//! forms (blocking or async, payload-only or with response metadata) over a
//! transport the host injects. `datacatalog-client` provides `reqwest`
//! transports; tests can plug in their own.
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`descriptor`] | [`OperationDescriptor`]: verb, path template, query parameters, body kind |
//! | [`operation`] | [`Operation`]: the static table of all 30 operations |
//! | [`request`] | [`RequestBuilder`] → [`HttpRequest`]; required-parameter checks |
//! | [`executor`] | [`AsyncExecutor`] / [`BlockingExecutor`] and their call handles |
//! | [`discovery`], [`lineage`], [`relationship`], [`types`] | The four facades |
//!
//! # Quick start
//!
//! ```rust,ignore
//! use datacatalog::{AsyncExecutor, Payload, RequestOptions, ServiceClient};
//!
//! let client = ServiceClient::new(AsyncExecutor::new(transport), "2021-05-01-preview");
//!
//! // Payload only.
//! let results = client
//!     .discovery()
//!     .query(Payload::from(json!({"keywords": "invoice", "limit": 10})), RequestOptions::new())
//!     .send()
//!     .await?;
//!
//! // Payload plus status and headers.
//! let response = client
//!     .lineage()
//!     .get_lineage_graph(guid, RequestOptions::new().query_param("direction", "BOTH"))
//!     .send_with_response()
//!     .await?;
//! ```

pub mod descriptor;
pub mod discovery;
pub mod error;
pub mod executor;
pub mod lineage;
pub mod operation;
pub mod options;
pub mod payload;
pub mod pipeline;
pub mod relationship;
pub mod request;
pub mod response;
pub mod service;
pub mod types;

#[cfg(test)]
mod testing;

pub use descriptor::{
    BodyKind, Group, Method, OperationDescriptor, ParamKind, QueryParam, ResponseKind, API_VERSION,
};
pub use discovery::Discovery;
pub use error::{Error, ErrorResponse};
pub use executor::{AsyncCall, AsyncExecutor, BlockingCall, BlockingExecutor, Executor};
pub use lineage::Lineage;
pub use operation::Operation;
pub use options::{ErrorPolicy, RequestOptions};
pub use payload::{Payload, JSON_CONTENT_TYPE};
pub use pipeline::{BlockingPipeline, HttpPipeline};
pub use relationship::Relationships;
pub use request::{HttpRequest, PreparedRequest, RequestBuilder};
pub use response::Response;
pub use service::{ServiceClient, DEFAULT_API_VERSION};
pub use types::Types;
