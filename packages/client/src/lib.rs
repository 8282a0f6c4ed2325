//! HTTP transports and ready-made clients for the data catalog SDK.
//!
//! `datacatalog` shapes requests and owns the calling conventions; this crate
//! supplies the I/O. It wires `reqwest` into the SDK's transport seams and
//! packages the result as [`CatalogClient`] (async) and
//! [`BlockingCatalogClient`].
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | [`ClientConfig`] from `CATALOG_*` environment variables |
//! | [`auth`] | [`TokenCredential`] and the static-token implementation |
//! | [`transport`] | [`ReqwestPipeline`] / [`BlockingReqwestPipeline`] |
//! | [`client`] | [`CatalogClient`], [`BlockingCatalogClient`], [`ClientBuilder`] |
//!
//! ```rust,ignore
//! let client = CatalogClient::from_env()?;
//! let graph = client
//!     .lineage()
//!     .get_lineage_graph(guid, LineageQuery::new(LineageDirection::Both).into())
//!     .send()
//!     .await?;
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod transport;

pub use auth::{StaticTokenCredential, TokenCredential};
pub use client::{BlockingCatalogClient, CatalogClient, ClientBuilder};
pub use config::{ClientConfig, ConfigError};
pub use transport::{BlockingReqwestPipeline, ReqwestPipeline};
