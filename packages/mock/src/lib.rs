//! Public surface for the `datacatalog-mock` crate.
//!
//! An in-memory stand-in for the catalog service. It exposes the router
//! builder, storage, and demo seed so that other crates (the conformance
//! suite, client tests) can run a catalog in-process without a subprocess.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod seed;
pub mod storage;

pub use config::MockConfig;
pub use router::build_router;
pub use seed::{load_demo, Demo};
pub use storage::{memory::MemoryStorage, Storage};
