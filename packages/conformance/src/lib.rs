//! Shared helpers for the data catalog conformance test suite.
//!
//! Provides [`spawn_mock`], which binds a `TcpListener` on an ephemeral
//! port, serves a seeded in-process mock catalog on it, and returns the
//! endpoint URL together with the GUIDs of the seeded items. Blocking
//! clients cannot run inside a Tokio runtime, so [`BlockingMock`] does the
//! same on a runtime it owns.

use std::sync::Arc;

use datacatalog_mock::{build_router, load_demo, Demo, MemoryStorage, Storage};

/// Start an ephemeral in-process mock catalog and return
/// `(endpoint, demo)`.
///
/// The server runs in a background `tokio` task bound to an OS-assigned
/// port on `127.0.0.1`. The returned endpoint is the full base URL, e.g.
/// `http://127.0.0.1:51234`.
///
/// # Panics
///
/// Panics if the listener cannot be bound or the demo data fails to load.
pub async fn spawn_mock() -> (String, Demo) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("get local addr");
    let endpoint = format!("http://{addr}");

    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    let demo = load_demo(storage.as_ref()).await.expect("load demo catalog");
    let router = build_router(storage);

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("conformance mock error");
    });

    (endpoint, demo)
}

/// A mock catalog served from its own runtime, for blocking clients.
///
/// The server stops when this value is dropped.
pub struct BlockingMock {
    pub endpoint: String,
    pub demo: Demo,
    _runtime: tokio::runtime::Runtime,
}

impl BlockingMock {
    /// # Panics
    ///
    /// Panics if the runtime cannot be created or [`spawn_mock`] panics.
    pub fn start() -> Self {
        let runtime = tokio::runtime::Runtime::new().expect("create runtime");
        let (endpoint, demo) = runtime.block_on(spawn_mock());
        Self {
            endpoint,
            demo,
            _runtime: runtime,
        }
    }
}
