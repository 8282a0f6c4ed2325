//! `dcat-mock`: in-memory data catalog for local development.
//!
//! # Quick start
//!
//! ```sh
//! # Seeded catalog on the default port:
//! dcat-mock
//!
//! # Empty catalog on another port:
//! CATALOG_MOCK_BIND=0.0.0.0:8080 CATALOG_MOCK_SEED=false dcat-mock
//!
//! # Point the CLI at it:
//! CATALOG_ENDPOINT=http://127.0.0.1:3030 dcat search invoice
//! ```

use std::sync::Arc;

use datacatalog_mock::{build_router, load_demo, MemoryStorage, MockConfig, Storage};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "datacatalog_mock=info,tower_http=debug".into()),
        )
        .init();

    let config = MockConfig::from_env().unwrap_or_else(|e| panic!("invalid configuration: {e}"));

    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    if config.seed {
        let demo = load_demo(storage.as_ref())
            .await
            .unwrap_or_else(|e| panic!("failed to load demo data: {e}"));
        tracing::info!(invoices = %demo.invoices, "demo catalog loaded");
    }

    let app = build_router(storage);

    tracing::info!("listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {e}", config.bind_addr));

    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
