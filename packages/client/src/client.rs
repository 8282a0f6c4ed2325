//! Ready-made async and blocking catalog clients.

use std::sync::Arc;
use std::time::Duration;

use datacatalog::{
    AsyncExecutor, BlockingExecutor, Discovery, Executor, Lineage, Operation, Payload,
    Relationships, RequestOptions, ServiceClient, Types,
};

use crate::auth::{StaticTokenCredential, TokenCredential};
use crate::config::{ClientConfig, ConfigError};
use crate::transport::{BlockingReqwestPipeline, ReqwestPipeline};

/// Configures and builds a [`CatalogClient`] or [`BlockingCatalogClient`].
///
/// ```rust,ignore
/// let client = CatalogClient::builder("https://acct.purview.azure.com/catalog")
///     .token(token)
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// ```
pub struct ClientBuilder {
    endpoint: String,
    api_version: Option<String>,
    timeout: Option<Duration>,
    credential: Option<Arc<dyn TokenCredential>>,
}

impl ClientBuilder {
    fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_version: None,
            timeout: None,
            credential: None,
        }
    }

    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Send a fixed bearer token.
    pub fn token(self, token: impl Into<String>) -> Self {
        self.credential(Arc::new(StaticTokenCredential::new(token)))
    }

    pub fn credential(mut self, credential: Arc<dyn TokenCredential>) -> Self {
        self.credential = Some(credential);
        self
    }

    fn resolve(self) -> Result<(ClientConfig, Option<Arc<dyn TokenCredential>>), ConfigError> {
        let mut config = ClientConfig::new(self.endpoint)?;
        if let Some(version) = self.api_version {
            config.api_version = version;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        Ok((config, self.credential))
    }

    pub fn build(self) -> Result<CatalogClient, ConfigError> {
        let (config, credential) = self.resolve()?;
        CatalogClient::with_credential(&config, credential)
    }

    pub fn build_blocking(self) -> Result<BlockingCatalogClient, ConfigError> {
        let (config, credential) = self.resolve()?;
        BlockingCatalogClient::with_credential(&config, credential)
    }
}

fn config_credential(config: &ClientConfig) -> Option<Arc<dyn TokenCredential>> {
    config
        .token
        .as_ref()
        .map(|t| Arc::new(StaticTokenCredential::new(t.clone())) as Arc<dyn TokenCredential>)
}

/// Generates the accessors both clients share; they differ only in executor.
macro_rules! facade_accessors {
    ($exec:ty) => {
        /// The underlying service client.
        pub fn service(&self) -> &ServiceClient<$exec> {
            &self.inner
        }

        pub fn api_version(&self) -> &str {
            self.inner.api_version()
        }

        pub fn discovery(&self) -> Discovery<$exec> {
            self.inner.discovery()
        }

        pub fn lineage(&self) -> Lineage<$exec> {
            self.inner.lineage()
        }

        pub fn relationships(&self) -> Relationships<$exec> {
            self.inner.relationships()
        }

        pub fn types(&self) -> Types<$exec> {
            self.inner.types()
        }

        /// Invoke any operation by descriptor. See [`ServiceClient::invoke`].
        pub fn invoke(
            &self,
            operation: Operation,
            path_args: &[(&str, &str)],
            body: Option<Payload>,
            options: RequestOptions,
        ) -> <$exec as Executor>::Call {
            self.inner.invoke(operation, path_args, body, options)
        }
    };
}

// ---------------------------------------------------------------------------
// Async
// ---------------------------------------------------------------------------

/// Async client. Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: ServiceClient<AsyncExecutor>,
}

impl CatalogClient {
    pub fn builder(endpoint: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(endpoint)
    }

    /// Build from `CATALOG_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_config(&ClientConfig::from_env()?)
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        Self::with_credential(config, config_credential(config))
    }

    fn with_credential(
        config: &ClientConfig,
        credential: Option<Arc<dyn TokenCredential>>,
    ) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        let pipeline = ReqwestPipeline::new(http, &config.endpoint, credential);
        Ok(Self {
            inner: ServiceClient::new(AsyncExecutor::new(Arc::new(pipeline)), &config.api_version),
        })
    }

    facade_accessors!(AsyncExecutor);
}

// ---------------------------------------------------------------------------
// Blocking
// ---------------------------------------------------------------------------

/// Blocking client. Must not be built or used from inside an async runtime.
#[derive(Clone)]
pub struct BlockingCatalogClient {
    inner: ServiceClient<BlockingExecutor>,
}

impl BlockingCatalogClient {
    pub fn builder(endpoint: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(endpoint)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_config(&ClientConfig::from_env()?)
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        Self::with_credential(config, config_credential(config))
    }

    fn with_credential(
        config: &ClientConfig,
        credential: Option<Arc<dyn TokenCredential>>,
    ) -> Result<Self, ConfigError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        let pipeline = BlockingReqwestPipeline::new(http, &config.endpoint, credential);
        Ok(Self {
            inner: ServiceClient::new(
                BlockingExecutor::new(Arc::new(pipeline)),
                &config.api_version,
            ),
        })
    }

    facade_accessors!(BlockingExecutor);
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use datacatalog::Error;
    use datacatalog_api::{LineageDirection, LineageGraph, LineageQuery};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    async fn lineage(Path(guid): Path<String>) -> Json<Value> {
        Json(json!({
            "baseEntityGuid": guid,
            "lineageDirection": "BOTH",
            "guidEntityMap": {},
            "relations": []
        }))
    }

    async fn term_template(Path(name): Path<String>) -> (StatusCode, Json<Value>) {
        (
            StatusCode::NOT_FOUND,
            Json(json!({
                "errorCode": "ATLAS-404-00-001",
                "errorMessage": format!("Given typename {name} was invalid")
            })),
        )
    }

    async fn spawn_mock_server() -> String {
        let app = Router::new()
            .route("/api/atlas/v2/lineage/{guid}", get(lineage))
            .route("/api/types/termtemplatedef/name/{name}", get(term_template));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn builder_validates_endpoint() {
        assert!(matches!(
            CatalogClient::builder("nope").build(),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn builder_overrides_api_version() {
        let client = CatalogClient::builder("http://localhost")
            .api_version("2022-03-01-preview")
            .build()
            .unwrap();
        assert_eq!(client.api_version(), "2022-03-01-preview");
    }

    #[tokio::test]
    async fn async_client_raw_and_wrapped() {
        let base = spawn_mock_server().await;
        let client = CatalogClient::builder(base).build().unwrap();
        let lineage = client.lineage();

        let raw = lineage
            .get_lineage_graph("a1", LineageQuery::new(LineageDirection::Both).into())
            .send()
            .await
            .unwrap();
        let graph: LineageGraph = raw.json().unwrap();
        assert_eq!(graph.base_entity_guid.as_deref(), Some("a1"));

        let wrapped = lineage
            .get_lineage_graph("a1", LineageQuery::new(LineageDirection::Both).into())
            .send_with_response()
            .await
            .unwrap();
        assert_eq!(wrapped.status(), 200);
        assert_eq!(wrapped.payload(), &raw);
    }

    #[tokio::test]
    async fn async_client_surfaces_not_found() {
        let base = spawn_mock_server().await;
        let client = CatalogClient::builder(base).build().unwrap();

        let err = client
            .types()
            .get_term_template_def_by_name("Glossary1", RequestOptions::new())
            .send()
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.service_error().unwrap().error_code, "ATLAS-404-00-001");
    }

    #[test]
    fn blocking_client_surfaces_not_found() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let base = rt.block_on(spawn_mock_server());
        let client = BlockingCatalogClient::builder(base).build_blocking().unwrap();

        let err = client
            .types()
            .get_term_template_def_by_name("Glossary1", RequestOptions::new())
            .send_with_response()
            .unwrap_err();
        assert!(matches!(err, Error::Status { status: 404, .. }));

        // Missing direction never leaves the process.
        let err = client
            .lineage()
            .get_lineage_graph("a1", RequestOptions::new())
            .send()
            .unwrap_err();
        assert!(matches!(err, Error::MissingParameter { .. }));
    }
}
