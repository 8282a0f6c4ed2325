//! The injected service client every facade delegates to.

use std::sync::Arc;

use crate::discovery::Discovery;
use crate::executor::Executor;
use crate::lineage::Lineage;
use crate::operation::Operation;
use crate::options::RequestOptions;
use crate::payload::Payload;
use crate::relationship::Relationships;
use crate::request::RequestBuilder;
use crate::types::Types;

/// API version sent as `api-version` when none is configured.
pub const DEFAULT_API_VERSION: &str = "2021-05-01-preview";

/// An executor plus the API version to stamp on requests that need one.
///
/// Cheap to clone; clones share the executor's transport. Facades are built
/// from it with [`discovery`](Self::discovery), [`lineage`](Self::lineage),
/// [`relationships`](Self::relationships), and [`types`](Self::types).
#[derive(Clone)]
pub struct ServiceClient<E> {
    executor: E,
    api_version: Arc<str>,
}

impl<E: Executor> ServiceClient<E> {
    pub fn new(executor: E, api_version: impl Into<String>) -> Self {
        Self {
            executor,
            api_version: Arc::from(api_version.into()),
        }
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Shape `builder` and hand it to the executor.
    pub fn execute(&self, builder: RequestBuilder) -> E::Call {
        self.executor
            .call(builder.api_version(&*self.api_version).build())
    }

    /// Invoke any operation by its descriptor, with path arguments given as
    /// `(placeholder, value)` pairs.
    pub fn invoke(
        &self,
        operation: Operation,
        path_args: &[(&str, &str)],
        body: Option<Payload>,
        options: RequestOptions,
    ) -> E::Call {
        let mut builder = RequestBuilder::new(operation).options(options);
        for (name, value) in path_args {
            builder = builder.path_param(*name, *value);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }
        self.execute(builder)
    }

    pub fn discovery(&self) -> Discovery<E> {
        Discovery::new(self.clone())
    }

    pub fn lineage(&self) -> Lineage<E> {
        Lineage::new(self.clone())
    }

    pub fn relationships(&self) -> Relationships<E> {
        Relationships::new(self.clone())
    }

    pub fn types(&self) -> Types<E> {
        Types::new(self.clone())
    }
}
