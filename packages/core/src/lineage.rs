//! Lineage graph retrieval.
//!
//! Both operations require `direction` (`INPUT`, `OUTPUT`, or `BOTH`) in the
//! options. A call without it fails locally with
//! [`Error::MissingParameter`](crate::Error::MissingParameter) before any I/O.

use crate::executor::Executor;
use crate::operation::Operation;
use crate::options::RequestOptions;
use crate::request::RequestBuilder;
use crate::service::ServiceClient;

#[derive(Clone)]
pub struct Lineage<E> {
    client: ServiceClient<E>,
}

impl<E: Executor> Lineage<E> {
    pub fn new(client: ServiceClient<E>) -> Self {
        Self { client }
    }

    /// The lineage graph around the entity `guid`.
    ///
    /// Options: `direction` (required), `depth`, `width`, `includeParent`,
    /// `getDerivedLineage`.
    pub fn get_lineage_graph(&self, guid: &str, options: RequestOptions) -> E::Call {
        self.client.execute(
            RequestBuilder::new(Operation::GetLineageGraph)
                .path_param("guid", guid)
                .options(options),
        )
    }

    /// The next page of relations around `guid`.
    ///
    /// Options: `direction` (required), `getDerivedLineage`, `offset`,
    /// `limit`. The caller tracks `offset` between calls.
    pub fn next_page_lineage(&self, guid: &str, options: RequestOptions) -> E::Call {
        self.client.execute(
            RequestBuilder::new(Operation::NextPageLineage)
                .path_param("guid", guid)
                .options(options),
        )
    }
}
