//! Discovery: search, suggest, browse, and auto-complete.
//!
//! All four are `POST` with a JSON body and `api-version`. Bodies are not
//! checked here; the service rejects malformed ones with a 4xx.

use crate::executor::Executor;
use crate::operation::Operation;
use crate::options::RequestOptions;
use crate::payload::Payload;
use crate::request::RequestBuilder;
use crate::service::ServiceClient;

#[derive(Clone)]
pub struct Discovery<E> {
    client: ServiceClient<E>,
}

impl<E: Executor> Discovery<E> {
    pub fn new(client: ServiceClient<E>) -> Self {
        Self { client }
    }

    /// Free-text search.
    ///
    /// Body: `{keywords, offset, limit, filter, facets[], taxonomySetting}`.
    /// Result: `{searchCount, value[], @search.facets}`. Paging is by
    /// `offset`/`limit` in the body; there is no cursor.
    pub fn query(&self, body: Payload, options: RequestOptions) -> E::Call {
        self.post(Operation::Query, body, options)
    }

    /// Best-effort suggestions. Body: `{keywords, limit, filter}`.
    pub fn suggest(&self, body: Payload, options: RequestOptions) -> E::Call {
        self.post(Operation::Suggest, body, options)
    }

    /// One level of the browse hierarchy. Body: `{entityType, path, limit, offset}`.
    pub fn browse(&self, body: Payload, options: RequestOptions) -> E::Call {
        self.post(Operation::Browse, body, options)
    }

    /// Completion strings. Body: `{keywords, limit, filter}`.
    pub fn auto_complete(&self, body: Payload, options: RequestOptions) -> E::Call {
        self.post(Operation::AutoComplete, body, options)
    }

    fn post(&self, operation: Operation, body: Payload, options: RequestOptions) -> E::Call {
        self.client
            .execute(RequestBuilder::new(operation).body(body).options(options))
    }
}
