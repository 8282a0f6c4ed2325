//! Relationship CRUD.

use crate::executor::Executor;
use crate::operation::Operation;
use crate::options::RequestOptions;
use crate::payload::Payload;
use crate::request::RequestBuilder;
use crate::service::ServiceClient;

#[derive(Clone)]
pub struct Relationships<E> {
    client: ServiceClient<E>,
}

impl<E: Executor> Relationships<E> {
    pub fn new(client: ServiceClient<E>) -> Self {
        Self { client }
    }

    /// Create a relationship. The service assigns `guid` when absent.
    pub fn create(&self, body: Payload, options: RequestOptions) -> E::Call {
        self.client.execute(
            RequestBuilder::new(Operation::CreateRelationship)
                .body(body)
                .options(options),
        )
    }

    /// Replace a relationship; `body` carries its `guid`.
    pub fn update(&self, body: Payload, options: RequestOptions) -> E::Call {
        self.client.execute(
            RequestBuilder::new(Operation::UpdateRelationship)
                .body(body)
                .options(options),
        )
    }

    /// Fetch a relationship. Options: `extendedInfo`.
    pub fn get(&self, guid: &str, options: RequestOptions) -> E::Call {
        self.client.execute(
            RequestBuilder::new(Operation::GetRelationship)
                .path_param("guid", guid)
                .options(options),
        )
    }

    /// Delete a relationship. Succeeds with no content.
    pub fn delete(&self, guid: &str, options: RequestOptions) -> E::Call {
        self.client.execute(
            RequestBuilder::new(Operation::DeleteRelationship)
                .path_param("guid", guid)
                .options(options),
        )
    }
}
