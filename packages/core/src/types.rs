//! Type-system metadata: classification, entity, enum, relationship, struct,
//! and term-template definitions.
//!
//! # Create vs. update
//!
//! [`create_type_definitions`](Types::create_type_definitions) only creates
//! definitions whose names are new. Definitions that already exist are left
//! exactly as they are, even if the submitted copy differs.
//! [`update_atlas_type_definitions`](Types::update_atlas_type_definitions)
//! persists whatever differs. Use update to change an existing definition.

use crate::executor::Executor;
use crate::operation::Operation;
use crate::options::RequestOptions;
use crate::payload::Payload;
use crate::request::RequestBuilder;
use crate::service::ServiceClient;

#[derive(Clone)]
pub struct Types<E> {
    client: ServiceClient<E>,
}

impl<E: Executor> Types<E> {
    pub fn new(client: ServiceClient<E>) -> Self {
        Self { client }
    }

    // --- Per-category lookups ----------------------------------------------

    pub fn get_classification_def_by_guid(&self, guid: &str, options: RequestOptions) -> E::Call {
        self.by_guid(Operation::GetClassificationDefByGuid, guid, options)
    }

    pub fn get_classification_def_by_name(&self, name: &str, options: RequestOptions) -> E::Call {
        self.by_name(Operation::GetClassificationDefByName, name, options)
    }

    pub fn get_entity_definition_by_guid(&self, guid: &str, options: RequestOptions) -> E::Call {
        self.by_guid(Operation::GetEntityDefinitionByGuid, guid, options)
    }

    pub fn get_entity_definition_by_name(&self, name: &str, options: RequestOptions) -> E::Call {
        self.by_name(Operation::GetEntityDefinitionByName, name, options)
    }

    pub fn get_enum_def_by_guid(&self, guid: &str, options: RequestOptions) -> E::Call {
        self.by_guid(Operation::GetEnumDefByGuid, guid, options)
    }

    pub fn get_enum_def_by_name(&self, name: &str, options: RequestOptions) -> E::Call {
        self.by_name(Operation::GetEnumDefByName, name, options)
    }

    pub fn get_relationship_def_by_guid(&self, guid: &str, options: RequestOptions) -> E::Call {
        self.by_guid(Operation::GetRelationshipDefByGuid, guid, options)
    }

    pub fn get_relationship_def_by_name(&self, name: &str, options: RequestOptions) -> E::Call {
        self.by_name(Operation::GetRelationshipDefByName, name, options)
    }

    pub fn get_struct_def_by_guid(&self, guid: &str, options: RequestOptions) -> E::Call {
        self.by_guid(Operation::GetStructDefByGuid, guid, options)
    }

    pub fn get_struct_def_by_name(&self, name: &str, options: RequestOptions) -> E::Call {
        self.by_name(Operation::GetStructDefByName, name, options)
    }

    /// Term templates live outside the Atlas path and carry `api-version`.
    pub fn get_term_template_def_by_guid(&self, guid: &str, options: RequestOptions) -> E::Call {
        self.by_guid(Operation::GetTermTemplateDefByGuid, guid, options)
    }

    pub fn get_term_template_def_by_name(&self, name: &str, options: RequestOptions) -> E::Call {
        self.by_name(Operation::GetTermTemplateDefByName, name, options)
    }

    /// Any category, looked up by GUID.
    pub fn get_type_definition_by_guid(&self, guid: &str, options: RequestOptions) -> E::Call {
        self.by_guid(Operation::GetTypeDefinitionByGuid, guid, options)
    }

    /// Any category, looked up by name.
    pub fn get_type_definition_by_name(&self, name: &str, options: RequestOptions) -> E::Call {
        self.by_name(Operation::GetTypeDefinitionByName, name, options)
    }

    // --- Bulk ----------------------------------------------------------------

    /// Every definition, as one bulk container.
    /// Options: `includeTermTemplate`, `type`.
    pub fn get_all_type_definitions(&self, options: RequestOptions) -> E::Call {
        self.client
            .execute(RequestBuilder::new(Operation::GetAllTypeDefinitions).options(options))
    }

    /// Create the new definitions in `body`; existing ones are left unchanged.
    pub fn create_type_definitions(&self, body: Payload, options: RequestOptions) -> E::Call {
        self.with_body(Operation::CreateTypeDefinitions, body, options)
    }

    /// Persist every change in `body`, creating definitions that are missing.
    pub fn update_atlas_type_definitions(&self, body: Payload, options: RequestOptions) -> E::Call {
        self.with_body(Operation::UpdateAtlasTypeDefinitions, body, options)
    }

    /// Delete the definitions named in `body`. Succeeds with no content.
    pub fn delete_type_definitions(&self, body: Payload, options: RequestOptions) -> E::Call {
        self.with_body(Operation::DeleteTypeDefinitions, body, options)
    }

    /// Delete one definition by name. Succeeds with no content.
    pub fn delete_type_by_name(&self, name: &str, options: RequestOptions) -> E::Call {
        self.by_name(Operation::DeleteTypeByName, name, options)
    }

    /// `{category, guid, name}` for every definition.
    /// Options: `includeTermTemplate`, `type`.
    pub fn list_type_definition_headers(&self, options: RequestOptions) -> E::Call {
        self.client
            .execute(RequestBuilder::new(Operation::ListTypeDefinitionHeaders).options(options))
    }

    fn by_guid(&self, operation: Operation, guid: &str, options: RequestOptions) -> E::Call {
        self.client.execute(
            RequestBuilder::new(operation)
                .path_param("guid", guid)
                .options(options),
        )
    }

    fn by_name(&self, operation: Operation, name: &str, options: RequestOptions) -> E::Call {
        self.client.execute(
            RequestBuilder::new(operation)
                .path_param("name", name)
                .options(options),
        )
    }

    fn with_body(&self, operation: Operation, body: Payload, options: RequestOptions) -> E::Call {
        self.client
            .execute(RequestBuilder::new(operation).body(body).options(options))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::descriptor::Method;
    use crate::executor::BlockingExecutor;
    use crate::service::{ServiceClient, DEFAULT_API_VERSION};
    use crate::testing::RecordingPipeline;
    use crate::{Payload, RequestOptions};

    fn types() -> (Arc<RecordingPipeline>, super::Types<BlockingExecutor>) {
        let pipeline = Arc::new(RecordingPipeline::ok(json!({})));
        let client = ServiceClient::new(BlockingExecutor::new(pipeline.clone()), DEFAULT_API_VERSION);
        (pipeline, client.types())
    }

    #[test]
    fn category_lookups_hit_their_own_paths() {
        let (pipeline, t) = types();
        let o = RequestOptions::new;
        t.get_classification_def_by_name("PII", o()).send().unwrap();
        t.get_entity_definition_by_guid("e-1", o()).send().unwrap();
        t.get_enum_def_by_name("Colors", o()).send().unwrap();
        t.get_relationship_def_by_guid("r-1", o()).send().unwrap();
        t.get_struct_def_by_name("Address", o()).send().unwrap();
        t.get_term_template_def_by_guid("tt-1", o()).send().unwrap();

        let paths: Vec<String> = pipeline.requests().into_iter().map(|r| r.path_and_query()).collect();
        assert_eq!(
            paths,
            vec![
                "/api/atlas/v2/types/classificationdef/name/PII",
                "/api/atlas/v2/types/entitydef/guid/e-1",
                "/api/atlas/v2/types/enumdef/name/Colors",
                "/api/atlas/v2/types/relationshipdef/guid/r-1",
                "/api/atlas/v2/types/structdef/name/Address",
                "/api/types/termtemplatedef/guid/tt-1?api-version=2021-05-01-preview",
            ]
        );
    }

    #[test]
    fn bulk_verbs() {
        let (pipeline, t) = types();
        let body = Payload::from(json!({"entityDefs": [{"name": "dataset"}]}));
        t.create_type_definitions(body.clone(), RequestOptions::new()).send().unwrap();
        t.update_atlas_type_definitions(body.clone(), RequestOptions::new()).send().unwrap();
        t.delete_type_definitions(body, RequestOptions::new()).send().unwrap();
        t.delete_type_by_name("dataset", RequestOptions::new()).send().unwrap();

        let methods: Vec<Method> = pipeline.requests().iter().map(|r| r.method).collect();
        assert_eq!(methods, vec![Method::Post, Method::Put, Method::Delete, Method::Delete]);
    }

    #[test]
    fn listing_filters_are_passed_as_query() {
        let (pipeline, t) = types();
        t.list_type_definition_headers(
            RequestOptions::new()
                .query_param("includeTermTemplate", true)
                .query_param("type", "enum"),
        )
        .send()
        .unwrap();
        assert_eq!(
            pipeline.requests()[0].path_and_query(),
            "/api/atlas/v2/types/typedefs/headers?includeTermTemplate=true&type=enum"
        );
    }
}
