//! Assembles the Axum [`Router`] from all handler modules.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{discovery, lineage, relationship, types, AppState},
    storage::Storage,
};

/// Build the complete application router with shared state.
///
/// Paths are relative to the catalog endpoint, so a client configured with
/// `http://127.0.0.1:3030` reaches `POST /api/atlas/v2/search/advanced`.
pub fn build_router(storage: Arc<dyn Storage>) -> Router {
    let state = AppState { storage };

    Router::new()
        // Discovery
        .route("/api/atlas/v2/search/advanced", post(discovery::query))
        .route("/api/atlas/v2/search/suggest", post(discovery::suggest))
        .route("/api/atlas/v2/search/autocomplete", post(discovery::auto_complete))
        .route("/api/atlas/v2/browse", post(discovery::browse))
        // Lineage
        .route("/api/atlas/v2/lineage/{guid}", get(lineage::get_lineage_graph))
        .route("/api/lineage/{guid}/next/", get(lineage::next_page_lineage))
        // Relationships
        .route(
            "/api/atlas/v2/relationship",
            post(relationship::create).put(relationship::update),
        )
        .route(
            "/api/atlas/v2/relationship/guid/{guid}",
            get(relationship::get).delete(relationship::delete),
        )
        // Type definitions, bulk
        .route(
            "/api/atlas/v2/types/typedefs",
            get(types::get_all)
                .post(types::create)
                .put(types::update)
                .delete(types::delete_all),
        )
        .route("/api/atlas/v2/types/typedefs/headers", get(types::headers))
        // Type definitions, single
        .route("/api/atlas/v2/types/{kind}/guid/{guid}", get(types::get_by_guid))
        .route(
            "/api/atlas/v2/types/{kind}/name/{name}",
            get(types::get_by_name).delete(types::delete_by_name),
        )
        .route(
            "/api/types/termtemplatedef/guid/{guid}",
            get(types::term_template_by_guid),
        )
        .route(
            "/api/types/termtemplatedef/name/{name}",
            get(types::term_template_by_name),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
