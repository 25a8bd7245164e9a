pub mod api;
pub mod config;
pub mod error;
pub mod logic;
pub mod model;
pub mod seed;
pub mod store;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

// Export API types
pub use api::handlers;
pub use api::routes;

pub use error::{AssignError, BackendError, HorseFormError, PedigreeViewError};

// Export logic types
pub use logic::{
    format_error, LatestRequest, PedigreeFetcher, RelationshipAssigner, RelationshipSuggester,
};

// Export all model types
pub use model::*;

// Export store types
pub use store::{Backend, HorseStore, MemoryStore, OwnerStore, RestBackend};

pub use view::{
    HorseForm, HorseFormMode, Navigator, Notifier, NotifyOptions, PedigreeViewController,
    PedigreeViewState, RelationshipField, RouteContext,
};

use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Router of the development backend, serving `store`.
pub fn create_app<S: Backend + 'static>(store: Arc<S>) -> axum::Router {
    routes::create_router::<S>()
        .layer(CorsLayer::permissive())
        .with_state(store)
}
