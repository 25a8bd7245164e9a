use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers;
use crate::store::traits::Backend;

pub fn create_router<S: Backend + 'static>() -> Router<Arc<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Horses
        .route(
            "/horses",
            get(handlers::list_horses::<S>).post(handlers::create_horse::<S>),
        )
        .route(
            "/horses/:id",
            get(handlers::get_horse::<S>)
                .put(handlers::update_horse::<S>)
                .delete(handlers::delete_horse::<S>),
        )
        .route("/horses/pedigree/:id", get(handlers::get_pedigree::<S>))
        // Owners
        .route("/owners", get(handlers::search_owners::<S>))
        .route("/owners", post(handlers::create_owner::<S>))
        .route("/owners/:id", get(handlers::get_owner::<S>))
}
