use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use wayfinder_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    auth::login,
    health::{healthz, readyz},
    location::{
        create_location, delete_location, get_location, get_markers, import_locations,
        list_locations, update_location,
    },
    user::{
        confirm_registration, get_me, list_favourites, list_users, register, toggle_favourite,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Locations
        .route("/locations", get(list_locations))
        .route("/locations", post(create_location))
        .route("/locations/import", post(import_locations))
        .route("/locations/markers", get(get_markers))
        .route("/locations/{id}", get(get_location))
        .route("/locations/{id}", post(update_location))
        .route("/locations/{id}/delete", post(delete_location))
        // Users
        .route("/users", get(list_users))
        .route("/users/@me", get(get_me))
        .route("/users/registration", post(register))
        .route("/users/registration/confirm", get(confirm_registration))
        .route("/users/favourites", get(list_favourites))
        .route("/users/favourites/{id}", post(toggle_favourite))
        // Auth
        .route("/auth/login", post(login))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(trace_layer())
                .layer(propagate_request_id_layer())
                .layer(cors),
        )
        .with_state(state)
}
