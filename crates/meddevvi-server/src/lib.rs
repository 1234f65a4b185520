//! meddevvi-server
//!
//! HTTP surface: the JSON API and the browser forms, both backed by the
//! engine and the stored facility profile.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        // JSON API
        .route("/api/analyze/{mode}", post(routes::analysis::analyze_case))
        .route("/api/triage", post(routes::analysis::triage_case))
        .route(
            "/api/facility",
            get(routes::facility::get_facility).put(routes::facility::put_facility),
        )
        // Browser forms
        .route("/", get(routes::pages::index))
        .route(
            "/student",
            get(routes::pages::student_page).post(routes::pages::student_submit),
        )
        .route(
            "/clinician",
            get(routes::pages::clinician_page).post(routes::pages::clinician_submit),
        )
        .route(
            "/peripheral",
            get(routes::pages::peripheral_page).post(routes::pages::peripheral_submit),
        )
        .route(
            "/peripheral/setup",
            get(routes::pages::setup_page).post(routes::pages::setup_submit),
        )
        .route("/peripheral/update", get(routes::pages::update_page))
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
