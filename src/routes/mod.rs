//! The HTTP surface: one router per dashboard.
//!
//! The admin router is mounted twice, once for admins and once under the
//! faculty prefix, matching the dashboards that share those screens. Role
//! checks happen per handler, so the mount point grants nothing by itself.

use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Router};
use tower_http::cors::CorsLayer;

use crate::store::Store;

pub mod admin;
pub mod coordinator;
pub mod student;

/// Assembles the application router with the store attached.
pub fn app(store: Arc<Store>) -> Router {
    Router::new()
        .route("/", get(health))
        .nest("/api/admin", admin::routes())
        .nest("/api/faculty", admin::routes())
        .nest("/api/student", student::routes())
        .nest("/api/club", coordinator::routes())
        .layer(Extension(store))
        .layer(CorsLayer::permissive())
}

async fn health() -> &'static str {
    "club network backend running"
}
