//! Student and guest routes: club enrollment and event registration.

use std::sync::Arc;

use axum::extract::Query;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::extract::Caller;
use crate::models::enrollment::{Enrollment, EnrollmentForm};
use crate::models::event::{Event, EventRegistration};
use crate::models::Role;
use crate::store::Store;

pub fn routes() -> Router {
    Router::new()
        .route("/enroll", post(enroll))
        .route("/event-register", post(event_register))
        .route("/register-events", get(registered_events))
}

#[derive(Debug, Deserialize)]
struct EmailQuery {
    email: String,
}

async fn enroll(
    caller: Caller,
    Extension(store): Extension<Arc<Store>>,
    Json(form): Json<EnrollmentForm>,
) -> ApiResult<Json<Value>> {
    caller.authorize(&[Role::Student])?;

    if form.student_email.is_empty()
        || form.rollno.is_empty()
        || form.cls.is_empty()
        || form.section.is_empty()
    {
        return Err(ApiError::BadRequest("Fill all fields".to_owned()));
    }

    let enrollment = Enrollment::create(form, &store).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Enrolled successfully",
        "data": enrollment,
    })))
}

async fn event_register(
    caller: Caller,
    Extension(store): Extension<Arc<Store>>,
    Json(form): Json<EventRegistration>,
) -> ApiResult<Json<Value>> {
    caller.authorize(&[Role::Student, Role::Guest, Role::StudentIntra])?;

    Event::register(form, &store).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Registered successfully",
    })))
}

async fn registered_events(
    caller: Caller,
    Extension(store): Extension<Arc<Store>>,
    Query(query): Query<EmailQuery>,
) -> ApiResult<Json<Value>> {
    caller.authorize(&[Role::Student, Role::Guest, Role::StudentIntra])?;

    let events = Event::registered_by(&query.email, &store).await;

    Ok(Json(json!({ "success": true, "data": events })))
}
