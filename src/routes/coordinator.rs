//! Coordinator dashboard routes: club membership management and events.

use std::sync::Arc;

use axum::extract::Path;
use axum::routing::{delete, get, post, put};
use axum::{Extension, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extract::Caller;
use crate::models::club::Club;
use crate::models::enrollment::Enrollment;
use crate::models::event::{Event, EventUpdate, NewEvent};
use crate::models::student::Student;
use crate::models::{Position, Role};
use crate::store::Store;

pub fn routes() -> Router {
    Router::new()
        .route("/enrolled-students/:club_id", get(enrolled_students))
        .route(
            "/enrolled-clear-students/:club_id",
            delete(clear_enrolled_students),
        )
        .route("/position/:club_id", put(assign_position))
        .route("/position-remove/:club_id", put(remove_position))
        .route("/event/coordinator-check/:club_id", get(coordinator_check))
        .route("/event", post(create_event))
        .route("/edit-event/:event_id", put(edit_event))
        .route("/events/:event_id", get(event_details))
}

/// PUT body for handing out a position.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PositionForm {
    email: String,
    position: Position,
}

/// PUT body for taking a position away.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemovePositionForm {
    email: String,
}

async fn enrolled_students(
    caller: Caller,
    Extension(store): Extension<Arc<Store>>,
    Path(club_id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    caller.authorize(&[Role::ClubCoordinator])?;

    // verify the caller actually runs this club
    Club::coordinated_by(club_id, &caller.email, &store).await?;

    let enrolled = Enrollment::for_club(club_id, &store).await;

    Ok(Json(json!({ "success": true, "data": enrolled })))
}

async fn clear_enrolled_students(
    caller: Caller,
    Extension(store): Extension<Arc<Store>>,
    Path(club_id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    caller.authorize(&[Role::ClubCoordinator])?;

    Club::clear_membership(club_id, &store).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Enrolled students cleared successfully",
    })))
}

async fn assign_position(
    caller: Caller,
    Extension(store): Extension<Arc<Store>>,
    Path(club_id): Path<Uuid>,
    Json(form): Json<PositionForm>,
) -> ApiResult<Json<Value>> {
    caller.authorize(&[Role::ClubCoordinator])?;

    Student::assign_position(&form.email, club_id, form.position, &store).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Position updated successfully",
    })))
}

async fn remove_position(
    caller: Caller,
    Extension(store): Extension<Arc<Store>>,
    Path(club_id): Path<Uuid>,
    Json(form): Json<RemovePositionForm>,
) -> ApiResult<Json<Value>> {
    caller.authorize(&[Role::ClubCoordinator])?;

    Student::remove_position(&form.email, club_id, &store).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Position removed successfully",
    })))
}

async fn coordinator_check(
    caller: Caller,
    Extension(store): Extension<Arc<Store>>,
    Path(club_id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    caller.authorize(&[Role::ClubCoordinator])?;

    let is_coordinator = Club::coordinated_by(club_id, &caller.email, &store)
        .await
        .is_ok();

    Ok(Json(json!({ "isCoordinator": is_coordinator })))
}

async fn create_event(
    caller: Caller,
    Extension(store): Extension<Arc<Store>>,
    Json(new_event): Json<NewEvent>,
) -> ApiResult<Json<Value>> {
    caller.authorize(&[Role::ClubCoordinator])?;

    Event::create(new_event, caller.id, &store).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Event added successfully",
    })))
}

async fn edit_event(
    caller: Caller,
    Extension(store): Extension<Arc<Store>>,
    Path(event_id): Path<Uuid>,
    Json(update): Json<EventUpdate>,
) -> ApiResult<Json<Value>> {
    caller.authorize(&[Role::ClubCoordinator])?;

    Event::update(event_id, update, &caller.email, &store).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Event updated successfully",
    })))
}

async fn event_details(
    caller: Caller,
    Extension(store): Extension<Arc<Store>>,
    Path(event_id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    caller.authorize(&[Role::ClubCoordinator])?;

    let event = Event::with_id(event_id, &store).await?;

    Ok(Json(json!({ "success": true, "data": event })))
}
