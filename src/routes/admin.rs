//! Admin dashboard routes: chartering and editing clubs, plus onboarding
//! accounts of every kind.

use std::sync::Arc;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Extension, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extract::Caller;
use crate::models::club::{Club, ClubUpdate, NewClub};
use crate::models::event::Event;
use crate::models::faculty::Faculty;
use crate::models::guest::Guest;
use crate::models::session::Session;
use crate::models::student::Student;
use crate::models::Role;
use crate::store::Store;

pub fn routes() -> Router {
    Router::new()
        .route("/create-club", post(create_club))
        .route("/clubs", get(all_clubs))
        .route("/edit-clubs/:id", put(edit_club))
        .route("/delete-clubs/:id", delete(delete_club))
        .route("/emails", get(faculty_emails))
        .route("/events", get(all_events))
        .route("/add-faculty", post(add_faculty))
        .route("/add-student", post(add_student))
        .route("/add-guest", post(add_guest))
}

/// POST body for onboarding an account.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewAccount {
    name: String,
    email: String,
}

async fn create_club(
    caller: Caller,
    Extension(store): Extension<Arc<Store>>,
    Json(form): Json<NewClub>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    caller.authorize(&[Role::Admin])?;

    let club = Club::create(form, caller.id, &store).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Club created successfully",
            "data": club,
        })),
    ))
}

async fn all_clubs(
    caller: Caller,
    Extension(store): Extension<Arc<Store>>,
) -> ApiResult<Json<Value>> {
    caller.authorize(&[
        Role::Admin,
        Role::Faculty,
        Role::Student,
        Role::Guest,
        Role::StudentIntra,
        Role::ClubCoordinator,
        Role::Secretary,
        Role::AdditionalSecretary,
        Role::JointSecretary,
        Role::Member,
        Role::EnrolledStudent,
    ])?;

    let clubs = Club::all(&store).await;

    Ok(Json(json!({ "success": true, "data": clubs })))
}

async fn edit_club(
    caller: Caller,
    Extension(store): Extension<Arc<Store>>,
    Path(id): Path<Uuid>,
    Json(update): Json<ClubUpdate>,
) -> ApiResult<Json<Value>> {
    caller.authorize(&[Role::Admin])?;

    Club::update(id, update, &store).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Club updated successfully",
    })))
}

async fn delete_club(
    caller: Caller,
    Extension(store): Extension<Arc<Store>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    caller.authorize(&[Role::Admin])?;

    let club = Club::delete(id, &store).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Club deleted successfully",
        "data": club,
    })))
}

async fn faculty_emails(
    caller: Caller,
    Extension(store): Extension<Arc<Store>>,
) -> ApiResult<Json<Value>> {
    caller.authorize(&[Role::Admin])?;

    let faculty = Faculty::all(&store).await;

    Ok(Json(json!({ "success": true, "data": faculty })))
}

async fn all_events(
    caller: Caller,
    Extension(store): Extension<Arc<Store>>,
) -> ApiResult<Json<Value>> {
    caller.authorize(&[Role::Admin])?;

    let events = Event::all(&store).await;

    Ok(Json(json!({ "success": true, "data": events })))
}

async fn add_faculty(
    caller: Caller,
    Extension(store): Extension<Arc<Store>>,
    Json(form): Json<NewAccount>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    caller.authorize(&[Role::Admin])?;

    let faculty = Faculty::create(&form.name, &form.email, &store).await?;
    let token =
        Session::get_or_generate_token(faculty.id, &faculty.email, faculty.role, &store).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Faculty account created",
            "data": { "faculty": faculty, "token": token },
        })),
    ))
}

async fn add_student(
    caller: Caller,
    Extension(store): Extension<Arc<Store>>,
    Json(form): Json<NewAccount>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    caller.authorize(&[Role::Admin])?;

    let student = Student::create(&form.name, &form.email, &store).await?;
    let token =
        Session::get_or_generate_token(student.id, &student.email, student.role, &store).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Student account created",
            "data": { "student": student, "token": token },
        })),
    ))
}

async fn add_guest(
    caller: Caller,
    Extension(store): Extension<Arc<Store>>,
    Json(form): Json<NewAccount>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    caller.authorize(&[Role::Admin])?;

    let guest = Guest::create(&form.name, &form.email, &store).await?;
    let token = Session::get_or_generate_token(guest.id, &guest.email, guest.role, &store).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Guest account created",
            "data": { "guest": guest, "token": token },
        })),
    ))
}
