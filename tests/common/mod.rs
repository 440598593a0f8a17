//! Shared fixtures for the integration tests: a seeded store, a router
//! with one live session per role, and request helpers.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use clubhouse::models::admin::Admin;
use clubhouse::models::club::{Club, NewClub};
use clubhouse::models::enrollment::{Enrollment, EnrollmentForm};
use clubhouse::models::event::{Event, EventRegistration, NewEvent, NewEventFields};
use clubhouse::models::faculty::Faculty;
use clubhouse::models::guest::Guest;
use clubhouse::models::session::Session;
use clubhouse::models::student::Student;
use clubhouse::models::Role;
use clubhouse::routes;
use clubhouse::store::Store;
use serde_json::Value;
use time::OffsetDateTime;
use tower::ServiceExt;
use uuid::Uuid;

pub const ADMIN_EMAIL: &'static str = "admin@campus.edu";
pub const COORDINATOR_EMAIL: &'static str = "rao@campus.edu";
pub const OTHER_COORDINATOR_EMAIL: &'static str = "iyer@campus.edu";
pub const STUDENT_EMAIL: &'static str = "priya@campus.edu";
pub const OTHER_STUDENT_EMAIL: &'static str = "dev@campus.edu";
pub const GUEST_EMAIL: &'static str = "maya@gmail.com";

pub const ADMIN_TOKEN: &'static str = "admin-token";
pub const COORDINATOR_TOKEN: &'static str = "coordinator-token";
pub const STUDENT_TOKEN: &'static str = "student-token";
pub const GUEST_TOKEN: &'static str = "guest-token";

/// A store seeded with one account of every kind.
pub async fn seeded_store() -> Arc<Store> {
    let store = Store::new();
    Admin::create("Administrator", ADMIN_EMAIL, &store)
        .await
        .unwrap();
    Faculty::create("Dr. Rao", COORDINATOR_EMAIL, &store)
        .await
        .unwrap();
    Faculty::create("Dr. Iyer", OTHER_COORDINATOR_EMAIL, &store)
        .await
        .unwrap();
    Student::create("Priya", STUDENT_EMAIL, &store).await.unwrap();
    Student::create("Dev", OTHER_STUDENT_EMAIL, &store)
        .await
        .unwrap();
    Guest::create("Maya", GUEST_EMAIL, &store).await.unwrap();

    store
}

/// The app over a seeded store, with a session installed per role.
///
/// Dr. Rao's session already carries the coordinator role, so routes can
/// be exercised without replaying a login after the club is chartered.
pub async fn seeded_app() -> (Router, Arc<Store>) {
    let store = seeded_store().await;

    let admin = Admin::with_email_opt(ADMIN_EMAIL, &store).await.unwrap();
    Session::install(ADMIN_TOKEN, admin.id, &admin.email, Role::Admin, &store)
        .await
        .unwrap();

    let faculty = Faculty::with_email(COORDINATOR_EMAIL, &store).await.unwrap();
    Session::install(
        COORDINATOR_TOKEN,
        faculty.id,
        &faculty.email,
        Role::ClubCoordinator,
        &store,
    )
    .await
    .unwrap();

    let student = Student::with_email(STUDENT_EMAIL, &store).await.unwrap();
    Session::install(
        STUDENT_TOKEN,
        student.id,
        &student.email,
        Role::Student,
        &store,
    )
    .await
    .unwrap();

    let guest = Guest::with_email_opt(GUEST_EMAIL, &store).await.unwrap();
    Session::install(GUEST_TOKEN, guest.id, &guest.email, Role::Guest, &store)
        .await
        .unwrap();

    (routes::app(Arc::clone(&store)), store)
}

pub fn datetime(timestamp: i64) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(timestamp).unwrap()
}

/// Charters a club under Dr. Rao.
pub async fn chartered_club(name: &str, store: &Arc<Store>) -> Club {
    let admin = Admin::with_email_opt(ADMIN_EMAIL, store).await.unwrap();
    Club::create(
        NewClub {
            club_name: name.to_owned(),
            coordinator_email: COORDINATOR_EMAIL.to_owned(),
        },
        admin.id,
        store,
    )
    .await
    .unwrap()
}

/// Schedules an event under the club, one day apart per `day` so that
/// several events in one test never collide.
pub async fn scheduled_event(club_id: Uuid, name: &str, day: i64, store: &Arc<Store>) -> Event {
    let coordinator = Faculty::with_email(COORDINATOR_EMAIL, store).await.unwrap();
    let new_event = NewEvent {
        club_id,
        event: NewEventFields {
            name: name.to_owned(),
            description: Some("An evening to remember".to_owned()),
            date: datetime(1_000_000 + day * 86_400),
            venue: Some("Main auditorium".to_owned()),
            registration_start: datetime(900_000),
            registration_end: datetime(1_000_000 + day * 86_400),
            access: Some("public".to_owned()),
        },
    };

    Event::create(new_event, coordinator.id, store).await.unwrap()
}

/// Enrolls the student in the club.
pub async fn enrolled(
    student_email: &str,
    rollno: &str,
    club_id: Uuid,
    store: &Arc<Store>,
) -> Enrollment {
    Enrollment::create(
        EnrollmentForm {
            student_email: student_email.to_owned(),
            club_id,
            rollno: rollno.to_owned(),
            cls: "CSE-3".to_owned(),
            section: "B".to_owned(),
        },
        store,
    )
    .await
    .unwrap()
}

/// A filled-in sign-up form for the event.
pub fn registration(
    club_id: Uuid,
    event_id: Uuid,
    name: &str,
    email: &str,
    rollno: &str,
) -> EventRegistration {
    EventRegistration {
        club_id,
        event_id,
        name: name.to_owned(),
        email: email.to_owned(),
        rollno: rollno.to_owned(),
        department: "CSE".to_owned(),
        college: "Hilltop Engineering College".to_owned(),
    }
}

pub async fn request(
    app: &Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}

pub async fn get(app: &Router, path: &str, token: Option<&str>) -> (StatusCode, Value) {
    request(app, "GET", path, token, None).await
}

pub async fn post(
    app: &Router,
    path: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    request(app, "POST", path, token, Some(body)).await
}

pub async fn put(
    app: &Router,
    path: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    request(app, "PUT", path, token, Some(body)).await
}

pub async fn delete(app: &Router, path: &str, token: Option<&str>) -> (StatusCode, Value) {
    request(app, "DELETE", path, token, None).await
}
