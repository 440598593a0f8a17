//! The event lifecycle: scheduling, the edit lock, and sign-up rules.

mod common;

use clubhouse::error::ApiError;
use clubhouse::models::club::Club;
use clubhouse::models::event::{Event, EventUpdate, NewEvent, NewEventFields};
use uuid::Uuid;

use common::*;

fn plain_event(club_id: Uuid, name: &str, day: i64) -> NewEvent {
    NewEvent {
        club_id,
        event: NewEventFields {
            name: name.to_owned(),
            description: None,
            date: datetime(1_000_000 + day * 86_400),
            venue: None,
            registration_start: datetime(900_000),
            registration_end: datetime(1_000_000 + day * 86_400),
            access: None,
        },
    }
}

#[tokio::test]
async fn scheduling_advertises_the_event_on_the_club() {
    let store = seeded_store().await;
    let club = chartered_club("Robotics Club", &store).await;

    let event = scheduled_event(club.id, "Tech Night", 1, &store).await;

    assert_eq!(event.club, club.id);
    assert!(event.registered.is_empty());

    let club = Club::with_id(club.id, &store).await.unwrap();
    assert_eq!(club.events.len(), 1);
    assert_eq!(club.events[0].event_id, event.id);
    assert_eq!(club.events[0].event_name, "Tech Night");
    assert_eq!(club.events[0].event_access.as_deref(), Some("public"));
}

#[tokio::test]
async fn a_club_never_repeats_an_event() {
    let store = seeded_store().await;
    let club = chartered_club("Robotics Club", &store).await;
    scheduled_event(club.id, "Tech Night", 1, &store).await;

    let err = Event::create(plain_event(club.id, "Tech Night", 1), Uuid::new_v4(), &store)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Event already exists");
    assert_eq!(store.events.count().await, 1);
}

#[tokio::test]
async fn a_club_holds_one_event_per_day() {
    let store = seeded_store().await;
    let club = chartered_club("Robotics Club", &store).await;
    scheduled_event(club.id, "Tech Night", 1, &store).await;

    let err = Event::create(plain_event(club.id, "Movie Night", 1), Uuid::new_v4(), &store)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Event already exists for this date");
}

#[tokio::test]
async fn scheduling_needs_an_existing_club() {
    let store = seeded_store().await;

    let err = Event::create(
        plain_event(Uuid::new_v4(), "Tech Night", 1),
        Uuid::new_v4(),
        &store,
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "Club not found");
}

#[tokio::test]
async fn edits_land_while_nobody_is_registered() {
    let store = seeded_store().await;
    let club = chartered_club("Robotics Club", &store).await;
    let event = scheduled_event(club.id, "Tech Night", 1, &store).await;

    Event::update(
        event.id,
        EventUpdate {
            club_id: club.id,
            name: "Hack Night".to_owned(),
            description: "Overnight build".to_owned(),
            venue: "Lab 2".to_owned(),
        },
        COORDINATOR_EMAIL,
        &store,
    )
    .await
    .unwrap();

    let event = Event::with_id(event.id, &store).await.unwrap();
    assert_eq!(event.name, "Hack Night");
    assert_eq!(event.venue, "Lab 2");

    // the advertised copy follows the event document
    let club = Club::with_id(club.id, &store).await.unwrap();
    assert_eq!(club.events[0].event_name, "Hack Night");
    assert_eq!(club.events[0].event_venue, "Lab 2");
}

#[tokio::test]
async fn edits_are_locked_once_signups_exist() {
    let store = seeded_store().await;
    let club = chartered_club("Robotics Club", &store).await;
    let event = scheduled_event(club.id, "Tech Night", 1, &store).await;
    Event::register(
        registration(club.id, event.id, "Maya", GUEST_EMAIL, "G-01"),
        &store,
    )
    .await
    .unwrap();

    let err = Event::update(
        event.id,
        EventUpdate {
            club_id: club.id,
            name: "Hack Night".to_owned(),
            description: "Overnight build".to_owned(),
            venue: "Lab 2".to_owned(),
        },
        COORDINATOR_EMAIL,
        &store,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ApiError::Guarded(_)));
    assert_eq!(err.to_string(), "Unable to edit event after registration");
    let event = Event::with_id(event.id, &store).await.unwrap();
    assert_eq!(event.name, "Tech Night");
}

#[tokio::test]
async fn only_coordinators_of_the_club_edit_its_events() {
    let store = seeded_store().await;
    let club = chartered_club("Robotics Club", &store).await;
    let event = scheduled_event(club.id, "Tech Night", 1, &store).await;

    let update = EventUpdate {
        club_id: club.id,
        name: "Hack Night".to_owned(),
        description: "Overnight build".to_owned(),
        venue: "Lab 2".to_owned(),
    };
    let err = Event::update(event.id, update, OTHER_COORDINATOR_EMAIL, &store)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "You are not a coordinator of this club");
}

#[tokio::test]
async fn edits_check_the_event_against_the_club() {
    let store = seeded_store().await;
    let robotics = chartered_club("Robotics Club", &store).await;
    let drama = chartered_club("Drama Society", &store).await;
    let event = scheduled_event(robotics.id, "Tech Night", 1, &store).await;

    // Dr. Rao runs both clubs, but the event is not Drama Society's
    let update = EventUpdate {
        club_id: drama.id,
        name: "Hack Night".to_owned(),
        description: "Overnight build".to_owned(),
        venue: "Lab 2".to_owned(),
    };
    let err = Event::update(event.id, update, COORDINATOR_EMAIL, &store)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Event not found for this club");
}

#[tokio::test]
async fn signups_record_the_registrant() {
    let store = seeded_store().await;
    let club = chartered_club("Robotics Club", &store).await;
    let event = scheduled_event(club.id, "Tech Night", 1, &store).await;

    Event::register(
        registration(club.id, event.id, "Priya", STUDENT_EMAIL, "21CS001"),
        &store,
    )
    .await
    .unwrap();

    let event = Event::with_id(event.id, &store).await.unwrap();
    assert_eq!(event.registered.len(), 1);
    assert_eq!(event.registered[0].email, STUDENT_EMAIL);
    assert_eq!(event.registered[0].rollno, "21CS001");
    assert_eq!(event.registered[0].department, "CSE");
}

#[tokio::test]
async fn guests_sign_up_like_students() {
    let store = seeded_store().await;
    let club = chartered_club("Robotics Club", &store).await;
    let event = scheduled_event(club.id, "Tech Night", 1, &store).await;

    Event::register(
        registration(club.id, event.id, "Maya", GUEST_EMAIL, "G-01"),
        &store,
    )
    .await
    .unwrap();

    let event = Event::with_id(event.id, &store).await.unwrap();
    assert_eq!(event.registered[0].email, GUEST_EMAIL);
}

#[tokio::test]
async fn unknown_participants_are_turned_away() {
    let store = seeded_store().await;
    let club = chartered_club("Robotics Club", &store).await;
    let event = scheduled_event(club.id, "Tech Night", 1, &store).await;

    let err = Event::register(
        registration(club.id, event.id, "Stranger", "stranger@gmail.com", "X-99"),
        &store,
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "User not registered");
    let event = Event::with_id(event.id, &store).await.unwrap();
    assert!(event.registered.is_empty());
}

#[tokio::test]
async fn signups_need_the_club_to_advertise_the_event() {
    let store = seeded_store().await;
    let robotics = chartered_club("Robotics Club", &store).await;
    let drama = chartered_club("Drama Society", &store).await;
    let event = scheduled_event(robotics.id, "Tech Night", 1, &store).await;

    let err = Event::register(
        registration(drama.id, event.id, "Priya", STUDENT_EMAIL, "21CS001"),
        &store,
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "Event not found for this club");
}

#[tokio::test]
async fn signups_need_the_event_document() {
    let store = seeded_store().await;
    let club = chartered_club("Robotics Club", &store).await;
    let event = scheduled_event(club.id, "Tech Night", 1, &store).await;
    // the club still advertises the event, but the document is gone
    store.events.remove(event.id).await.unwrap();

    let err = Event::register(
        registration(club.id, event.id, "Priya", STUDENT_EMAIL, "21CS001"),
        &store,
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "Event not found");
}

#[tokio::test]
async fn double_signups_by_email_bounce() {
    let store = seeded_store().await;
    let club = chartered_club("Robotics Club", &store).await;
    let event = scheduled_event(club.id, "Tech Night", 1, &store).await;
    Event::register(
        registration(club.id, event.id, "Priya", STUDENT_EMAIL, "21CS001"),
        &store,
    )
    .await
    .unwrap();

    let err = Event::register(
        registration(club.id, event.id, "Priya", STUDENT_EMAIL, "21CS900"),
        &store,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ApiError::Conflict(_)));
    assert_eq!(err.to_string(), "Already registered for this event");
    let event = Event::with_id(event.id, &store).await.unwrap();
    assert_eq!(event.registered.len(), 1);
}

#[tokio::test]
async fn double_signups_by_roll_number_bounce() {
    let store = seeded_store().await;
    let club = chartered_club("Robotics Club", &store).await;
    let event = scheduled_event(club.id, "Tech Night", 1, &store).await;
    Event::register(
        registration(club.id, event.id, "Priya", STUDENT_EMAIL, "21CS001"),
        &store,
    )
    .await
    .unwrap();

    // a different account reusing the roll number is still a duplicate
    let err = Event::register(
        registration(club.id, event.id, "Dev", OTHER_STUDENT_EMAIL, "21CS001"),
        &store,
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "Already registered for this event");
}

#[tokio::test]
async fn participants_see_the_events_they_signed_up_for() {
    let store = seeded_store().await;
    let club = chartered_club("Robotics Club", &store).await;
    let tech_night = scheduled_event(club.id, "Tech Night", 1, &store).await;
    scheduled_event(club.id, "Movie Night", 2, &store).await;
    Event::register(
        registration(club.id, tech_night.id, "Priya", STUDENT_EMAIL, "21CS001"),
        &store,
    )
    .await
    .unwrap();

    let signed_up = Event::registered_by(STUDENT_EMAIL, &store).await;
    assert_eq!(signed_up.len(), 1);
    assert_eq!(signed_up[0].id, tech_night.id);

    assert!(Event::registered_by(OTHER_STUDENT_EMAIL, &store)
        .await
        .is_empty());
}
