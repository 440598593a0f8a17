use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::club::{Club, EventSummary};
use crate::models::guest::Guest;
use crate::models::student::Student;
use crate::store::{Document, Store};
use crate::util::current_time;

/// A club event and everyone signed up for it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub venue: String,
    /// The club organizing the event
    pub club: Uuid,
    /// The coordinator who created the event
    pub created_by: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub registration_start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub registration_end: OffsetDateTime,
    pub registered: Vec<Registrant>,
    pub participations: Vec<Participation>,
    pub attendance_taken_by: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub attendance_taken_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A sign-up on an event.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registrant {
    pub name: String,
    pub email: String,
    pub rollno: String,
    pub department: String,
    pub college: String,
    #[serde(with = "time::serde::rfc3339")]
    pub registered_at: OffsetDateTime,
}

/// An attendance record on an event.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participation {
    pub name: String,
    pub email: String,
    pub rollno: String,
    pub department: String,
    pub college: String,
    #[serde(with = "time::serde::rfc3339")]
    pub participated_at: OffsetDateTime,
}

/// POST body for adding an event to a club.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub club_id: Uuid,
    pub event: NewEventFields,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEventFields {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub registration_start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub registration_end: OffsetDateTime,
    /// Who the event is open to; advertised on the club, not the event
    #[serde(default)]
    pub access: Option<String>,
}

/// PUT body for editing an event's details.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdate {
    pub club_id: Uuid,
    pub name: String,
    pub description: String,
    pub venue: String,
}

/// POST body for signing up for an event.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRegistration {
    pub club_id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub email: String,
    pub rollno: String,
    pub department: String,
    pub college: String,
}

impl Document for Event {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Event {
    pub async fn with_id(id: Uuid, store: &Store) -> ApiResult<Self> {
        Self::with_id_opt(id, store)
            .await
            .ok_or_else(|| ApiError::NotFound("Event not found".to_owned()))
    }

    pub async fn with_id_opt(id: Uuid, store: &Store) -> Option<Self> {
        store.events.get(id).await
    }

    pub async fn all(store: &Store) -> Vec<Self> {
        store.events.all().await
    }

    /// Every event carrying a sign-up under the given email.
    pub async fn registered_by(email: &str, store: &Store) -> Vec<Self> {
        store
            .events
            .filter(|event| event.registered.iter().any(|r| r.email == email))
            .await
    }

    /// Creates an event under a club and advertises it on the club document.
    ///
    /// A club never holds two events with the same name on the same day,
    /// nor two events at the same time.
    pub async fn create(new_event: NewEvent, created_by: Uuid, store: &Store) -> ApiResult<Self> {
        let mut club = Club::with_id(new_event.club_id, store).await?;
        let fields = new_event.event;

        // an exact name + date duplicate reports as such before the
        // broader date collision
        if store
            .events
            .find(|e| e.club == club.id && e.name == fields.name && e.date == fields.date)
            .await
            .is_some()
        {
            return Err(ApiError::Conflict("Event already exists".to_owned()));
        }
        if store
            .events
            .find(|e| e.club == club.id && e.date == fields.date)
            .await
            .is_some()
        {
            return Err(ApiError::Conflict(
                "Event already exists for this date".to_owned(),
            ));
        }

        let event = Event {
            id: Uuid::new_v4(),
            name: fields.name,
            description: fields.description.unwrap_or_default(),
            date: fields.date,
            venue: fields.venue.unwrap_or_default(),
            club: club.id,
            created_by,
            registration_start: fields.registration_start,
            registration_end: fields.registration_end,
            registered: Vec::new(),
            participations: Vec::new(),
            attendance_taken_by: None,
            attendance_taken_at: None,
            created_at: current_time(),
        };
        store.events.save(&event).await?;

        club.events.push(EventSummary::of(&event, fields.access));
        store.clubs.save(&club).await?;

        Ok(event)
    }

    /// Edits an event's details, but only for a coordinator of the club
    /// and only while nobody has registered. Both the event document and
    /// the summary advertised on the club are rewritten.
    pub async fn update(
        id: Uuid,
        update: EventUpdate,
        coordinator_email: &str,
        store: &Store,
    ) -> ApiResult<()> {
        let mut club = Club::coordinated_by(update.club_id, coordinator_email, store).await?;
        if !club.lists_event(id) {
            return Err(ApiError::NotFound(
                "Event not found for this club".to_owned(),
            ));
        }

        let mut event = Self::with_id(id, store).await?;
        if !event.registered.is_empty() {
            return Err(ApiError::Guarded(
                "Unable to edit event after registration".to_owned(),
            ));
        }

        event.name = update.name.clone();
        event.description = update.description.clone();
        event.venue = update.venue.clone();
        store.events.save(&event).await?;

        if let Some(summary) = club.events.iter_mut().find(|e| e.event_id == id) {
            summary.event_name = update.name;
            summary.event_description = update.description;
            summary.event_venue = update.venue;
        }
        store.clubs.save(&club).await?;

        Ok(())
    }

    /// Signs a participant up for an event.
    ///
    /// The duplicate check and the append run inside one document write,
    /// so two racing sign-ups with the same email or roll number cannot
    /// both get in.
    pub async fn register(form: EventRegistration, store: &Store) -> ApiResult<()> {
        let advertised = store
            .clubs
            .find(|club| club.id == form.club_id && club.lists_event(form.event_id))
            .await;
        if advertised.is_none() {
            return Err(ApiError::NotFound(
                "Event not found for this club".to_owned(),
            ));
        }

        // verify exists
        Self::with_id(form.event_id, store).await?;

        let is_student = Student::with_email_opt(&form.email, store).await.is_some();
        let is_guest = Guest::with_email_opt(&form.email, store).await.is_some();
        if !is_student && !is_guest {
            return Err(ApiError::NotFound("User not registered".to_owned()));
        }

        let registrant = Registrant {
            name: form.name,
            email: form.email,
            rollno: form.rollno,
            department: form.department,
            college: form.college,
            registered_at: current_time(),
        };
        let appended = store
            .events
            .update(form.event_id, |event| {
                if event
                    .registered
                    .iter()
                    .any(|r| r.email == registrant.email || r.rollno == registrant.rollno)
                {
                    return false;
                }
                event.registered.push(registrant);
                true
            })
            .await?;

        match appended {
            Some(true) => Ok(()),
            Some(false) => Err(ApiError::Conflict(
                "Already registered for this event".to_owned(),
            )),
            None => Err(ApiError::NotFound("Event not found".to_owned())),
        }
    }
}
