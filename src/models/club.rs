use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::enrollment::{CoordinatorContact, Enrollment};
use crate::models::event::Event;
use crate::models::faculty::Faculty;
use crate::models::student::Student;
use crate::models::{Position, Role};
use crate::store::{Document, Store};
use crate::util::current_time;

/// A club, the hub document everything else points at.
///
/// Coordinators, position holders, and advertised events are denormalized
/// onto the club so a dashboard loads from one document. Each embedded
/// entry has a real document elsewhere that must agree with it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub id: Uuid,
    /// The club's name, which must be unique
    pub name: String,
    pub description: Option<String>,
    /// The faculty running the club; the first entry is the acting coordinator
    pub coordinators: Vec<Coordinator>,
    pub secretary: Option<PositionHolder>,
    pub additional_secretary: Option<PositionHolder>,
    pub joint_secretary: Option<PositionHolder>,
    pub members: Vec<MemberEntry>,
    /// Events advertised by this club
    pub events: Vec<EventSummary>,
    pub created_by: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A faculty member as named on a club.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinator {
    pub faculty_id: Uuid,
    pub name: String,
    pub email: String,
}

/// The student filling a secretary-class slot.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionHolder {
    pub name: String,
    pub email: String,
}

impl PositionHolder {
    pub fn of(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            email: student.email.clone(),
        }
    }
}

/// A student holding plain membership in a club.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberEntry {
    pub student_id: Uuid,
    pub name: String,
    pub email: String,
}

/// An event as advertised on its club.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub event_id: Uuid,
    pub event_name: String,
    pub event_description: String,
    pub event_venue: String,
    #[serde(with = "time::serde::rfc3339")]
    pub event_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub event_registration_start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub event_registration_end: OffsetDateTime,
    pub event_access: Option<String>,
}

impl EventSummary {
    pub fn of(event: &Event, access: Option<String>) -> Self {
        Self {
            event_id: event.id,
            event_name: event.name.clone(),
            event_description: event.description.clone(),
            event_venue: event.venue.clone(),
            event_date: event.date,
            event_registration_start: event.registration_start,
            event_registration_end: event.registration_end,
            event_access: access,
        }
    }
}

/// POST body for chartering a club.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClub {
    pub club_name: String,
    pub coordinator_email: String,
}

/// PUT body for renaming a club or handing it to another coordinator.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubUpdate {
    pub club_name: Option<String>,
    pub coordinator_email: Option<String>,
}

impl Document for Club {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Club {
    pub async fn with_id(id: Uuid, store: &Store) -> ApiResult<Self> {
        Self::with_id_opt(id, store)
            .await
            .ok_or_else(|| ApiError::NotFound("Club not found".to_owned()))
    }

    pub async fn with_id_opt(id: Uuid, store: &Store) -> Option<Self> {
        store.clubs.get(id).await
    }

    pub async fn all(store: &Store) -> Vec<Self> {
        store.clubs.all().await
    }

    /// The club, provided the email belongs to one of its coordinators.
    pub async fn coordinated_by(id: Uuid, email: &str, store: &Store) -> ApiResult<Self> {
        store
            .clubs
            .find(|club| club.id == id && club.is_coordinator(email))
            .await
            .ok_or_else(|| {
                ApiError::NotFound("You are not a coordinator of this club".to_owned())
            })
    }

    pub fn is_coordinator(&self, email: &str) -> bool {
        self.coordinators.iter().any(|c| c.email == email)
    }

    pub fn coordinator(&self) -> Option<&Coordinator> {
        self.coordinators.first()
    }

    fn set_coordinator(&mut self, coordinator: Coordinator) {
        if self.coordinators.is_empty() {
            self.coordinators.push(coordinator);
        } else {
            self.coordinators[0] = coordinator;
        }
    }

    /// Coordinator details for enrollment snapshots. Clubs that have lost
    /// their coordinator advertise blank details rather than none.
    pub fn coordinator_contact(&self) -> CoordinatorContact {
        match self.coordinator() {
            Some(coordinator) => CoordinatorContact {
                name: coordinator.name.clone(),
                email: coordinator.email.clone(),
            },
            None => CoordinatorContact {
                name: String::new(),
                email: String::new(),
            },
        }
    }

    pub fn lists_event(&self, event_id: Uuid) -> bool {
        self.events.iter().any(|event| event.event_id == event_id)
    }

    pub fn position_holder(&self, position: Position) -> Option<&PositionHolder> {
        match position {
            Position::Secretary => self.secretary.as_ref(),
            Position::AdditionalSecretary => self.additional_secretary.as_ref(),
            Position::JointSecretary => self.joint_secretary.as_ref(),
            Position::Member => None,
        }
    }

    /// Records a student on the club side of a position assignment.
    pub fn give_position(&mut self, position: Position, student: &Student) {
        match position {
            Position::Member => self.members.push(MemberEntry {
                student_id: student.id,
                name: student.name.clone(),
                email: student.email.clone(),
            }),
            Position::Secretary => self.secretary = Some(PositionHolder::of(student)),
            Position::AdditionalSecretary => {
                self.additional_secretary = Some(PositionHolder::of(student))
            }
            Position::JointSecretary => self.joint_secretary = Some(PositionHolder::of(student)),
        }
    }

    /// Clears whatever the student holds in this club. Slots are checked
    /// before the member list, always in the same order, so the outcome
    /// never depends on how the club got into its current shape.
    pub fn clear_position_of(&mut self, email: &str) {
        if self.secretary.as_ref().map(|s| s.email.as_str()) == Some(email) {
            self.secretary = None;
        } else if self.additional_secretary.as_ref().map(|s| s.email.as_str()) == Some(email) {
            self.additional_secretary = None;
        } else if self.joint_secretary.as_ref().map(|s| s.email.as_str()) == Some(email) {
            self.joint_secretary = None;
        } else {
            self.members.retain(|member| member.email != email);
        }
    }

    /// Charters a club under the given faculty coordinator.
    pub async fn create(form: NewClub, created_by: Uuid, store: &Store) -> ApiResult<Self> {
        let mut coordinator = Faculty::with_email(&form.coordinator_email, store).await?;

        if store
            .clubs
            .find(|club| club.name == form.club_name)
            .await
            .is_some()
        {
            return Err(ApiError::Conflict("Club already exists".to_owned()));
        }

        let club = Club {
            id: Uuid::new_v4(),
            name: form.club_name,
            description: None,
            coordinators: vec![Coordinator {
                faculty_id: coordinator.id,
                name: coordinator.name.clone(),
                email: coordinator.email.clone(),
            }],
            secretary: None,
            additional_secretary: None,
            joint_secretary: None,
            members: Vec::new(),
            events: Vec::new(),
            created_by,
            created_at: current_time(),
        };
        store.clubs.save(&club).await?;

        coordinator.link_club(club.id);
        store.faculty.save(&coordinator).await?;

        Ok(club)
    }

    /// Applies an admin edit: a coordinator handover, a rename, or both.
    pub async fn update(id: Uuid, update: ClubUpdate, store: &Store) -> ApiResult<()> {
        if update.club_name.is_none() && update.coordinator_email.is_none() {
            return Err(ApiError::BadRequest(
                "At least one field is required".to_owned(),
            ));
        }

        // verify exists
        Self::with_id(id, store).await?;

        if let Some(email) = &update.coordinator_email {
            Self::assign_coordinator(id, email, store).await?;
        }

        if let Some(name) = update.club_name {
            let mut club = Self::with_id(id, store).await?;
            club.name = name;
            store.clubs.save(&club).await?;
        }

        Ok(())
    }

    /// Hands the club to another faculty coordinator.
    ///
    /// The incoming faculty is resolved before anything is written, so a
    /// bad email leaves every document untouched. After the handover, the
    /// coordinator details carried by this club's enrollments are refreshed
    /// to match.
    pub async fn assign_coordinator(
        id: Uuid,
        coordinator_email: &str,
        store: &Store,
    ) -> ApiResult<()> {
        let mut club = Self::with_id(id, store).await?;
        if club.coordinator().map(|c| c.email.as_str()) == Some(coordinator_email) {
            return Ok(());
        }

        let mut incoming = Faculty::with_email_opt(coordinator_email, store)
            .await
            .ok_or_else(|| ApiError::NotFound("New faculty not found".to_owned()))?;

        if let Some(previous) = club.coordinator().cloned() {
            if let Some(mut outgoing) = Faculty::with_email_opt(&previous.email, store).await {
                outgoing.unlink_club(id);
                store.faculty.save(&outgoing).await?;
            }
        }

        incoming.link_club(id);
        store.faculty.save(&incoming).await?;

        club.set_coordinator(Coordinator {
            faculty_id: incoming.id,
            name: incoming.name.clone(),
            email: incoming.email.clone(),
        });
        store.clubs.save(&club).await?;

        let contact = club.coordinator_contact();
        for mut enrollment in Enrollment::for_club(id, store).await {
            enrollment.refresh_coordinator(id, &contact);
            store.enrollments.save(&enrollment).await?;
        }

        Ok(())
    }

    /// Deletes a club, refusing while enrollments or events still point at
    /// it. Coordinators are unlinked before the club document goes away.
    pub async fn delete(id: Uuid, store: &Store) -> ApiResult<Self> {
        let club = Self::with_id(id, store).await?;

        if store
            .enrollments
            .find(|enrollment| enrollment.references_club(id))
            .await
            .is_some()
        {
            return Err(ApiError::Conflict(
                "Cannot delete a club with enrolled students".to_owned(),
            ));
        }
        if store.events.find(|event| event.club == id).await.is_some() {
            return Err(ApiError::Conflict(
                "Cannot delete a club with events".to_owned(),
            ));
        }

        for coordinator in &club.coordinators {
            if let Some(mut faculty) = store.faculty.get(coordinator.faculty_id).await {
                faculty.unlink_club(id);
                store.faculty.save(&faculty).await?;
            }
        }

        store.clubs.remove(id).await?;

        Ok(club)
    }

    /// Resets the club's whole student side: every position holder reverts
    /// to plain student standing, the club's slots and member list empty
    /// out, and all enrollments in the club are dropped. Running it again
    /// on an already-cleared club is a no-op.
    pub async fn clear_membership(id: Uuid, store: &Store) -> ApiResult<()> {
        let holders = store
            .students
            .filter(|student| student.clubs.iter().any(|held| held.club_id == id))
            .await;
        for mut student in holders {
            student.clubs.retain(|held| held.club_id != id);
            student.role = Role::Student;
            store.students.save(&student).await?;
        }

        if let Some(mut club) = store.clubs.get(id).await {
            club.secretary = None;
            club.additional_secretary = None;
            club.joint_secretary = None;
            club.members.clear();
            store.clubs.save(&club).await?;
        }

        for enrollment in Enrollment::for_club(id, store).await {
            store.enrollments.remove(enrollment.id).await?;
        }

        Ok(())
    }
}
