use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::club::Club;
use crate::models::Role;
use crate::store::{Document, Store};
use crate::util::current_time;

/// A student's membership in a club, at most one per student.
///
/// Carries denormalized club and coordinator details so the enrollment can
/// be displayed without chasing references. Coordinator details are
/// refreshed whenever the club's coordinator changes.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: Uuid,
    pub student: Uuid,
    pub name: String,
    pub email: String,
    pub rollno: String,
    pub cls: String,
    pub section: String,
    /// Mirrors the student's role while they hold a position in the club
    pub role: Role,
    pub clubs: Vec<EnrolledClub>,
    #[serde(with = "time::serde::rfc3339")]
    pub enrolled_at: OffsetDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledClub {
    pub club_id: Uuid,
    pub club_name: String,
    pub coordinator: CoordinatorContact,
}

/// Coordinator details as advertised to enrolled students.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinatorContact {
    pub name: String,
    pub email: String,
}

/// POST body for enrolling in a club.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentForm {
    pub student_email: String,
    pub club_id: Uuid,
    pub rollno: String,
    pub cls: String,
    pub section: String,
}

impl Document for Enrollment {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Enrollment {
    pub fn references_club(&self, club_id: Uuid) -> bool {
        self.clubs.iter().any(|club| club.club_id == club_id)
    }

    pub async fn for_club(club_id: Uuid, store: &Store) -> Vec<Self> {
        store
            .enrollments
            .filter(|enrollment| enrollment.references_club(club_id))
            .await
    }

    /// Enrolls a student in a club. The uniqueness check and the insert run
    /// atomically, so two racing enrollments for the same student cannot
    /// both land.
    pub async fn create(form: EnrollmentForm, store: &Store) -> ApiResult<Self> {
        let student = store
            .students
            .find(|s| s.email == form.student_email && s.role == Role::Student)
            .await
            .ok_or_else(|| ApiError::NotFound("Student not found".to_owned()))?;
        let club = Club::with_id(form.club_id, store).await?;

        let enrollment = Enrollment {
            id: Uuid::new_v4(),
            student: student.id,
            name: student.name.clone(),
            email: student.email.clone(),
            rollno: form.rollno,
            cls: form.cls,
            section: form.section,
            role: student.role,
            clubs: vec![EnrolledClub {
                club_id: club.id,
                club_name: club.name.clone(),
                coordinator: club.coordinator_contact(),
            }],
            enrolled_at: current_time(),
        };

        let enrolled = store
            .enrollments
            .insert_unless(&enrollment, |existing| existing.email == enrollment.email)
            .await?;
        if !enrolled {
            return Err(ApiError::Conflict(
                "Student already enrolled in a club".to_owned(),
            ));
        }

        Ok(enrollment)
    }

    /// Rewrites the coordinator details this enrollment carries for a club.
    pub fn refresh_coordinator(&mut self, club_id: Uuid, contact: &CoordinatorContact) {
        for club in self.clubs.iter_mut().filter(|c| c.club_id == club_id) {
            club.coordinator = contact.clone();
        }
    }
}
