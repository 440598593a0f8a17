use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::club::Club;
use crate::models::{Position, Role};
use crate::store::{Document, Store};

/// A student account.
///
/// `clubs` lists every club where the student holds a position, and the
/// matching club documents list the student back. Since a position is held
/// in at most one club, the list has zero or one entries.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    /// The student's email, which must be unique
    pub email: String,
    /// `Student` unless a club position says otherwise
    pub role: Role,
    pub clubs: Vec<ClubRef>,
    pub participated_events: Vec<Uuid>,
}

/// A club where a student holds a position.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubRef {
    pub club_id: Uuid,
    pub club_name: String,
}

impl Document for Student {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Student {
    pub async fn with_email(email: &str, store: &Store) -> ApiResult<Self> {
        Self::with_email_opt(email, store)
            .await
            .ok_or_else(|| ApiError::NotFound("Student not found".to_owned()))
    }

    pub async fn with_email_opt(email: &str, store: &Store) -> Option<Self> {
        store.students.find(|student| student.email == email).await
    }

    pub async fn create(name: &str, email: &str, store: &Store) -> ApiResult<Self> {
        let student = Student {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            email: email.to_owned(),
            role: Role::Student,
            clubs: Vec::new(),
            participated_events: Vec::new(),
        };
        let created = store
            .students
            .insert_unless(&student, |other| other.email == email)
            .await?;
        if !created {
            return Err(ApiError::Conflict(format!(
                "Another student already has the email {}",
                email
            )));
        }

        Ok(student)
    }

    /// Hands the student a position in the club, updating the student, their
    /// enrollment, and the club so all three agree.
    ///
    /// When a secretary-class position is already filled, the previous
    /// holder is demoted before the slot changes hands. Writes go to the
    /// side being vacated first, so a failure partway through never leaves
    /// a position claimed by two students.
    pub async fn assign_position(
        email: &str,
        club_id: Uuid,
        position: Position,
        store: &Store,
    ) -> ApiResult<()> {
        let mut student = Self::with_email(email, store).await?;
        let mut club = Club::with_id(club_id, store).await?;

        if student.clubs.iter().any(|held| held.club_id == club_id) {
            return Err(ApiError::Conflict(
                "Student already has a position".to_owned(),
            ));
        }
        if !student.clubs.is_empty() {
            return Err(ApiError::Conflict(
                "Student already holds a position in another club".to_owned(),
            ));
        }
        if position == Position::Member && club.members.iter().any(|m| m.email == student.email) {
            return Err(ApiError::Conflict(
                "Student is already a member of this club".to_owned(),
            ));
        }

        // a filled secretary slot changes hands
        if let Some(previous) = club.position_holder(position) {
            if previous.email != student.email {
                if let Some(mut holder) = Self::with_email_opt(&previous.email, store).await {
                    Self::reset_standing(&mut holder, club_id, store).await?;
                }
            }
        }

        if let Some(mut enrollment) = store
            .enrollments
            .find(|e| e.email == student.email && e.references_club(club_id))
            .await
        {
            enrollment.role = position.into();
            store.enrollments.save(&enrollment).await?;
        }

        student.role = position.into();
        student.clubs.push(ClubRef {
            club_id,
            club_name: club.name.clone(),
        });
        store.students.save(&student).await?;

        club.give_position(position, &student);
        store.clubs.save(&club).await?;

        Ok(())
    }

    /// Strips the student of whatever they hold in the club. Safe to call
    /// again once it has succeeded.
    pub async fn remove_position(email: &str, club_id: Uuid, store: &Store) -> ApiResult<()> {
        let mut student = Self::with_email(email, store).await?;
        Self::reset_standing(&mut student, club_id, store).await?;

        if let Some(mut club) = store.clubs.get(club_id).await {
            club.clear_position_of(&student.email);
            store.clubs.save(&club).await?;
        }

        Ok(())
    }

    /// Reverts the student's own record and their enrollment to plain
    /// student standing. The club document is the caller's problem.
    async fn reset_standing(student: &mut Student, club_id: Uuid, store: &Store) -> ApiResult<()> {
        student.clubs.retain(|held| held.club_id != club_id);
        student.role = Role::Student;
        store.students.save(student).await?;

        if let Some(mut enrollment) = store
            .enrollments
            .find(|e| e.email == student.email)
            .await
        {
            enrollment.role = Role::Student;
            store.enrollments.save(&enrollment).await?;
        }

        Ok(())
    }
}
