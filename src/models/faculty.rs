use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::Role;
use crate::store::{Document, Store};

/// A faculty account. Faculty become club coordinators by being named on
/// a club, never by having their role set directly.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    pub id: Uuid,
    pub name: String,
    /// The faculty member's email, which must be unique
    pub email: String,
    /// `ClubCoordinator` exactly when `clubs` is non-empty
    pub role: Role,
    /// The clubs this faculty member coordinates
    pub clubs: Vec<Uuid>,
}

impl Document for Faculty {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Faculty {
    pub async fn with_email(email: &str, store: &Store) -> ApiResult<Self> {
        Self::with_email_opt(email, store)
            .await
            .ok_or_else(|| ApiError::NotFound("Faculty not found".to_owned()))
    }

    pub async fn with_email_opt(email: &str, store: &Store) -> Option<Self> {
        store.faculty.find(|faculty| faculty.email == email).await
    }

    pub async fn all(store: &Store) -> Vec<Self> {
        store.faculty.all().await
    }

    pub async fn create(name: &str, email: &str, store: &Store) -> ApiResult<Self> {
        let faculty = Faculty {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            email: email.to_owned(),
            role: Role::Faculty,
            clubs: Vec::new(),
        };
        let created = store
            .faculty
            .insert_unless(&faculty, |other| other.email == email)
            .await?;
        if !created {
            return Err(ApiError::Conflict(format!(
                "Another faculty member already has the email {}",
                email
            )));
        }

        Ok(faculty)
    }

    /// Points this faculty member at a club and promotes them.
    pub fn link_club(&mut self, club_id: Uuid) {
        if !self.clubs.contains(&club_id) {
            self.clubs.push(club_id);
        }
        self.role = Role::ClubCoordinator;
    }

    /// Drops a club from this faculty member, reverting the role once no
    /// coordinated clubs remain.
    pub fn unlink_club(&mut self, club_id: Uuid) {
        self.clubs.retain(|linked| *linked != club_id);
        if self.clubs.is_empty() {
            self.role = Role::Faculty;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faculty() -> Faculty {
        Faculty {
            id: Uuid::new_v4(),
            name: "Prof. Anand".to_owned(),
            email: "anand@campus.edu".to_owned(),
            role: Role::Faculty,
            clubs: Vec::new(),
        }
    }

    #[test]
    fn linking_promotes_and_deduplicates() {
        let mut prof = faculty();
        let club = Uuid::new_v4();

        prof.link_club(club);
        prof.link_club(club);

        assert_eq!(prof.clubs, vec![club]);
        assert_eq!(prof.role, Role::ClubCoordinator);
    }

    #[test]
    fn unlinking_demotes_only_when_no_clubs_remain() {
        let mut prof = faculty();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        prof.link_club(first);
        prof.link_club(second);

        prof.unlink_club(first);
        assert_eq!(prof.role, Role::ClubCoordinator);

        prof.unlink_club(second);
        assert_eq!(prof.role, Role::Faculty);
        assert!(prof.clubs.is_empty());
    }
}
