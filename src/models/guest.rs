use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::Role;
use crate::store::{Document, Store};

/// An outside participant. Guests never enroll in clubs, but they can
/// register for events.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: Uuid,
    pub name: String,
    /// The guest's email, which must be unique
    pub email: String,
    pub role: Role,
    pub participated_events: Vec<Uuid>,
}

impl Document for Guest {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Guest {
    pub async fn with_email_opt(email: &str, store: &Store) -> Option<Self> {
        store.guests.find(|guest| guest.email == email).await
    }

    pub async fn create(name: &str, email: &str, store: &Store) -> ApiResult<Self> {
        let guest = Guest {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            email: email.to_owned(),
            role: Role::Guest,
            participated_events: Vec::new(),
        };
        let created = store
            .guests
            .insert_unless(&guest, |other| other.email == email)
            .await?;
        if !created {
            return Err(ApiError::Conflict(format!(
                "Another guest already has the email {}",
                email
            )));
        }

        Ok(guest)
    }
}
