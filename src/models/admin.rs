use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::Role;
use crate::store::{Document, Store};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: Uuid,
    pub name: String,
    /// The admin's email, which must be unique
    pub email: String,
    pub role: Role,
}

impl Document for Admin {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Admin {
    pub async fn with_email_opt(email: &str, store: &Store) -> Option<Self> {
        store.admins.find(|admin| admin.email == email).await
    }

    pub async fn create(name: &str, email: &str, store: &Store) -> ApiResult<Self> {
        let admin = Admin {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            email: email.to_owned(),
            role: Role::Admin,
        };
        let created = store
            .admins
            .insert_unless(&admin, |other| other.email == email)
            .await?;
        if !created {
            return Err(ApiError::Conflict(format!(
                "Another admin already has the email {}",
                email
            )));
        }

        Ok(admin)
    }
}
