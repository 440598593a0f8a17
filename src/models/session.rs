use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::Role;
use crate::store::{Document, Store};

/// An opaque login token tied to one account.
///
/// The role is captured at issue time. Accounts whose role changes later
/// keep acting under the old role until they log in again.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Uuid,
    pub token: String,
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

impl Document for Session {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Session {
    pub async fn with_token(token: &str, store: &Store) -> ApiResult<Self> {
        Self::with_token_opt(token, store)
            .await
            .ok_or(ApiError::InvalidToken)
    }

    pub async fn with_token_opt(token: &str, store: &Store) -> Option<Self> {
        store.sessions.find(|session| session.token == token).await
    }

    /// Issues a token for the account, reusing the existing one when the
    /// account already has a live session.
    pub async fn get_or_generate_token(
        user_id: Uuid,
        email: &str,
        role: Role,
        store: &Store,
    ) -> ApiResult<String> {
        if let Some(session) = store.sessions.find(|session| session.email == email).await {
            return Ok(session.token);
        }

        let session = Session {
            id: Uuid::new_v4(),
            token: Uuid::new_v4().to_string(),
            user_id,
            email: email.to_owned(),
            role,
        };
        store.sessions.save(&session).await?;

        Ok(session.token)
    }

    /// Installs a session with a caller-chosen token, for seeding a login
    /// from the environment.
    pub async fn install(
        token: &str,
        user_id: Uuid,
        email: &str,
        role: Role,
        store: &Store,
    ) -> ApiResult<()> {
        if Self::with_token_opt(token, store).await.is_some() {
            return Ok(());
        }

        let session = Session {
            id: Uuid::new_v4(),
            token: token.to_owned(),
            user_id,
            email: email.to_owned(),
            role,
        };
        store.sessions.save(&session).await?;

        Ok(())
    }
}
