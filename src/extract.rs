use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::rejection::TypedHeaderRejectionReason;
use axum::extract::{Extension, FromRequest, RequestParts};
use axum::headers::authorization::{Authorization, Bearer};
use axum::TypedHeader;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::session::Session;
use crate::models::Role;
use crate::store::Store;

/// The authenticated account behind a request, resolved from the bearer
/// token in the `Authorization` header.
#[derive(Clone, Debug)]
pub struct Caller {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

impl Caller {
    /// Rejects callers whose role is not on the list.
    pub fn authorize(&self, allowed: &[Role]) -> Result<(), ApiError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }
}

#[async_trait]
impl<B: Send> FromRequest<B> for Caller {
    type Rejection = ApiError;

    async fn from_request(req: &mut RequestParts<B>) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request(req)
                .await
                .map_err(|rejection| match rejection.reason() {
                    TypedHeaderRejectionReason::Missing => ApiError::Unauthorized,
                    _ => ApiError::InvalidToken,
                })?;

        let Extension(store) = Extension::<Arc<Store>>::from_request(req)
            .await
            .map_err(|err| ApiError::ServerError(err.to_string()))?;

        let session = Session::with_token(bearer.token(), &store).await?;

        Ok(Caller {
            id: session.user_id,
            email: session.email,
            role: session.role,
        })
    }
}
