use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts, RequestPartsExt};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use kernel::model::{admin::Admin, auth::AccessToken, id::AdminId};
use registry::AppRegistry;
use shared::error::AppError;

/// Resolves the bearer token to a live admin session. Any handler taking
/// this as an argument is admin-only.
pub struct AuthorizedAdmin {
    pub admin: Admin,
    pub access_token: AccessToken,
}

impl AuthorizedAdmin {
    pub fn id(&self) -> AdminId {
        self.admin.id
    }
}

#[async_trait]
impl FromRequestParts<AppRegistry> for AuthorizedAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::UnauthenticatedError)?;
        let access_token = AccessToken(bearer.token().to_string());

        let admin_id = registry
            .auth_repository()
            .fetch_admin_id_from_token(&access_token)
            .await?
            .ok_or(AppError::UnauthenticatedError)?;
        let admin = registry
            .auth_repository()
            .find_admin_by_id(admin_id)
            .await?
            .ok_or(AppError::UnauthenticatedError)?;
        if !admin.is_active {
            return Err(AppError::UnauthenticatedError);
        }

        Ok(Self {
            admin,
            access_token,
        })
    }
}
