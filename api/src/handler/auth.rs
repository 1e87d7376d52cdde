use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use kernel::model::auth::event::CreateToken;
use registry::AppRegistry;
use shared::error::AppResult;

use crate::extractor::AuthorizedAdmin;
use crate::model::auth::{AccessTokenResponse, AdminResponse, LoginRequest};

pub async fn login(
    State(registry): State<AppRegistry>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AccessTokenResponse>> {
    req.validate(&())?;
    let admin = registry
        .auth_repository()
        .verify_admin(&req.username, &req.password)
        .await?;
    let access_token = registry
        .auth_repository()
        .create_token(CreateToken::new(admin.id))
        .await?;
    Ok(Json(AccessTokenResponse::new(admin.id, access_token)))
}

pub async fn logout(
    admin: AuthorizedAdmin,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .auth_repository()
        .delete_token(admin.access_token)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn show_current_admin(admin: AuthorizedAdmin) -> Json<AdminResponse> {
    Json(AdminResponse::from(admin.admin))
}
