use crate::model::admin::Admin;
use crate::model::auth::{event::CreateToken, AccessToken};
use crate::model::id::AdminId;
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Looks an active admin up by username or email and checks the password.
    /// Unknown account and wrong password are indistinguishable to the caller.
    async fn verify_admin(&self, username: &str, password: &str) -> AppResult<Admin>;
    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken>;
    async fn fetch_admin_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<AdminId>>;
    async fn delete_token(&self, access_token: AccessToken) -> AppResult<()>;
    async fn find_admin_by_id(&self, admin_id: AdminId) -> AppResult<Option<Admin>>;
}
