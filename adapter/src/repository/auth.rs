use crate::database::model::admin::AdminRow;
use crate::database::ConnectionPool;
use crate::redis::RedisClient;
use async_trait::async_trait;
use chrono::Utc;
use derive_new::new;
use kernel::model::admin::Admin;
use kernel::model::auth::{event::CreateToken, AccessToken};
use kernel::model::id::AdminId;
use kernel::repository::auth::AuthRepository;
use shared::error::{AppError, AppResult};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

const ADMIN_COLUMNS: &str =
    "admin_id, username, email, password_hash, role, is_active, last_login";

#[derive(new)]
pub struct AuthRepositoryImpl {
    db: ConnectionPool,
    kv: Arc<RedisClient>,
    ttl: u64,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn verify_admin(&self, username: &str, password: &str) -> AppResult<Admin> {
        let row = sqlx::query_as::<_, AdminRow>(&format!(
            r#"
                SELECT {ADMIN_COLUMNS} FROM admins
                WHERE (LOWER(username) = $1 OR LOWER(email) = $1) AND is_active = TRUE
            "#
        ))
        .bind(username.to_lowercase())
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(row) = row else {
            return Err(AppError::LoginFailed);
        };
        if !bcrypt::verify(password, &row.password_hash)? {
            return Err(AppError::LoginFailed);
        }

        sqlx::query("UPDATE admins SET last_login = $1 WHERE admin_id = $2")
            .bind(Utc::now())
            .bind(row.admin_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        Admin::try_from(row)
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken> {
        let token = AccessToken(Uuid::new_v4().simple().to_string());
        self.kv
            .set_ex(
                &auth_key(&token),
                &event.admin_id.raw().to_string(),
                self.ttl,
            )
            .await?;
        Ok(token)
    }

    async fn fetch_admin_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<AdminId>> {
        let Some(value) = self.kv.get(&auth_key(access_token)).await? else {
            return Ok(None);
        };
        let raw = Uuid::from_str(&value).map_err(|e| {
            AppError::ConversionEntityError(format!("invalid admin id in token store: {e}"))
        })?;
        Ok(Some(AdminId::from(raw)))
    }

    async fn delete_token(&self, access_token: AccessToken) -> AppResult<()> {
        self.kv.delete(&auth_key(&access_token)).await
    }

    async fn find_admin_by_id(&self, admin_id: AdminId) -> AppResult<Option<Admin>> {
        sqlx::query_as::<_, AdminRow>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE admin_id = $1"
        ))
        .bind(admin_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .map(Admin::try_from)
        .transpose()
    }
}

fn auth_key(token: &AccessToken) -> String {
    format!("admin_session:{}", token.0)
}
