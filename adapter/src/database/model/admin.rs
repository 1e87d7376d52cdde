use chrono::{DateTime, Utc};
use kernel::model::admin::{Admin, AdminRole};
use kernel::model::id::AdminId;
use shared::error::AppError;
use sqlx::FromRow;
use std::str::FromStr;

/// Carries the bcrypt hash; it never leaves the auth repository.
#[derive(Debug, FromRow)]
pub struct AdminRow {
    pub admin_id: AdminId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
}

impl TryFrom<AdminRow> for Admin {
    type Error = AppError;

    fn try_from(value: AdminRow) -> Result<Self, Self::Error> {
        let role = AdminRole::from_str(&value.role)
            .map_err(|_| AppError::ConversionEntityError(format!("unknown admin role: {}", value.role)))?;
        let AdminRow {
            admin_id,
            username,
            email,
            is_active,
            last_login,
            ..
        } = value;
        Ok(Admin {
            id: admin_id,
            username,
            email,
            role,
            is_active,
            last_login,
        })
    }
}
