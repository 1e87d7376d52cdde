use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    admin::{Admin, AdminRole},
    auth::AccessToken,
    id::AdminId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    #[garde(length(min = 1))]
    pub username: String,
    #[serde(default)]
    #[garde(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub admin_id: AdminId,
    pub access_token: String,
}

impl AccessTokenResponse {
    pub fn new(admin_id: AdminId, token: AccessToken) -> Self {
        Self {
            admin_id,
            access_token: token.0,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    pub admin_id: AdminId,
    pub username: String,
    pub email: String,
    pub role: AdminRole,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<Admin> for AdminResponse {
    fn from(value: Admin) -> Self {
        Self {
            admin_id: value.id,
            username: value.username,
            email: value.email,
            role: value.role,
            last_login: value.last_login,
        }
    }
}
