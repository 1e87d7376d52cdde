use chrono::{DateTime, Utc};
use kernel::model::contact::{Contact, ContactReason, ContactStatus, Priority};
use kernel::model::id::ContactId;
use shared::error::AppError;
use sqlx::FromRow;
use std::str::FromStr;

#[derive(Debug, FromRow)]
pub struct ContactRow {
    pub contact_id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub reason: String,
    pub status: String,
    pub priority: String,
    pub admin_notes: Option<String>,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ContactRow> for Contact {
    type Error = AppError;

    fn try_from(value: ContactRow) -> Result<Self, Self::Error> {
        let reason = ContactReason::from_str(&value.reason)
            .map_err(|_| conversion_error("contact reason", &value.reason))?;
        let status = ContactStatus::from_str(&value.status)
            .map_err(|_| conversion_error("contact status", &value.status))?;
        let priority = Priority::from_str(&value.priority)
            .map_err(|_| conversion_error("contact priority", &value.priority))?;
        let ContactRow {
            contact_id,
            name,
            email,
            phone,
            subject,
            message,
            admin_notes,
            responded_at,
            created_at,
            updated_at,
            ..
        } = value;
        Ok(Contact {
            id: contact_id,
            name,
            email,
            phone,
            subject,
            message,
            reason,
            status,
            priority,
            admin_notes,
            responded_at,
            created_at,
            updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct ContactStatsRow {
    pub total: i64,
    pub new: i64,
    pub read: i64,
    pub responded: i64,
    pub resolved: i64,
}

fn conversion_error(what: &str, value: &str) -> AppError {
    AppError::ConversionEntityError(format!("unknown {what}: {value}"))
}
