use chrono::{DateTime, Utc};
use kernel::model::id::OutboxEmailId;
use kernel::model::outbox::{OutboxEmail, OutboxStatus};
use shared::error::AppError;
use sqlx::FromRow;
use std::str::FromStr;

#[derive(Debug, FromRow)]
pub struct OutboxEmailRow {
    pub outbox_id: OutboxEmailId,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub status: String,
    pub attempts: i32,
    pub last_error: Option<String>,
    pub next_attempt_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
}

impl TryFrom<OutboxEmailRow> for OutboxEmail {
    type Error = AppError;

    fn try_from(value: OutboxEmailRow) -> Result<Self, Self::Error> {
        let status = OutboxStatus::from_str(&value.status)
            .map_err(|_| AppError::ConversionEntityError(format!("unknown outbox status: {}", value.status)))?;
        let OutboxEmailRow {
            outbox_id,
            recipient,
            subject,
            body,
            attempts,
            last_error,
            next_attempt_at,
            created_at,
            sent_at,
            ..
        } = value;
        Ok(OutboxEmail {
            id: outbox_id,
            recipient,
            subject,
            body,
            status,
            attempts,
            last_error,
            next_attempt_at,
            created_at,
            sent_at,
        })
    }
}
