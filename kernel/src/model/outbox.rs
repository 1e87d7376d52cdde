use crate::model::id::OutboxEmailId;
use crate::model::notification::EmailMessage;
use chrono::{DateTime, Duration, Utc};
use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// A queued outbound email. Requests only ever enqueue; a background worker
/// owns delivery, so a broken mail provider can never fail or block an HTTP
/// request.
#[derive(Debug, Clone)]
pub struct OutboxEmail {
    pub id: OutboxEmailId,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub status: OutboxStatus,
    pub attempts: i32,
    pub last_error: Option<String>,
    pub next_attempt_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OutboxStatus {
    Queued,
    Sent,
    Failed,
}

#[derive(Debug, new)]
pub struct EnqueueEmail {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl From<EmailMessage> for EnqueueEmail {
    fn from(value: EmailMessage) -> Self {
        let EmailMessage { to, subject, body } = value;
        Self {
            recipient: to,
            subject,
            body,
        }
    }
}

/// Exponential backoff between delivery attempts: 2^n minutes, capped at
/// roughly an hour so a flaky provider is retried within a useful window.
pub fn retry_delay(attempts: i32) -> Duration {
    let exp = attempts.clamp(0, 6) as u32;
    Duration::minutes(2_i64.pow(exp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_and_caps() {
        assert_eq!(retry_delay(1), Duration::minutes(2));
        assert_eq!(retry_delay(2), Duration::minutes(4));
        assert_eq!(retry_delay(5), Duration::minutes(32));
        assert_eq!(retry_delay(6), Duration::minutes(64));
        assert_eq!(retry_delay(50), Duration::minutes(64));
    }
}
