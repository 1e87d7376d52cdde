use crate::model::id::ContactId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub reason: ContactReason,
    pub status: ContactStatus,
    pub priority: Priority,
    pub admin_notes: Option<String>,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContactReason {
    General,
    Reservation,
    Events,
    Catering,
    Feedback,
    Complaint,
    Employment,
    Other,
}

impl ContactReason {
    /// Triage priority assigned when a message arrives.
    pub fn priority(self) -> Priority {
        match self {
            Self::Complaint => Priority::High,
            Self::Reservation | Self::Events | Self::Catering | Self::Employment => {
                Priority::Medium
            }
            Self::General | Self::Feedback | Self::Other => Priority::Low,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContactStatus {
    New,
    Read,
    Responded,
    Resolved,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Default)]
pub struct ContactListOptions {
    pub status: Option<ContactStatus>,
}

#[derive(Debug, Clone, Copy)]
pub struct ContactStats {
    pub total: i64,
    pub new: i64,
    pub read: i64,
    pub responded: i64,
    pub resolved: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_is_derived_from_reason() {
        assert_eq!(ContactReason::Complaint.priority(), Priority::High);
        assert_eq!(ContactReason::Reservation.priority(), Priority::Medium);
        assert_eq!(ContactReason::Events.priority(), Priority::Medium);
        assert_eq!(ContactReason::Catering.priority(), Priority::Medium);
        assert_eq!(ContactReason::Employment.priority(), Priority::Medium);
        assert_eq!(ContactReason::General.priority(), Priority::Low);
        assert_eq!(ContactReason::Feedback.priority(), Priority::Low);
        assert_eq!(ContactReason::Other.priority(), Priority::Low);
    }

    #[test]
    fn reason_parses_lowercase_names() {
        use std::str::FromStr;
        assert_eq!(
            ContactReason::from_str("catering").unwrap(),
            ContactReason::Catering
        );
        assert!(ContactReason::from_str("spam").is_err());
    }
}
