use crate::model::id::{AdminId, ReservationId, StatusChangeId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

pub mod event;

/// A dining reservation request. `time` stays a raw `HH:MM` string because
/// the (date, time) pair is the slot key and is matched by exact string
/// equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub id: ReservationId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: String,
    pub guests: i32,
    pub special_requests: Option<String>,
    pub status: ReservationStatus,
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
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Modified,
}

/// One appended entry of the status transition log. Creating a reservation is
/// recorded as a transition with no previous status and no acting admin.
#[derive(Debug, Clone)]
pub struct ReservationStatusChange {
    pub id: StatusChangeId,
    pub reservation_id: ReservationId,
    pub from_status: Option<ReservationStatus>,
    pub to_status: ReservationStatus,
    pub changed_by: Option<AdminId>,
    pub notes: Option<String>,
    pub changed_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct ReservationListOptions {
    pub date: Option<NaiveDate>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct ReservationStats {
    pub total: i64,
    pub pending: i64,
    pub confirmed: i64,
    pub cancelled: i64,
    pub modified: i64,
    pub today: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_parses_lowercase_names() {
        assert_eq!(
            ReservationStatus::from_str("confirmed").unwrap(),
            ReservationStatus::Confirmed
        );
        assert_eq!(ReservationStatus::Cancelled.as_ref(), "cancelled");
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(ReservationStatus::from_str("approved").is_err());
        assert!(ReservationStatus::from_str("Confirmed").is_err());
    }
}
