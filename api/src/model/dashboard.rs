use kernel::model::{contact::ContactStats, reservation::ReservationStats};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub reservations: ReservationStatsResponse,
    pub contacts: ContactStatsResponse,
}

impl DashboardResponse {
    pub fn new(reservations: ReservationStats, contacts: ContactStats) -> Self {
        Self {
            reservations: reservations.into(),
            contacts: contacts.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationStatsResponse {
    pub total: i64,
    pub pending: i64,
    pub confirmed: i64,
    pub cancelled: i64,
    pub modified: i64,
    pub today: i64,
}

impl From<ReservationStats> for ReservationStatsResponse {
    fn from(value: ReservationStats) -> Self {
        Self {
            total: value.total,
            pending: value.pending,
            confirmed: value.confirmed,
            cancelled: value.cancelled,
            modified: value.modified,
            today: value.today,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactStatsResponse {
    pub total: i64,
    pub new: i64,
    pub read: i64,
    pub responded: i64,
    pub resolved: i64,
}

impl From<ContactStats> for ContactStatsResponse {
    fn from(value: ContactStats) -> Self {
        Self {
            total: value.total,
            new: value.new,
            read: value.read,
            responded: value.responded,
            resolved: value.resolved,
        }
    }
}
