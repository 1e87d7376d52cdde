use crate::model::id::{AdminId, ReservationId};
use crate::model::reservation::ReservationStatus;
use chrono::NaiveDate;
use derive_new::new;

/// Normalized creation payload: `name` is the concatenated first/last name,
/// `email` is already lowercased and `time` a validated `HH:MM` string.
#[derive(Debug, new)]
pub struct CreateReservation {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: String,
    pub guests: i32,
    pub special_requests: Option<String>,
}

#[derive(Debug, new)]
pub struct UpdateReservationStatus {
    pub reservation_id: ReservationId,
    pub status: ReservationStatus,
    pub changed_by: AdminId,
    pub admin_notes: Option<String>,
}
