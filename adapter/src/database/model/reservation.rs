use chrono::{DateTime, NaiveDate, Utc};
use kernel::model::id::{AdminId, ReservationId, StatusChangeId};
use kernel::model::reservation::{Reservation, ReservationStatus, ReservationStatusChange};
use shared::error::AppError;
use sqlx::FromRow;
use std::str::FromStr;

/// Status columns are plain TEXT; parsing happens at the row boundary so a
/// corrupted value surfaces as a conversion error instead of a panic.
#[derive(Debug, FromRow)]
pub struct ReservationRow {
    pub reservation_id: ReservationId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: String,
    pub guests: i32,
    pub special_requests: Option<String>,
    pub status: String,
    pub admin_notes: Option<String>,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(value: ReservationRow) -> Result<Self, Self::Error> {
        let status = parse_status(&value.status)?;
        let ReservationRow {
            reservation_id,
            name,
            email,
            phone,
            date,
            time,
            guests,
            special_requests,
            admin_notes,
            responded_at,
            created_at,
            updated_at,
            ..
        } = value;
        Ok(Reservation {
            id: reservation_id,
            name,
            email,
            phone,
            date,
            time,
            guests,
            special_requests,
            status,
            admin_notes,
            responded_at,
            created_at,
            updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct StatusChangeRow {
    pub change_id: StatusChangeId,
    pub reservation_id: ReservationId,
    pub from_status: Option<String>,
    pub to_status: String,
    pub changed_by: Option<AdminId>,
    pub notes: Option<String>,
    pub changed_at: DateTime<Utc>,
}

impl TryFrom<StatusChangeRow> for ReservationStatusChange {
    type Error = AppError;

    fn try_from(value: StatusChangeRow) -> Result<Self, Self::Error> {
        let from_status = value.from_status.as_deref().map(parse_status).transpose()?;
        let to_status = parse_status(&value.to_status)?;
        let StatusChangeRow {
            change_id,
            reservation_id,
            changed_by,
            notes,
            changed_at,
            ..
        } = value;
        Ok(ReservationStatusChange {
            id: change_id,
            reservation_id,
            from_status,
            to_status,
            changed_by,
            notes,
            changed_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct ReservationStatsRow {
    pub total: i64,
    pub pending: i64,
    pub confirmed: i64,
    pub cancelled: i64,
    pub modified: i64,
    pub today: i64,
}

pub(crate) fn parse_status(value: &str) -> Result<ReservationStatus, AppError> {
    ReservationStatus::from_str(value)
        .map_err(|_| AppError::ConversionEntityError(format!("unknown reservation status: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str) -> ReservationRow {
        ReservationRow {
            reservation_id: ReservationId::new(),
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "555-000-1111".into(),
            date: NaiveDate::from_ymd_opt(2030, 6, 1).unwrap(),
            time: "19:00".into(),
            guests: 2,
            special_requests: None,
            status: status.into(),
            admin_notes: None,
            responded_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn row_converts_with_known_status() {
        let reservation = Reservation::try_from(row("pending")).unwrap();
        assert_eq!(reservation.status, ReservationStatus::Pending);
    }

    #[test]
    fn row_with_unknown_status_fails_conversion() {
        assert!(Reservation::try_from(row("archived")).is_err());
    }
}
