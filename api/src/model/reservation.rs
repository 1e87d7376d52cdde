use chrono::{DateTime, NaiveDate, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::{AdminId, ReservationId},
    reservation::{
        event::{CreateReservation, UpdateReservationStatus},
        Reservation, ReservationListOptions, ReservationStatus, ReservationStatusChange,
    },
};
use serde::{Deserialize, Deserializer, Serialize};
use shared::error::{AppError, AppResult};
use std::str::FromStr;

use crate::validation::{
    first_name_required, future_date, last_name_required, valid_email, valid_phone, valid_time,
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[serde(default)]
    #[garde(custom(first_name_required))]
    pub first_name: String,
    #[serde(default)]
    #[garde(custom(last_name_required))]
    pub last_name: String,
    #[serde(default)]
    #[garde(custom(valid_email))]
    pub email: String,
    #[serde(default)]
    #[garde(custom(valid_phone))]
    pub phone: String,
    #[serde(default)]
    #[garde(custom(future_date))]
    pub date: String,
    #[serde(default)]
    #[garde(custom(valid_time))]
    pub time: String,
    #[serde(default, deserialize_with = "lenient_guests")]
    #[garde(range(min = 1, max = 20))]
    pub guests: i32,
    #[garde(inner(length(max = 500)))]
    pub special_requests: Option<String>,
    #[garde(skip)]
    pub occasion: Option<String>,
}

/// The public form submits `guests` as either a JSON number or a numeric
/// string depending on the client. Anything unparseable collapses to zero
/// so the range rule reports it as a normal field error.
fn lenient_guests<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Int(n) => i32::try_from(n).unwrap_or(0),
        Raw::Float(f) => f as i32,
        Raw::Text(s) => s.trim().parse().unwrap_or(0),
    })
}

impl TryFrom<CreateReservationRequest> for CreateReservation {
    type Error = AppError;

    fn try_from(value: CreateReservationRequest) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(value.date.trim(), "%Y-%m-%d")
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        let name = format!("{} {}", value.first_name.trim(), value.last_name.trim())
            .trim()
            .to_string();
        let special_requests = value
            .special_requests
            .filter(|s| !s.trim().is_empty())
            .or(value.occasion.filter(|s| !s.trim().is_empty()));
        Ok(CreateReservation::new(
            name,
            value.email.trim().to_lowercase(),
            value.phone.trim().to_string(),
            date,
            value.time.trim().to_string(),
            value.guests,
            special_requests,
        ))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationListQuery {
    pub date: Option<NaiveDate>,
    pub email: Option<String>,
}

impl From<ReservationListQuery> for ReservationListOptions {
    fn from(value: ReservationListQuery) -> Self {
        Self {
            date: value.date,
            email: value.email,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationStatusRequest {
    pub reservation_id: ReservationId,
    pub status: String,
    pub admin_notes: Option<String>,
}

impl UpdateReservationStatusRequest {
    pub fn into_event(self, changed_by: AdminId) -> AppResult<UpdateReservationStatus> {
        let status = ReservationStatus::from_str(self.status.trim()).map_err(|_| {
            AppError::InvalidTargetStatus(
                "Invalid status. Must be: pending, confirmed, cancelled, or modified".into(),
            )
        })?;
        Ok(UpdateReservationStatus {
            reservation_id: self.reservation_id,
            status,
            changed_by,
            admin_notes: self.admin_notes.filter(|s| !s.trim().is_empty()),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub reservation_id: ReservationId,
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

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        let Reservation {
            id,
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
        } = value;
        Self {
            reservation_id: id,
            name,
            email,
            phone: mask_phone(&phone),
            date,
            time,
            guests,
            special_requests,
            status,
            admin_notes,
            responded_at,
            created_at,
            updated_at,
        }
    }
}

/// Keeps the first three and last four digits, masking the rest.
/// Separators are preserved so the overall shape stays recognizable.
fn mask_phone(phone: &str) -> String {
    let total = phone.chars().filter(char::is_ascii_digit).count();
    if total < 8 {
        return phone.to_string();
    }
    let mut seen = 0;
    phone
        .chars()
        .map(|c| {
            if c.is_ascii_digit() {
                seen += 1;
                if seen > 3 && seen <= total - 4 {
                    return '*';
                }
            }
            c
        })
        .collect()
}

#[derive(Debug, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct ReservationsResponse {
    pub items: Vec<ReservationResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationResponse {
    pub reservation_id: ReservationId,
    pub confirmation_number: String,
    pub status: ReservationStatus,
    pub date: NaiveDate,
    pub time: String,
}

impl From<Reservation> for CreateReservationResponse {
    fn from(value: Reservation) -> Self {
        Self {
            reservation_id: value.id,
            confirmation_number: value.id.to_string(),
            status: value.status,
            date: value.date,
            time: value.time,
        }
    }
}

#[derive(Debug, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationStatusResponse {
    pub message: String,
    pub reservation: ReservationResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeResponse {
    pub from_status: Option<ReservationStatus>,
    pub to_status: ReservationStatus,
    pub changed_by: Option<AdminId>,
    pub notes: Option<String>,
    pub changed_at: DateTime<Utc>,
}

impl From<ReservationStatusChange> for StatusChangeResponse {
    fn from(value: ReservationStatusChange) -> Self {
        Self {
            from_status: value.from_status,
            to_status: value.to_status,
            changed_by: value.changed_by,
            notes: value.notes,
            changed_at: value.changed_at,
        }
    }
}

#[derive(Debug, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct ReservationHistoryResponse {
    pub items: Vec<StatusChangeResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn base_request(guests: serde_json::Value) -> serde_json::Value {
        let date = Local::now().date_naive().format("%Y-%m-%d").to_string();
        serde_json::json!({
            "firstName": "Dana",
            "lastName": "Okafor",
            "email": "Dana@Example.com",
            "phone": "555-000-1111",
            "date": date,
            "time": "19:00",
            "guests": guests,
        })
    }

    #[test]
    fn guests_accepts_numeric_string() {
        let req: CreateReservationRequest =
            serde_json::from_value(base_request(serde_json::json!("4"))).unwrap();
        assert_eq!(req.guests, 4);
        assert!(req.validate(&()).is_ok());
    }

    #[test]
    fn guests_out_of_range_fails_validation() {
        let req: CreateReservationRequest =
            serde_json::from_value(base_request(serde_json::json!(25))).unwrap();
        let report = req.validate(&()).unwrap_err();
        assert!(report
            .iter()
            .any(|(path, _)| path.to_string().contains("guests")));
    }

    #[test]
    fn non_numeric_guests_becomes_field_error() {
        let req: CreateReservationRequest =
            serde_json::from_value(base_request(serde_json::json!("a few"))).unwrap();
        assert_eq!(req.guests, 0);
        assert!(req.validate(&()).is_err());
    }

    #[test]
    fn overlong_name_fails_validation() {
        let mut value = base_request(serde_json::json!(2));
        value["firstName"] = serde_json::json!("x".repeat(240));
        let req: CreateReservationRequest = serde_json::from_value(value).unwrap();
        let report = req.validate(&()).unwrap_err();
        assert!(report
            .iter()
            .any(|(path, _)| path.to_string().contains("first_name")));
    }

    #[test]
    fn conversion_normalizes_name_and_email() {
        let req: CreateReservationRequest =
            serde_json::from_value(base_request(serde_json::json!(2))).unwrap();
        let event = CreateReservation::try_from(req).unwrap();
        assert_eq!(event.name, "Dana Okafor");
        assert_eq!(event.email, "dana@example.com");
    }

    #[test]
    fn occasion_fills_in_for_missing_special_requests() {
        let mut value = base_request(serde_json::json!(2));
        value["occasion"] = serde_json::json!("anniversary");
        let req: CreateReservationRequest = serde_json::from_value(value).unwrap();
        let event = CreateReservation::try_from(req).unwrap();
        assert_eq!(event.special_requests.as_deref(), Some("anniversary"));
    }

    #[test]
    fn phone_is_masked_in_responses() {
        assert_eq!(mask_phone("555-000-1111"), "555-***-1111");
        assert_eq!(mask_phone("+1 (555) 000-1111"), "+1 (55*) ***-1111");
        assert_eq!(mask_phone("12345"), "12345");
    }

    #[test]
    fn unknown_target_status_is_rejected() {
        let req = UpdateReservationStatusRequest {
            reservation_id: ReservationId::new(),
            status: "archived".into(),
            admin_notes: None,
        };
        let result = req.into_event(AdminId::new());
        assert!(matches!(result, Err(AppError::InvalidTargetStatus(_))));
    }
}
