use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    contact::{
        event::{CreateContact, UpdateContactStatus},
        Contact, ContactReason, ContactStatus, Priority,
    },
    id::{AdminId, ContactId},
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use std::str::FromStr;

use crate::validation::{
    contact_message, contact_name, contact_subject, optional_phone, valid_contact_reason,
    valid_email,
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    #[serde(default)]
    #[garde(custom(contact_name))]
    pub name: String,
    #[serde(default)]
    #[garde(custom(valid_email))]
    pub email: String,
    #[serde(default)]
    #[garde(custom(optional_phone))]
    pub phone: String,
    #[serde(default)]
    #[garde(custom(contact_subject))]
    pub subject: String,
    #[serde(default)]
    #[garde(custom(contact_message))]
    pub message: String,
    #[serde(default = "default_reason")]
    #[garde(custom(valid_contact_reason))]
    pub contact_reason: String,
}

fn default_reason() -> String {
    "general".into()
}

impl TryFrom<CreateContactRequest> for CreateContact {
    type Error = AppError;

    fn try_from(value: CreateContactRequest) -> Result<Self, Self::Error> {
        let reason = ContactReason::from_str(value.contact_reason.trim())
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        let phone = Some(value.phone.trim().to_string()).filter(|s| !s.is_empty());
        Ok(CreateContact::new(
            value.name.trim().to_string(),
            value.email.trim().to_lowercase(),
            phone,
            value.subject.trim().to_string(),
            value.message.trim().to_string(),
            reason,
        ))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactListQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactStatusRequest {
    pub contact_id: ContactId,
    pub status: String,
    pub admin_notes: Option<String>,
}

impl UpdateContactStatusRequest {
    pub fn into_event(self, changed_by: AdminId) -> AppResult<UpdateContactStatus> {
        let status = ContactStatus::from_str(self.status.trim()).map_err(|_| {
            AppError::InvalidTargetStatus(
                "Invalid status. Must be: new, read, responded, or resolved".into(),
            )
        })?;
        Ok(UpdateContactStatus {
            contact_id: self.contact_id,
            status,
            changed_by,
            admin_notes: self.admin_notes.filter(|s| !s.trim().is_empty()),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub contact_id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub contact_reason: ContactReason,
    pub priority: Priority,
    pub status: ContactStatus,
    pub admin_notes: Option<String>,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Contact> for ContactResponse {
    fn from(value: Contact) -> Self {
        let Contact {
            id,
            name,
            email,
            phone,
            subject,
            message,
            reason,
            priority,
            status,
            admin_notes,
            responded_at,
            created_at,
            updated_at,
        } = value;
        Self {
            contact_id: id,
            name,
            email,
            phone,
            subject,
            message,
            contact_reason: reason,
            priority,
            status,
            admin_notes,
            responded_at,
            created_at,
            updated_at,
        }
    }
}

#[derive(Debug, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct ContactsResponse {
    pub items: Vec<ContactResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactResponse {
    pub contact_id: ContactId,
    pub submitted_at: DateTime<Utc>,
}

impl From<Contact> for CreateContactResponse {
    fn from(value: Contact) -> Self {
        Self {
            contact_id: value.id,
            submitted_at: value.created_at,
        }
    }
}

#[derive(Debug, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactStatusResponse {
    pub message: String,
    pub contact: ContactResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_body() -> serde_json::Value {
        serde_json::json!({
            "name": "Priya Shah",
            "email": "priya@example.com",
            "subject": "Private dining",
            "message": "Do you take parties of twelve on weeknights?",
            "contactReason": "events",
        })
    }

    #[test]
    fn reason_defaults_to_general_when_omitted() {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("contactReason");
        let req: CreateContactRequest = serde_json::from_value(body).unwrap();
        assert!(req.validate(&()).is_ok());
        let event = CreateContact::try_from(req).unwrap();
        assert_eq!(event.reason, ContactReason::General);
    }

    #[test]
    fn short_message_is_a_field_error() {
        let mut body = valid_body();
        body["message"] = serde_json::json!("too short");
        let req: CreateContactRequest = serde_json::from_value(body).unwrap();
        assert!(req.validate(&()).is_err());
    }

    #[test]
    fn empty_phone_becomes_none() {
        let req: CreateContactRequest = serde_json::from_value(valid_body()).unwrap();
        let event = CreateContact::try_from(req).unwrap();
        assert_eq!(event.phone, None);
    }

    #[test]
    fn unknown_contact_status_is_rejected() {
        let req = UpdateContactStatusRequest {
            contact_id: ContactId::new(),
            status: "spam".into(),
            admin_notes: None,
        };
        let result = req.into_event(AdminId::new());
        assert!(matches!(result, Err(AppError::InvalidTargetStatus(_))));
    }
}
