use crate::model::contact::{ContactReason, ContactStatus};
use crate::model::id::{AdminId, ContactId};
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateContact {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub reason: ContactReason,
}

#[derive(Debug, new)]
pub struct UpdateContactStatus {
    pub contact_id: ContactId,
    pub status: ContactStatus,
    pub changed_by: AdminId,
    pub admin_notes: Option<String>,
}
