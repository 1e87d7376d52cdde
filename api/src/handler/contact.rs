use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{
    contact::{event::CreateContact, ContactListOptions, ContactStatus},
    notification::Notification,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};
use std::str::FromStr;

use crate::extractor::AuthorizedAdmin;
use crate::handler::reservation::enqueue_notification;
use crate::model::contact::{
    ContactListQuery, ContactsResponse, CreateContactRequest, CreateContactResponse,
    UpdateContactStatusRequest, UpdateContactStatusResponse,
};

pub async fn register_contact(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateContactRequest>,
) -> AppResult<(StatusCode, Json<CreateContactResponse>)> {
    req.validate(&())?;
    let event = CreateContact::try_from(req)?;
    let contact = registry.contact_repository().create(event).await?;

    enqueue_notification(&registry, Notification::ContactAlert(contact.clone())).await;
    enqueue_notification(
        &registry,
        Notification::ContactAcknowledgement(contact.clone()),
    )
    .await;

    Ok((StatusCode::CREATED, Json(contact.into())))
}

pub async fn show_contact_list(
    _admin: AuthorizedAdmin,
    State(registry): State<AppRegistry>,
    Query(query): Query<ContactListQuery>,
) -> AppResult<Json<ContactsResponse>> {
    let status = query
        .status
        .map(|s| {
            ContactStatus::from_str(s.trim()).map_err(|_| {
                AppError::InvalidTargetStatus(
                    "Invalid status. Must be: new, read, responded, or resolved".into(),
                )
            })
        })
        .transpose()?;
    let contacts = registry
        .contact_repository()
        .find_all(ContactListOptions { status })
        .await?;
    Ok(Json(ContactsResponse::new(
        contacts.into_iter().map(Into::into).collect(),
    )))
}

pub async fn update_contact_status(
    admin: AuthorizedAdmin,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateContactStatusRequest>,
) -> AppResult<Json<UpdateContactStatusResponse>> {
    let event = req.into_event(admin.id())?;
    let contact = registry.contact_repository().update_status(event).await?;

    let message = match contact.status {
        ContactStatus::New => "Contact moved back to new",
        ContactStatus::Read => "Contact marked as read",
        ContactStatus::Responded => "Response recorded",
        ContactStatus::Resolved => "Contact resolved",
    };
    Ok(Json(UpdateContactStatusResponse::new(
        message.into(),
        contact.into(),
    )))
}
