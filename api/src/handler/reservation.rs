use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{
    id::ReservationId,
    notification::Notification,
    reservation::{event::CreateReservation, ReservationStatus},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::extractor::AuthorizedAdmin;
use crate::model::reservation::{
    CreateReservationRequest, CreateReservationResponse, ReservationHistoryResponse,
    ReservationListQuery, ReservationsResponse, UpdateReservationStatusRequest,
    UpdateReservationStatusResponse,
};

/// Email delivery must never fail the request; a full outbox table or a
/// dropped connection is logged and the customer still gets their response.
pub(crate) async fn enqueue_notification(registry: &AppRegistry, notification: Notification) {
    let message = notification.render(registry.restaurant());
    if let Err(cause) = registry.outbox_repository().enqueue(message.into()).await {
        tracing::warn!(%cause, "failed to enqueue notification email");
    }
}

pub async fn register_reservation(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<CreateReservationResponse>)> {
    req.validate(&())?;
    let event = CreateReservation::try_from(req)?;
    let reservation = registry.reservation_repository().create(event).await?;

    enqueue_notification(&registry, Notification::ReservationAlert(reservation.clone())).await;

    Ok((StatusCode::CREATED, Json(reservation.into())))
}

pub async fn show_reservation_list(
    _admin: AuthorizedAdmin,
    State(registry): State<AppRegistry>,
    Query(query): Query<ReservationListQuery>,
) -> AppResult<Json<ReservationsResponse>> {
    let reservations = registry
        .reservation_repository()
        .find_all(query.into())
        .await?;
    Ok(Json(ReservationsResponse::new(
        reservations.into_iter().map(Into::into).collect(),
    )))
}

pub async fn update_reservation_status(
    admin: AuthorizedAdmin,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateReservationStatusRequest>,
) -> AppResult<Json<UpdateReservationStatusResponse>> {
    let event = req.into_event(admin.id())?;
    let notes = event.admin_notes.clone();
    let reservation = registry.reservation_repository().update_status(event).await?;

    if let Some(notification) =
        Notification::for_reservation_transition(&reservation, notes.as_deref())
    {
        enqueue_notification(&registry, notification).await;
    }

    let message = match reservation.status {
        ReservationStatus::Pending => "Reservation moved back to pending",
        ReservationStatus::Confirmed => "Reservation confirmed successfully",
        ReservationStatus::Cancelled => "Reservation cancelled",
        ReservationStatus::Modified => "Reservation updated",
    };
    Ok(Json(UpdateReservationStatusResponse::new(
        message.into(),
        reservation.into(),
    )))
}

pub async fn show_reservation_history(
    _admin: AuthorizedAdmin,
    State(registry): State<AppRegistry>,
    Path(reservation_id): Path<ReservationId>,
) -> AppResult<Json<ReservationHistoryResponse>> {
    registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Reservation not found".into()))?;
    let history = registry
        .reservation_repository()
        .find_history(reservation_id)
        .await?;
    Ok(Json(ReservationHistoryResponse::new(
        history.into_iter().map(Into::into).collect(),
    )))
}
