use crate::model::id::ReservationId;
use crate::model::reservation::{
    event::{CreateReservation, UpdateReservationStatus},
    Reservation, ReservationListOptions, ReservationStats, ReservationStatusChange,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Checks slot capacity and inserts atomically; a full slot yields
    /// `AppError::SlotCapacityError` and writes nothing.
    async fn create(&self, event: CreateReservation) -> AppResult<Reservation>;
    async fn find_all(&self, options: ReservationListOptions) -> AppResult<Vec<Reservation>>;
    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>>;
    /// Applies an admin transition and appends it to the status change log.
    async fn update_status(&self, event: UpdateReservationStatus) -> AppResult<Reservation>;
    async fn find_history(
        &self,
        reservation_id: ReservationId,
    ) -> AppResult<Vec<ReservationStatusChange>>;
    async fn stats(&self) -> AppResult<ReservationStats>;
}
