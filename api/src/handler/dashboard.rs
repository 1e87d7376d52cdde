use axum::{extract::State, Json};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::extractor::AuthorizedAdmin;
use crate::model::dashboard::DashboardResponse;

/// Aggregate counters for the admin landing page.
pub async fn show_dashboard(
    _admin: AuthorizedAdmin,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<DashboardResponse>> {
    let reservations = registry.reservation_repository().stats().await?;
    let contacts = registry.contact_repository().stats().await?;
    Ok(Json(DashboardResponse::new(reservations, contacts)))
}
