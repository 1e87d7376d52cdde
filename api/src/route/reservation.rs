use axum::{
    routing::{get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::reservation::{
    register_reservation, show_reservation_history, show_reservation_list,
    update_reservation_status,
};

pub fn build_reservation_routers() -> Router<AppRegistry> {
    let reservation_routers = Router::new()
        .route("/", post(register_reservation))
        .route("/", get(show_reservation_list))
        .route("/", put(update_reservation_status))
        .route("/:reservation_id/history", get(show_reservation_history));

    Router::new().nest("/reservations", reservation_routers)
}
