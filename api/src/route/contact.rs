use axum::{
    routing::{get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::contact::{register_contact, show_contact_list, update_contact_status};

pub fn build_contact_routers() -> Router<AppRegistry> {
    let contact_routers = Router::new()
        .route("/", post(register_contact))
        .route("/", get(show_contact_list))
        .route("/", put(update_contact_status));

    Router::new().nest("/contact", contact_routers)
}
