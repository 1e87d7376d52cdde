use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::auth::{login, logout, show_current_admin};

pub fn build_auth_routers() -> Router<AppRegistry> {
    let auth_routers = Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(show_current_admin));

    Router::new().nest("/auth", auth_routers)
}
