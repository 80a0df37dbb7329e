//! Contains all the routes that this application can handle.

mod api;
mod home;

use crate::AppState;
use home::home;

use axum::{
    routing::{get, put},
    Router,
};

/// All the routes of the server
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/subscribe", put(api::subscribe))
        .with_state(app_state)
}
