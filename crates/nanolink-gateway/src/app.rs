use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{
    analytics_handler, delete_handler, health_handler, redirect_handler, shorten_handler,
    update_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    /// Builds the gateway router.
    ///
    /// Literal routes take precedence over the catch-all redirect route,
    /// so `/shorten`, `/analytics/...` and friends are never shadowed.
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/shorten", post(shorten_handler))
            .route("/analytics/{alias}", get(analytics_handler))
            .route("/update/{alias}", put(update_handler))
            .route("/delete/{alias}", delete(delete_handler))
            .route("/{alias}", get(redirect_handler))
            .with_state(state)
    }
}
