use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/sw.js", get(handlers::service_worker))
        .route("/config", post(handlers::save_config_form))
        .route("/send/start", post(handlers::send_start_form))
        .route("/send/end", post(handlers::send_end_form))
        .route("/send/delay", post(handlers::send_delay_form))
        .route(
            "/api/config",
            get(handlers::get_config).post(handlers::save_config),
        )
        .route("/api/log", get(handlers::get_log))
        .route("/api/send", post(handlers::send))
        .with_state(state)
}
