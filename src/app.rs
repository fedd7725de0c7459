use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/login", get(handlers::login_page).post(handlers::login))
        .route("/register", get(handlers::register_page).post(handlers::register))
        .route("/logout", post(handlers::logout))
        .route("/attendance/checkin", post(handlers::check_in))
        .route("/attendance/checkout", post(handlers::check_out))
        .route("/calendar/prev", post(handlers::calendar_prev))
        .route("/calendar/next", post(handlers::calendar_next))
        .route("/api/records", get(handlers::records))
        .route("/api/today", get(handlers::today))
        .route("/api/offday", get(handlers::off_day))
        .route("/api/clock", get(handlers::clock))
        .route("/api/calendar", get(handlers::calendar_grid))
        .with_state(state)
}
