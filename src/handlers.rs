use crate::api::ApiError;
use crate::calendar::{self, MonthGrid};
use crate::clock::ClockState;
use crate::errors::AppError;
use crate::models::{
    ActionResponse, LoginForm, OffDayView, RecordsView, RegisterForm, RegisterRequest, Session,
    TodayView,
};
use crate::state::AppState;
use crate::storage::persist_session;
use crate::ui;
use crate::view;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::Local;
use serde::Deserialize;
use tracing::{info, warn};

pub const CHECK_IN_SUCCESS: &str = "Check-in successful!";
pub const CHECK_OUT_SUCCESS: &str = "Check-out successful!";
const SESSION_REQUIRED: &str = "Session expired. Please login again.";

#[derive(Debug, Deserialize)]
pub struct RecordsQuery {
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "all".to_string()
}

/// Clones the current session or rejects with 401; nothing is sent upstream
/// without one. The page script redirects to /login on 401.
async fn require_session(state: &AppState) -> Result<Session, AppError> {
    state
        .session
        .lock()
        .await
        .session
        .clone()
        .ok_or_else(|| AppError {
            status: StatusCode::UNAUTHORIZED,
            message: SESSION_REQUIRED.to_string(),
        })
}

pub async fn index(State(state): State<AppState>) -> Response {
    let Some(session) = state.session.lock().await.session.clone() else {
        return Redirect::to("/login").into_response();
    };

    let cursor = *state.month_cursor.lock().await;
    let grid = calendar::month_grid(cursor, Local::now().date_naive());
    Html(ui::render_dashboard(&session.user, &grid)).into_response()
}

pub async fn login_page(State(state): State<AppState>) -> Html<String> {
    let remembered = state.session.lock().await.remembered_email.clone();
    Html(ui::render_login("", remembered.as_deref().unwrap_or_default()))
}

pub async fn register_page() -> Html<String> {
    Html(ui::render_register(""))
}

pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match state.api.login(&form.email, &form.password).await {
        Ok(session) => {
            info!("login succeeded for {}", session.user.email);
            let snapshot = {
                let mut stored = state.session.lock().await;
                stored.session = Some(session);
                stored.remembered_email = if form.remember_me.is_some() {
                    Some(form.email.clone())
                } else {
                    None
                };
                stored.clone()
            };
            persist_session(&state.session_path, &snapshot).await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(err) => Ok(Html(ui::render_login(err.message(), &form.email)).into_response()),
    }
}

pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let request = RegisterRequest {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        position: form.position.trim().to_string(),
        company_code: form.company_code.trim().to_string(),
        password: form.password,
    };

    match state.api.register(&request).await {
        Ok(()) => Ok(Redirect::to("/login").into_response()),
        Err(err) => Ok(Html(ui::render_register(err.message())).into_response()),
    }
}

pub async fn logout(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let token = state
        .session
        .lock()
        .await
        .session
        .as_ref()
        .map(|session| session.token.clone());

    // Best effort: a failed upstream logout still clears the local session.
    if let Some(token) = token {
        if let Err(err) = state.api.logout(&token).await {
            warn!("logout request failed: {}", err.message());
        }
    }

    let snapshot = {
        let mut stored = state.session.lock().await;
        stored.session = None;
        stored.clone()
    };
    persist_session(&state.session_path, &snapshot).await?;
    Ok(Redirect::to("/login"))
}

pub async fn check_in(State(state): State<AppState>) -> Result<Json<ActionResponse>, AppError> {
    let session = require_session(&state).await?;
    let result = state
        .api
        .check_in(&session.token, &session.user.email)
        .await;
    Ok(Json(action_response(result, CHECK_IN_SUCCESS)))
}

pub async fn check_out(State(state): State<AppState>) -> Result<Json<ActionResponse>, AppError> {
    let session = require_session(&state).await?;
    let result = state
        .api
        .check_out(&session.token, &session.user.email)
        .await;
    Ok(Json(action_response(result, CHECK_OUT_SUCCESS)))
}

fn action_response(result: Result<(), ApiError>, success: &str) -> ActionResponse {
    match result {
        Ok(()) => ActionResponse {
            ok: true,
            message: success.to_string(),
        },
        Err(err) => ActionResponse {
            ok: false,
            message: err.message().to_string(),
        },
    }
}

pub async fn records(
    State(state): State<AppState>,
    Query(query): Query<RecordsQuery>,
) -> Result<Json<RecordsView>, AppError> {
    let session = require_session(&state).await?;
    let response = state
        .api
        .records(&session.token, &session.user.email, &query.filter)
        .await?;
    Ok(Json(view::records_view(&response.records)))
}

pub async fn today(State(state): State<AppState>) -> Result<Json<TodayView>, AppError> {
    let session = require_session(&state).await?;
    let response = state
        .api
        .records(&session.token, &session.user.email, "today")
        .await?;
    Ok(Json(view::today_view(&response.records)))
}

pub async fn off_day(State(state): State<AppState>) -> Result<Json<OffDayView>, AppError> {
    let session = require_session(&state).await?;
    let response = state
        .api
        .check_day(&session.token, &session.user.email)
        .await?;

    let is_off_day = response.is_off_day.unwrap_or(false);
    let message = is_off_day.then(|| {
        format!(
            "Today is an off day ({}). Attendance actions are disabled.",
            response.day_name.clone().unwrap_or_default()
        )
    });

    Ok(Json(OffDayView {
        is_off_day,
        day_name: response.day_name,
        message,
    }))
}

pub async fn clock(State(state): State<AppState>) -> Json<ClockState> {
    Json(state.clock.lock().await.clone())
}

pub async fn calendar_grid(State(state): State<AppState>) -> Json<MonthGrid> {
    let cursor = *state.month_cursor.lock().await;
    Json(calendar::month_grid(cursor, Local::now().date_naive()))
}

pub async fn calendar_prev(State(state): State<AppState>) -> Redirect {
    shift_month(&state, -1).await;
    Redirect::to("/")
}

pub async fn calendar_next(State(state): State<AppState>) -> Redirect {
    shift_month(&state, 1).await;
    Redirect::to("/")
}

async fn shift_month(state: &AppState, delta: i32) {
    let mut cursor = state.month_cursor.lock().await;
    *cursor = cursor.shift(delta);
}
