use crate::models::{LoginResponse, RecordsResponse, RegisterRequest, Session};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";
pub const REGISTER_FALLBACK: &str = "Registration failed. Please try again.";
pub const LOGIN_FALLBACK: &str = "Login failed. Please check your credentials.";
pub const CHECK_IN_FALLBACK: &str = "Check-in failed.";
pub const CHECK_OUT_FALLBACK: &str = "Check-out failed.";
pub const RECORDS_FALLBACK: &str = "Unable to load attendance records.";

/// Error shape of the backend: non-2xx responses carry a human-readable
/// `detail` which is surfaced verbatim.
#[derive(Debug, Deserialize)]
struct DetailResponse {
    #[serde(default)]
    detail: Option<String>,
}

#[derive(Debug)]
pub enum ApiError {
    Upstream { status: StatusCode, message: String },
    Network,
}

impl ApiError {
    pub fn message(&self) -> &str {
        match self {
            Self::Upstream { message, .. } => message,
            Self::Network => NETWORK_ERROR_MESSAGE,
        }
    }
}

/// Client for the HR attendance backend. Privileged calls attach the session
/// token as a bearer credential; transport failures never escape as crashes,
/// they all collapse into [`ApiError::Network`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent("attendance_app/0.1.0")
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url("/api/auth/register"))
            .json(request)
            .send()
            .await
            .map_err(network)?;
        expect_ok(response, REGISTER_FALLBACK).await?;
        Ok(())
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(network)?;
        let body: LoginResponse = expect_ok(response, LOGIN_FALLBACK)
            .await?
            .json()
            .await
            .map_err(network)?;

        Ok(Session {
            token: body.token.unwrap_or_else(|| "demo_token".to_string()),
            user: body.user.unwrap_or_default(),
        })
    }

    pub async fn logout(&self, token: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url("/api/auth/logout"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(network)?;
        expect_ok(response, "Logout failed.").await?;
        Ok(())
    }

    pub async fn check_in(&self, token: &str, email: &str) -> Result<(), ApiError> {
        self.attendance_action("/api/attendance/checkin", token, email, CHECK_IN_FALLBACK)
            .await
    }

    pub async fn check_out(&self, token: &str, email: &str) -> Result<(), ApiError> {
        self.attendance_action("/api/attendance/checkout", token, email, CHECK_OUT_FALLBACK)
            .await
    }

    async fn attendance_action(
        &self,
        path: &str,
        token: &str,
        email: &str,
        fallback: &str,
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(&json!({ "email": email }))
            .send()
            .await
            .map_err(network)?;
        expect_ok(response, fallback).await?;
        Ok(())
    }

    pub async fn records(
        &self,
        token: &str,
        email: &str,
        filter: &str,
    ) -> Result<RecordsResponse, ApiError> {
        let response = self
            .client
            .get(self.url("/api/attendance/records"))
            .bearer_auth(token)
            .query(&[("email", email), ("filter", filter)])
            .send()
            .await
            .map_err(network)?;
        expect_ok(response, RECORDS_FALLBACK)
            .await?
            .json()
            .await
            .map_err(network)
    }

    /// Asks the backend whether today is an off day (`is_off_day` plus
    /// `day_name`); the off-day policy lives server-side.
    pub async fn check_day(&self, token: &str, email: &str) -> Result<RecordsResponse, ApiError> {
        let response = self
            .client
            .get(self.url("/api/attendance/records"))
            .bearer_auth(token)
            .query(&[("email", email), ("check_day", "true")])
            .send()
            .await
            .map_err(network)?;
        expect_ok(response, RECORDS_FALLBACK)
            .await?
            .json()
            .await
            .map_err(network)
    }
}

fn network(err: reqwest::Error) -> ApiError {
    warn!("backend request failed: {err}");
    ApiError::Network
}

async fn expect_ok(response: reqwest::Response, fallback: &str) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<DetailResponse>()
        .await
        .ok()
        .and_then(|body| body.detail)
        .filter(|detail| !detail.is_empty())
        .unwrap_or_else(|| fallback.to_string());

    Err(ApiError::Upstream { status, message })
}
