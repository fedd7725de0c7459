use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub position: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

/// On-disk shape of the session file. Only the email is remembered; the
/// password is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoredSession {
    pub session: Option<Session>,
    pub remembered_email: Option<String>,
}

/// One attendance record as the backend returns it. The backend omits
/// fields freely, so everything is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceRecord {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub day_name: Option<String>,
    #[serde(default)]
    pub check_in: Option<String>,
    #[serde(default)]
    pub check_out: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub working_hours: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendanceStatus {
    Present,
    Late,
    EarlyCheckout,
    Absent,
    OffDay,
    Unrecognized(String),
}

impl AttendanceStatus {
    /// Total: any input yields a status. Unknown strings keep their text so
    /// the badge still shows what the backend sent, but they are logged
    /// instead of being silently treated as a known status.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Present" => Self::Present,
            "Late" => Self::Late,
            "Early Checkout" => Self::EarlyCheckout,
            "Absent" => Self::Absent,
            "Off Day" => Self::OffDay,
            other => {
                warn!("unrecognized attendance status from backend: {other:?}");
                Self::Unrecognized(other.to_string())
            }
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Present => "Present",
            Self::Late => "Late",
            Self::EarlyCheckout => "Early Checkout",
            Self::Absent => "Absent",
            Self::OffDay => "Off Day",
            Self::Unrecognized(raw) => raw,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecordsResponse {
    #[serde(default)]
    pub records: Vec<AttendanceRecord>,
    #[serde(default)]
    pub is_off_day: Option<bool>,
    #[serde(default)]
    pub day_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub position: String,
    pub company_code: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub position: String,
    #[serde(rename = "companyCode")]
    pub company_code: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: Option<String>,
}

/// Display-ready attendance row: times already in 12-hour form, status
/// resolved to a label plus a badge class.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceRow {
    pub date: String,
    pub name: String,
    pub day_name: String,
    pub check_in: String,
    pub check_out: String,
    pub status_label: String,
    pub status_class: String,
    pub working_hours: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct SummaryCounts {
    pub total_days: usize,
    pub present_days: usize,
    pub late_days: usize,
    pub absent_days: usize,
}

#[derive(Debug, Serialize)]
pub struct RecordsView {
    pub rows: Vec<AttendanceRow>,
    pub summary: SummaryCounts,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TodayView {
    pub row: Option<AttendanceRow>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OffDayView {
    pub is_off_day: bool,
    pub day_name: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub ok: bool,
    pub message: String,
}
