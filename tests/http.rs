use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use once_cell::sync::Lazy;
use reqwest::redirect::Policy;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct RowResponse {
    date: String,
    check_in: String,
    check_out: String,
    status_label: String,
    status_class: String,
    working_hours: String,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    total_days: usize,
    present_days: usize,
    late_days: usize,
    absent_days: usize,
}

#[derive(Debug, Deserialize)]
struct RecordsViewResponse {
    rows: Vec<RowResponse>,
    summary: SummaryResponse,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ActionResponse {
    ok: bool,
    message: String,
}

#[derive(Debug, Deserialize)]
struct ClockResponse {
    hour_angle: f64,
    minute_angle: f64,
    second_angle: f64,
    time_12h: String,
    date_line: String,
    numerals: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct GridResponse {
    year: i32,
    month_label: String,
    cells: Vec<Value>,
}

// ---- stub HR backend ------------------------------------------------------

async fn stub_login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    if email == "nodetail@example.com" {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    if body["password"].as_str() != Some("secret") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Invalid credentials" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "token": "stub-token",
            "user": { "name": "Amina", "email": email, "position": "Engineer" }
        })),
    )
}

async fn stub_register(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["email"].as_str().unwrap_or_default().contains("taken") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Email already registered" })),
        );
    }
    (StatusCode::OK, Json(json!({})))
}

async fn stub_records(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    if params.get("check_day").map(String::as_str) == Some("true") {
        return Json(json!({ "records": [], "is_off_day": false, "day_name": "Monday" }));
    }

    let today = json!({
        "date": "2026-08-24",
        "name": "Amina",
        "day_name": "Monday",
        "check_in": "09:05:00",
        "check_out": "17:30:00",
        "status": "Present",
        "working_hours": 8.5
    });

    if params.get("filter").map(String::as_str) == Some("today") {
        return Json(json!({ "records": [today] }));
    }

    Json(json!({
        "records": [
            today,
            {
                "date": "2026-08-21",
                "name": "Amina",
                "day_name": "Friday",
                "check_in": "10:20:00",
                "check_out": null,
                "status": "Late",
                "working_hours": 0
            }
        ]
    }))
}

fn stub_router() -> Router {
    Router::new()
        .route("/api/auth/login", post(stub_login))
        .route("/api/auth/register", post(stub_register))
        .route("/api/auth/logout", post(|| async { Json(json!({})) }))
        .route("/api/attendance/checkin", post(|| async { Json(json!({})) }))
        .route("/api/attendance/checkout", post(|| async { Json(json!({})) }))
        .route("/api/attendance/records", get(stub_records))
}

/// The stub backend lives on its own thread with its own runtime so it
/// survives across the per-test runtimes.
static STUB_URL: Lazy<String> = Lazy::new(|| {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub port");
    let addr = listener.local_addr().unwrap();
    listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("stub runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, stub_router()).await.unwrap();
        });
    });

    format!("http://{addr}")
});

// ---- app server harness ---------------------------------------------------

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[cfg(unix)]
mod cleanup {
    use std::sync::{Mutex, Once};

    static REGISTER: Once = Once::new();
    static PIDS: Mutex<Vec<i32>> = Mutex::new(Vec::new());

    pub fn register(pid: u32) {
        REGISTER.call_once(|| unsafe {
            libc::atexit(on_exit);
        });
        PIDS.lock().unwrap().push(pid as i32);
    }

    extern "C" fn on_exit() {
        if let Ok(pids) = PIDS.lock() {
            for pid in pids.iter() {
                unsafe {
                    libc::kill(*pid, libc::SIGTERM);
                }
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_session_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "attendance_http_{}_{}.json",
        std::process::id(),
        nanos
    ));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/login")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

/// Each test gets its own server and session file so login state never
/// leaks between tests.
async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let session_path = unique_session_path();
    let child = Command::new(env!("CARGO_BIN_EXE_attendance_app"))
        .env("PORT", port.to_string())
        .env("SESSION_PATH", session_path)
        .env("HR_API_URL", STUB_URL.as_str())
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

fn no_redirect_client() -> Client {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .unwrap()
}

async fn login(client: &Client, base_url: &str) {
    let response = client
        .post(format!("{base_url}/login"))
        .form(&[
            ("email", "amina@example.com"),
            ("password", "secret"),
            ("remember_me", "on"),
        ])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(response.headers()["location"], "/");
}

// ---- tests ----------------------------------------------------------------

#[tokio::test]
async fn http_unauthenticated_dashboard_redirects_to_login() {
    let server = spawn_server().await;
    let client = no_redirect_client();

    let response = client.get(&server.base_url).send().await.unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(response.headers()["location"], "/login");

    let records = client
        .get(format!("{}/api/records", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(records.status(), reqwest::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn http_login_persists_session_and_serves_dashboard() {
    let server = spawn_server().await;
    let client = no_redirect_client();

    login(&client, &server.base_url).await;

    let dashboard = client.get(&server.base_url).send().await.unwrap();
    assert!(dashboard.status().is_success());
    let body = dashboard.text().await.unwrap();
    assert!(body.contains("Amina"));
    assert!(body.contains("Engineer"));
    assert!(body.contains("calendar-days"));
}

#[tokio::test]
async fn http_login_surfaces_detail_verbatim() {
    let server = spawn_server().await;
    let client = no_redirect_client();

    let response = client
        .post(format!("{}/login", server.base_url))
        .form(&[("email", "amina@example.com"), ("password", "wrong")])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("Invalid credentials"));
}

#[tokio::test]
async fn http_login_uses_fallback_without_detail() {
    let server = spawn_server().await;
    let client = no_redirect_client();

    let response = client
        .post(format!("{}/login", server.base_url))
        .form(&[("email", "nodetail@example.com"), ("password", "secret")])
        .send()
        .await
        .unwrap();
    let body = response.text().await.unwrap();
    assert!(body.contains("Login failed. Please check your credentials."));
}

#[tokio::test]
async fn http_register_error_shows_backend_detail() {
    let server = spawn_server().await;
    let client = no_redirect_client();

    let response = client
        .post(format!("{}/register", server.base_url))
        .form(&[
            ("name", "Amina"),
            ("email", "taken@example.com"),
            ("position", "Engineer"),
            ("company_code", "ZX-12"),
            ("password", "secret"),
        ])
        .send()
        .await
        .unwrap();
    let body = response.text().await.unwrap();
    assert!(body.contains("Email already registered"));
}

#[tokio::test]
async fn http_records_view_model_over_the_wire() {
    let server = spawn_server().await;
    let client = no_redirect_client();

    login(&client, &server.base_url).await;

    let view: RecordsViewResponse = client
        .get(format!("{}/api/records?filter=all", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(view.rows.len(), 2);
    assert!(view.message.is_none());

    assert_eq!(view.rows[0].date, "2026-08-24");
    assert_eq!(view.rows[0].check_in, "09:05:00 AM");
    assert_eq!(view.rows[0].check_out, "05:30:00 PM");
    assert_eq!(view.rows[0].status_label, "Present");
    assert_eq!(view.rows[0].status_class, "status-present");
    assert_eq!(view.rows[0].working_hours, "8.5");

    assert_eq!(view.rows[1].check_out, "N/A");
    assert_eq!(view.rows[1].status_class, "status-late");
    assert_eq!(view.rows[1].working_hours, "0");

    assert_eq!(view.summary.total_days, 2);
    assert_eq!(view.summary.present_days, 1);
    assert_eq!(view.summary.late_days, 1);
    assert_eq!(view.summary.absent_days, 0);
}

#[tokio::test]
async fn http_check_in_round_trip() {
    let server = spawn_server().await;
    let client = no_redirect_client();

    login(&client, &server.base_url).await;

    let action: ActionResponse = client
        .post(format!("{}/attendance/checkin", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(action.ok);
    assert_eq!(action.message, "Check-in successful!");
}

#[tokio::test]
async fn http_calendar_navigation_wraps_months() {
    let server = spawn_server().await;
    let client = no_redirect_client();

    login(&client, &server.base_url).await;

    let initial: GridResponse = client
        .get(format!("{}/api/calendar", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(initial.cells.len(), 42);

    let nav = client
        .post(format!("{}/calendar/next", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(nav.status().is_redirection());

    let shifted: GridResponse = client
        .get(format!("{}/api/calendar", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(shifted.cells.len(), 42);
    assert!(
        shifted.month_label != initial.month_label || shifted.year == initial.year + 1,
        "next month should change the label or wrap the year"
    );

    // And back again.
    client
        .post(format!("{}/calendar/prev", server.base_url))
        .send()
        .await
        .unwrap();
    let back: GridResponse = client
        .get(format!("{}/api/calendar", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(back.month_label, initial.month_label);
    assert_eq!(back.year, initial.year);
}

#[tokio::test]
async fn http_clock_state_is_served() {
    let server = spawn_server().await;
    let client = no_redirect_client();

    login(&client, &server.base_url).await;

    let clock: ClockResponse = client
        .get(format!("{}/api/clock", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(clock.numerals.len(), 12);
    assert!(clock.time_12h.ends_with("AM") || clock.time_12h.ends_with("PM"));
    assert!(!clock.date_line.is_empty());
    assert!((0.0..360.0).contains(&clock.hour_angle));
    assert!((0.0..360.0).contains(&clock.minute_angle));
    assert!((0.0..360.0).contains(&clock.second_angle));
}

#[tokio::test]
async fn http_logout_clears_the_session() {
    let server = spawn_server().await;
    let client = no_redirect_client();

    login(&client, &server.base_url).await;

    let logout = client
        .post(format!("{}/logout", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(logout.status().is_redirection());
    assert_eq!(logout.headers()["location"], "/login");

    let dashboard = client.get(&server.base_url).send().await.unwrap();
    assert!(dashboard.status().is_redirection());
    assert_eq!(dashboard.headers()["location"], "/login");
}
