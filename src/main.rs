use attendance_app::api::ApiClient;
use attendance_app::{load_session, resolve_session_path, router, AppState};
use std::{env, net::SocketAddr};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_API_URL: &str = "https://zeltivehrms.pythonanywhere.com";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let session_path = resolve_session_path()?;
    if let Some(parent) = session_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let stored = load_session(&session_path).await;
    let base_url = env::var("HR_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    info!("using HR backend at {base_url}");
    let api = ApiClient::new(base_url)?;

    let state = AppState::new(session_path, stored, api);
    let app = router(state);

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
