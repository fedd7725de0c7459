use crate::errors::AppError;
use crate::models::StoredSession;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub fn resolve_session_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("SESSION_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/session.json"))
}

/// A missing file means "not logged in"; an unreadable or corrupt file is
/// logged and treated the same way.
pub async fn load_session(path: &Path) -> StoredSession {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(stored) => stored,
            Err(err) => {
                error!("failed to parse session file: {err}");
                StoredSession::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => StoredSession::default(),
        Err(err) => {
            error!("failed to read session file: {err}");
            StoredSession::default()
        }
    }
}

pub async fn persist_session(path: &Path, stored: &StoredSession) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(stored).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}
