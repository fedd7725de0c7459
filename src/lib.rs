pub mod api;
pub mod app;
pub mod calendar;
pub mod clock;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod storage;
pub mod ui;
pub mod view;
pub mod state;

pub use app::router;
pub use state::AppState;
pub use storage::{load_session, resolve_session_path};
