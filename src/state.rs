use crate::api::ApiClient;
use crate::calendar::MonthCursor;
use crate::clock::{ClockState, ClockTicker};
use crate::models::StoredSession;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// All shared application state, mutex-guarded: the session, the calendar's
/// "currently displayed month" cursor and the latest clock tick. Dropping
/// the last clone also drops the ticker, which cancels its interval task.
#[derive(Clone)]
pub struct AppState {
    pub session_path: PathBuf,
    pub session: Arc<Mutex<StoredSession>>,
    pub api: ApiClient,
    pub month_cursor: Arc<Mutex<MonthCursor>>,
    pub clock: Arc<Mutex<ClockState>>,
    _clock_ticker: Arc<ClockTicker>,
}

impl AppState {
    pub fn new(session_path: PathBuf, stored: StoredSession, api: ApiClient) -> Self {
        let clock = Arc::new(Mutex::new(ClockState::now()));
        let ticker = ClockTicker::spawn(Arc::clone(&clock));
        Self {
            session_path,
            session: Arc::new(Mutex::new(stored)),
            api,
            month_cursor: Arc::new(Mutex::new(MonthCursor::current())),
            clock,
            _clock_ticker: Arc::new(ticker),
        }
    }
}
