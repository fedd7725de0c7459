use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Numeral position on a unit-radius face; the page scales to its canvas.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Numeral {
    pub value: u32,
    pub x: f64,
    pub y: f64,
}

const NUMERAL_RING: f64 = 0.85;

/// Snapshot of the clock face for one tick. Hand angles are degrees
/// clockwise from twelve o'clock and move continuously through the day: the
/// hour hand creeps with the minutes and seconds, the minute hand with the
/// seconds. The only backward jump is the midnight wraparound.
#[derive(Debug, Clone, Serialize)]
pub struct ClockState {
    pub hour_angle: f64,
    pub minute_angle: f64,
    pub second_angle: f64,
    pub time_12h: String,
    pub date_line: String,
    pub numerals: Vec<Numeral>,
}

impl ClockState {
    pub fn now() -> Self {
        Self::at(Local::now().naive_local())
    }

    pub fn at(now: NaiveDateTime) -> Self {
        let hour = now.hour();
        let minute = now.minute();
        let second = now.second();

        let hour_angle =
            f64::from(hour % 12) * 30.0 + f64::from(minute) * 0.5 + f64::from(second) / 120.0;
        let minute_angle = f64::from(minute) * 6.0 + f64::from(second) * 0.1;
        let second_angle = f64::from(second) * 6.0;

        let meridiem = if hour >= 12 { "PM" } else { "AM" };
        let hour12 = match hour % 12 {
            0 => 12,
            value => value,
        };
        let time_12h = format!("{hour12:02}:{minute:02}:{second:02} {meridiem}");

        let date = now.date();
        let date_line = format!(
            "{}, {} {}, {}",
            date.format("%A"),
            date.format("%B"),
            date.day(),
            date.year()
        );

        let numerals = (1..=12)
            .map(|value| {
                let angle = f64::from(value) * std::f64::consts::PI / 6.0;
                Numeral {
                    value,
                    x: NUMERAL_RING * angle.sin(),
                    y: -NUMERAL_RING * angle.cos(),
                }
            })
            .collect();

        Self {
            hour_angle,
            minute_angle,
            second_angle,
            time_12h,
            date_line,
            numerals,
        }
    }
}

/// Once-per-second refresh of a shared [`ClockState`]. The task is owned by
/// this handle and aborted when the last clone of the owning state drops, so
/// the interval never outlives the widget.
#[derive(Debug)]
pub struct ClockTicker {
    handle: JoinHandle<()>,
}

impl ClockTicker {
    pub fn spawn(shared: Arc<Mutex<ClockState>>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            loop {
                interval.tick().await;
                *shared.lock().await = ClockState::now();
            }
        });
        Self { handle }
    }
}

impl Drop for ClockTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
