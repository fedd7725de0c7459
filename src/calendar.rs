use chrono::{Datelike, Local, NaiveDate, Weekday};
use serde::Serialize;

/// 6 rows of 7 weekday columns, padded with empty cells.
pub const CELL_COUNT: usize = 42;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Which month the dashboard is currently showing. Month is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthCursor {
    pub year: i32,
    pub month: u32,
}

impl MonthCursor {
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    /// Move by whole months, wrapping across year boundaries. Unbounded in
    /// both directions.
    pub fn shift(self, delta: i32) -> Self {
        let months = self.year * 12 + self.month as i32 - 1 + delta;
        Self {
            year: months.div_euclid(12),
            month: months.rem_euclid(12) as u32 + 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    pub day: Option<u32>,
    pub off_day: bool,
    pub today: bool,
}

const PADDING: CalendarCell = CalendarCell {
    day: None,
    off_day: false,
    today: false,
};

#[derive(Debug, Clone, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month_label: &'static str,
    pub cells: Vec<CalendarCell>,
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(0)
}

fn is_off_weekday(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sun | Weekday::Tue)
}

/// Build the 42-cell grid for the cursor's month. `today` decides which cell
/// (if any) gets the today marker; off days follow the fixed
/// Sunday-or-Tuesday policy.
pub fn month_grid(cursor: MonthCursor, today: NaiveDate) -> MonthGrid {
    let month_label = MONTH_NAMES
        .get(cursor.month as usize - 1)
        .copied()
        .unwrap_or("Unknown");

    let mut cells = Vec::with_capacity(CELL_COUNT);
    if let Some(first) = NaiveDate::from_ymd_opt(cursor.year, cursor.month, 1) {
        let leading = first.weekday().num_days_from_sunday() as usize;
        cells.resize(leading, PADDING);

        let in_current_month =
            today.year() == cursor.year && today.month() == cursor.month;
        for day in 1..=days_in_month(cursor.year, cursor.month) {
            let weekday = NaiveDate::from_ymd_opt(cursor.year, cursor.month, day)
                .map(|date| date.weekday())
                .unwrap_or(Weekday::Mon);
            cells.push(CalendarCell {
                day: Some(day),
                off_day: is_off_weekday(weekday),
                today: in_current_month && day == today.day(),
            });
        }
    }
    cells.resize(CELL_COUNT, PADDING);

    MonthGrid {
        year: cursor.year,
        month_label,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn grid(year: i32, month: u32) -> MonthGrid {
        // A `today` far outside the rendered month keeps the marker off.
        month_grid(MonthCursor { year, month }, date(1990, 6, 15))
    }

    #[test]
    fn every_month_has_exactly_42_cells() {
        for month in 1..=12 {
            assert_eq!(grid(2026, month).cells.len(), CELL_COUNT);
            assert_eq!(grid(2024, month).cells.len(), CELL_COUNT);
        }
    }

    #[test]
    fn day_cells_match_days_in_month() {
        for (year, month, expected) in [
            (2026, 2, 28),
            (2024, 2, 29),
            (2026, 8, 31),
            (2026, 9, 30),
            (2026, 12, 31),
        ] {
            assert_eq!(days_in_month(year, month), expected);
            let count = grid(year, month)
                .cells
                .iter()
                .filter(|cell| cell.day.is_some())
                .count() as u32;
            assert_eq!(count, expected, "{year}-{month}");
        }
    }

    #[test]
    fn leading_padding_equals_first_weekday() {
        // 2026-08-01 is a Saturday: six leading padding cells.
        let cells = grid(2026, 8).cells;
        assert!(cells[..6].iter().all(|cell| cell.day.is_none()));
        assert_eq!(cells[6].day, Some(1));

        // 2026-02-01 is a Sunday: no leading padding.
        assert_eq!(grid(2026, 2).cells[0].day, Some(1));
    }

    #[test]
    fn off_days_are_sundays_and_tuesdays_only() {
        for month in 1..=12 {
            for cell in grid(2026, month).cells {
                let Some(day) = cell.day else {
                    assert!(!cell.off_day);
                    continue;
                };
                let weekday = date(2026, month, day).weekday();
                assert_eq!(cell.off_day, is_off_weekday(weekday), "2026-{month}-{day}");
            }
        }
    }

    #[test]
    fn today_marked_only_in_matching_month() {
        let today = date(2026, 8, 24);
        let current = month_grid(MonthCursor { year: 2026, month: 8 }, today);
        let marked: Vec<u32> = current
            .cells
            .iter()
            .filter(|cell| cell.today)
            .filter_map(|cell| cell.day)
            .collect();
        assert_eq!(marked, vec![24]);

        let other = month_grid(MonthCursor { year: 2026, month: 7 }, today);
        assert!(other.cells.iter().all(|cell| !cell.today));

        let other_year = month_grid(MonthCursor { year: 2025, month: 8 }, today);
        assert!(other_year.cells.iter().all(|cell| !cell.today));
    }

    #[test]
    fn month_label_and_year_follow_cursor() {
        let grid = grid(2026, 8);
        assert_eq!(grid.month_label, "August");
        assert_eq!(grid.year, 2026);
    }

    #[test]
    fn shift_wraps_across_year_boundaries() {
        let december = MonthCursor { year: 2026, month: 12 };
        assert_eq!(december.shift(1), MonthCursor { year: 2027, month: 1 });

        let january = MonthCursor { year: 2026, month: 1 };
        assert_eq!(january.shift(-1), MonthCursor { year: 2025, month: 12 });
    }

    #[test]
    fn shift_handles_large_jumps() {
        let cursor = MonthCursor { year: 2026, month: 8 };
        assert_eq!(cursor.shift(17), MonthCursor { year: 2028, month: 1 });
        assert_eq!(cursor.shift(-20), MonthCursor { year: 2024, month: 12 });
        assert_eq!(cursor.shift(12).shift(-12), cursor);
    }
}
