use crate::models::{
    AttendanceRecord, AttendanceRow, AttendanceStatus, RecordsView, SummaryCounts, TodayView,
};

pub const NO_RECORDS_MESSAGE: &str = "No attendance records found";
pub const NO_RECORD_TODAY_MESSAGE: &str =
    "No attendance record for today yet. Please check in to start tracking.";

/// Reformat a 24-hour "HH:MM:SS" time as 12-hour with AM/PM. The sentinel
/// "N/A" (and the empty string) pass through as "N/A"; anything that does
/// not parse is returned unchanged. Minute and second fields are carried
/// through as-is.
pub fn convert_to_12_hour(time: &str) -> String {
    if time.is_empty() || time == "N/A" {
        return "N/A".to_string();
    }

    let mut parts = time.split(':');
    let hours = parts.next().unwrap_or_default();
    let minutes = parts.next().filter(|part| !part.is_empty()).unwrap_or("00");
    let seconds = parts.next().filter(|part| !part.is_empty()).unwrap_or("00");

    let Ok(hour24) = hours.parse::<u32>() else {
        return time.to_string();
    };

    let meridiem = if hour24 >= 12 { "PM" } else { "AM" };
    let hour12 = match hour24 % 12 {
        0 => 12,
        hour => hour,
    };

    format!("{hour12:02}:{minutes}:{seconds} {meridiem}")
}

/// Badge class lookup. Total by construction: unrecognized statuses share
/// the off-day class.
pub fn status_class(status: &AttendanceStatus) -> &'static str {
    match status {
        AttendanceStatus::Present => "status-present",
        AttendanceStatus::Late => "status-late",
        AttendanceStatus::EarlyCheckout => "status-early",
        AttendanceStatus::Absent => "status-absent",
        AttendanceStatus::OffDay | AttendanceStatus::Unrecognized(_) => "status-offday",
    }
}

pub fn record_row(record: &AttendanceRecord) -> (AttendanceRow, AttendanceStatus) {
    let status = AttendanceStatus::parse(record.status.as_deref().unwrap_or_default());
    let row = AttendanceRow {
        date: record.date.clone().unwrap_or_else(|| "-".to_string()),
        name: record.name.clone().unwrap_or_else(|| "-".to_string()),
        day_name: record.day_name.clone().unwrap_or_else(|| "-".to_string()),
        check_in: convert_to_12_hour(record.check_in.as_deref().unwrap_or("N/A")),
        check_out: convert_to_12_hour(record.check_out.as_deref().unwrap_or("N/A")),
        status_label: status.label().to_string(),
        status_class: status_class(&status).to_string(),
        working_hours: match record.working_hours {
            Some(hours) if hours != 0.0 => hours.to_string(),
            _ => "0".to_string(),
        },
    };
    (row, status)
}

/// Single pass over the statuses. Early checkouts and off days contribute to
/// the total but have no dedicated counter.
pub fn summarize<'a, I>(statuses: I) -> SummaryCounts
where
    I: IntoIterator<Item = &'a AttendanceStatus>,
{
    let mut counts = SummaryCounts::default();
    for status in statuses {
        counts.total_days += 1;
        match status {
            AttendanceStatus::Present => counts.present_days += 1,
            AttendanceStatus::Late => counts.late_days += 1,
            AttendanceStatus::Absent => counts.absent_days += 1,
            _ => {}
        }
    }
    counts
}

pub fn records_view(records: &[AttendanceRecord]) -> RecordsView {
    if records.is_empty() {
        return RecordsView {
            rows: Vec::new(),
            summary: SummaryCounts::default(),
            message: Some(NO_RECORDS_MESSAGE.to_string()),
        };
    }

    let mut rows = Vec::with_capacity(records.len());
    let mut statuses = Vec::with_capacity(records.len());
    for record in records {
        let (row, status) = record_row(record);
        rows.push(row);
        statuses.push(status);
    }

    RecordsView {
        summary: summarize(&statuses),
        rows,
        message: None,
    }
}

pub fn today_view(records: &[AttendanceRecord]) -> TodayView {
    match records.first() {
        Some(record) => TodayView {
            row: Some(record_row(record).0),
            message: None,
        },
        None => TodayView {
            row: None,
            message: Some(NO_RECORD_TODAY_MESSAGE.to_string()),
        },
    }
}
