//! Display formatting for bill dates and statuses

use chrono::{DateTime, Datelike, NaiveDate};

use crate::errors::FormatError;
use crate::models::BillStatus;

/// First three letters of the French short month names.
const MONTHS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// Format a raw bill date as e.g. `4 Avr. 04`.
///
/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp, of which only the date part is used.
pub fn format_date(raw: &str) -> Result<String, FormatError> {
    let date = parse_date(raw).ok_or_else(|| FormatError(raw.to_string()))?;
    let month = MONTHS[date.month0() as usize];
    let year = date.year().rem_euclid(100);
    Ok(format!("{} {}. {:02}", date.day(), month, year))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Display label of a status. Unknown statuses are returned unchanged.
pub fn format_status(status: &BillStatus) -> String {
    match status {
        BillStatus::Pending => "En attente".to_string(),
        BillStatus::Accepted => "Accepté".to_string(),
        BillStatus::Refused => "Refusé".to_string(),
        BillStatus::Other(s) => s.clone(),
    }
}
