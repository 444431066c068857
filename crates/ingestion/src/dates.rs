//! Step completion date parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Parses date cells against an ordered list of `chrono` formats
///
/// RFC 3339 timestamps are accepted first and keep their local wall-clock
/// time. Date-only formats yield midnight.
#[derive(Debug, Clone)]
pub struct DateParser {
    formats: Vec<String>,
}

impl DateParser {
    pub fn new(formats: Vec<String>) -> Self {
        Self { formats }
    }

    /// Parse a cell
    ///
    /// Returns `Ok(None)` for a blank cell and `Err(())` when no format matches.
    #[allow(clippy::result_unit_err)]
    pub fn parse(&self, raw: &str) -> Result<Option<NaiveDateTime>, ()> {
        let value = raw.trim();
        if value.is_empty() {
            return Ok(None);
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Ok(Some(dt.naive_local()));
        }

        for fmt in &self.formats {
            if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
                return Ok(Some(dt));
            }
            if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
                return Ok(Some(date.and_time(NaiveTime::MIN)));
            }
        }

        Err(())
    }
}

impl Default for DateParser {
    fn default() -> Self {
        Self::new(contracts::default_date_formats())
    }
}
