//! Release window filter.
//!
//! Decides whether an album counts as "new": its release timestamp must lie
//! strictly less than `days * 86400` seconds before now. Dates are taken as
//! UTC midnight. Month and year precision dates start on the 1st of the month
//! and on January 1st respectively.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::{
    errors::{ReleasifyError, Result},
    types::ReleaseDatePrecision,
};

pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseWindow {
    days: u32,
}

impl Default for ReleaseWindow {
    fn default() -> Self {
        Self::days(Self::DEFAULT_DAYS)
    }
}

impl ReleaseWindow {
    pub const DEFAULT_DAYS: u32 = 7;

    pub fn days(days: u32) -> Self {
        Self { days }
    }

    pub fn len_days(&self) -> u32 {
        self.days
    }

    pub fn as_seconds(&self) -> i64 {
        i64::from(self.days) * SECONDS_PER_DAY
    }

    /// Returns whether a release falls inside the window ending at `now`.
    ///
    /// Dates beyond the representable calendar range are never recent. A
    /// release dated in the future is recent. The boundary is exclusive.
    pub fn contains(
        &self,
        release_date: &str,
        precision: ReleaseDatePrecision,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let Some(released) = release_timestamp(release_date, precision)? else {
            return Ok(false);
        };

        let elapsed = now.timestamp() - released.timestamp();
        Ok(elapsed < self.as_seconds())
    }
}

/// Parses a release date according to its precision.
///
/// Month and year dates are completed to the 1st of the month and January
/// 1st before parsing. Returns `Ok(None)` when the year is outside what the
/// calendar can represent, and an error when the string does not match the
/// precision.
pub fn release_timestamp(
    release_date: &str,
    precision: ReleaseDatePrecision,
) -> Result<Option<DateTime<Utc>>> {
    let full_date = match precision {
        ReleaseDatePrecision::Day => release_date.to_string(),
        ReleaseDatePrecision::Month => format!("{release_date}-01"),
        ReleaseDatePrecision::Year => format!("{release_date}-01-01"),
    };

    if year_beyond_calendar(release_date) {
        return Ok(None);
    }

    let date = NaiveDate::parse_from_str(&full_date, "%Y-%m-%d").map_err(|_| {
        ReleasifyError::InvalidReleaseDate {
            date: release_date.to_string(),
            precision: precision.to_string(),
        }
    })?;

    Ok(date.and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc()))
}

// checked before parsing: an unsigned `%Y` reads at most four digits
fn year_beyond_calendar(release_date: &str) -> bool {
    let year = release_date.split('-').next().unwrap_or_default();
    if year.is_empty() || !year.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    match year.parse::<i64>() {
        Ok(year) => year > i64::from(NaiveDate::MAX.year()),
        Err(_) => true,
    }
}
