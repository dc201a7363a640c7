//! Date/time utilities for the mailbox service.
//!
//! "Today" is always the server's local calendar date. The [`Clock`] trait
//! lets tests pin or advance that date.

use std::sync::Mutex;

use chrono::{Days, Local, NaiveDate, NaiveDateTime};

/// Storage format for letter target dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Source of the current date and time.
pub trait Clock: Send + Sync {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;

    /// Current local calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Clock backed by the system's local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    /// Create a clock frozen at `now`.
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Create a clock frozen at noon on `date`.
    pub fn at_date(date: NaiveDate) -> Self {
        Self::new(date.and_hms_opt(12, 0, 0).unwrap_or_default())
    }

    /// Set the current time.
    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    /// Move the clock forward by whole days.
    pub fn advance_days(&self, days: u64) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(next) = now.checked_add_days(Days::new(days)) {
            *now = next;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fixed_clock_today() {
        let clock = FixedClock::at_date(date(2024, 3, 9));
        assert_eq!(clock.today(), date(2024, 3, 9));
    }

    #[test]
    fn test_fixed_clock_advance_across_month() {
        let clock = FixedClock::at_date(date(2024, 2, 28));
        clock.advance_days(1);
        assert_eq!(clock.today(), date(2024, 2, 29));
        clock.advance_days(1);
        assert_eq!(clock.today(), date(2024, 3, 1));
    }

    #[test]
    fn test_fixed_clock_set() {
        let clock = FixedClock::at_date(date(2024, 1, 1));
        clock.set(date(2025, 6, 30).and_hms_opt(23, 59, 59).unwrap());
        assert_eq!(clock.today(), date(2025, 6, 30));
    }

    #[test]
    fn test_system_clock_matches_local_date() {
        let today = SystemClock.today();
        let local = Local::now().date_naive();
        // Allow for a midnight rollover between the two reads.
        assert!(today == local || today.succ_opt() == Some(local));
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(date(2024, 1, 5)), "2024-01-05");
        assert_eq!(format_date(date(987, 12, 31)), "0987-12-31");
    }
}
