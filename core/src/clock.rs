use std::cell::Cell;

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};

/// Source of "now" for every date-keyed operation.
///
/// `today` is the client-local calendar day; time of day is never used for
/// day comparisons.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
    fn today(&self) -> NaiveDate;

    fn yesterday(&self) -> NaiveDate {
        self.today() - Duration::days(1)
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to a settable instant. Used by tests and replays.
pub struct FixedClock {
    now: Cell<DateTime<Utc>>,
}

impl FixedClock {
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    /// Pin to noon UTC on `date`.
    #[must_use]
    pub fn at_date(date: NaiveDate) -> Self {
        Self::new(noon(date))
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    pub fn set_date(&self, date: NaiveDate) {
        self.now.set(noon(date));
    }

    pub fn advance_days(&self, days: i64) {
        self.now.set(self.now.get() + Duration::days(days));
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }

    fn today(&self) -> NaiveDate {
        self.now.get().date_naive()
    }
}

fn noon(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(12, 0, 0)
        .unwrap_or_default()
        .and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_today_and_yesterday() {
        let clock = FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        // Leap year
        assert_eq!(
            clock.yesterday(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_fixed_clock_advance() {
        let clock = FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        clock.advance_days(1);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        clock.advance_days(-2);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 12, 30).unwrap());
    }

    #[test]
    fn test_fixed_clock_set_keeps_time_of_day_out_of_date() {
        let clock = FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        let late = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap()
            .and_utc();
        clock.set(late);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        clock.set(late + Duration::seconds(1));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 6, 16).unwrap());
    }
}
