use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};

/// Clock abstracts access to the current local time so ledger operations stay deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current wall-clock time in the user's timezone.
    fn now(&self) -> NaiveDateTime;

    /// Returns the current calendar date. Defaults to `now().date()`.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    fn current_year(&self) -> i32 {
        self.today().year()
    }
}

/// Real-time clock backed by the system local time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Freezes the clock at midnight of the given day. Returns `None` for impossible dates.
    pub fn at_date(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_frozen_day() {
        let clock = FixedClock::at_date(2024, 3, 15).unwrap();
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(clock.current_year(), 2024);
    }

    #[test]
    fn fixed_clock_rejects_impossible_dates() {
        assert!(FixedClock::at_date(2023, 2, 29).is_none());
    }
}
