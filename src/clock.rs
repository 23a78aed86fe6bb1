//! Time source abstraction so age checks and reference ids can be tested

use chrono::{Local, NaiveDate, Utc};

/// Supplies "today" for age computation and "now" for reference tokens
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    /// Current local calendar date
    fn today(&self) -> NaiveDate;

    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub today: NaiveDate,
    pub millis: i64,
}

impl FixedClock {
    pub fn on(today: NaiveDate) -> Self {
        let millis = today
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or_default();
        Self { today, millis }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn now_millis(&self) -> i64 {
        self.millis
    }
}
