use std::env;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use tally_core::Clock;

/// Overrides "today" for scripted runs, as `YYYY-MM-DD`.
pub const TODAY_ENV: &str = "TALLY_CLI_TODAY";

/// Real-time clock backed by the system UTC time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one calendar day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Clock from [`TODAY_ENV`], if set to a valid date.
    pub fn from_env() -> Option<Self> {
        let raw = env::var(TODAY_ENV).ok()?;
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .ok()
            .map(Self::new)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.today.and_time(NaiveTime::MIN).and_utc()
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}
