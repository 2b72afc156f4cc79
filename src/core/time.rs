use chrono::{DateTime, Local, NaiveDate, Utc};

/// Clock abstracts access to the current timestamp so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current calendar date. Defaults to `now().date_naive()`.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock; `today` follows the local calendar like the user does.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Returns `None` for dates that do not exist.
    pub fn on(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::new)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.today
            .and_hms_opt(12, 0, 0)
            .map(|naive| naive.and_utc())
            .unwrap_or_default()
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}
