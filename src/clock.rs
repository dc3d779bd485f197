use chrono::{NaiveDate, Utc};

/// Source of "today" for past-date checks. Injected rather than read from
/// a global so the booking flow stays testable.
pub trait Clock: Clone + Send + Sync + 'static {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        // Calendar days are always derived from the UTC date part.
        Utc::now().date_naive()
    }
}
