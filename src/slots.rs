use crate::errors::{BookingError, BookingResult};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const MINUTES_PER_DAY: u16 = 24 * 60;

lazy_static! {
    static ref TIME_FORMAT: Regex = Regex::new("^([0-1]?[0-9]|2[0-3]):([0-5][0-9])$").unwrap();
}

/// Half-open interval `[start, end)` on a single day, in minutes since
/// midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeSlot {
    start: u16,
    end: u16,
}

impl TimeSlot {
    pub fn new(start: u16, end: u16) -> BookingResult<Self> {
        if end <= start {
            return Err(BookingError::InvalidDuration(format!(
                "end {} must be after start {}",
                format_minutes(end),
                format_minutes(start)
            )));
        }
        if end > MINUTES_PER_DAY {
            return Err(BookingError::InvalidDuration(format!(
                "end {} exceeds the day",
                end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn from_times(start: &str, end: &str) -> BookingResult<Self> {
        Self::new(to_minutes(start)?, to_minutes(end)?)
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end - self.start
    }
}

/// Parses "HH:MM" to minutes since midnight.
pub fn to_minutes(time: &str) -> BookingResult<u16> {
    let captures = TIME_FORMAT
        .captures(time)
        .ok_or_else(|| BookingError::InvalidTimeFormat(time.to_string()))?;
    let hours: u16 = captures[1]
        .parse()
        .map_err(|_| BookingError::InvalidTimeFormat(time.to_string()))?;
    let minutes: u16 = captures[2]
        .parse()
        .map_err(|_| BookingError::InvalidTimeFormat(time.to_string()))?;
    Ok(hours * 60 + minutes)
}

pub fn format_minutes(minutes: u16) -> String {
    format!("{:02}:{:02}", (minutes / 60) % 24, minutes % 60)
}

/// Adds minutes to a "HH:MM" time. Only defined within a single calendar
/// day; results past 23:59 wrap the hour component.
pub fn add_minutes(time: &str, minutes: u16) -> BookingResult<String> {
    Ok(format_minutes(to_minutes(time)? + minutes))
}

/// Business-hours grid parameters. The grid is the same for every date
/// unless the configuration is overridden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotGridConfig {
    pub start_hour: u16,
    pub end_hour: u16,
    pub end_minute: u16,
    pub interval_minutes: u16,
}

impl Default for SlotGridConfig {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 16,
            end_minute: 30,
            interval_minutes: 30,
        }
    }
}

impl SlotGridConfig {
    pub fn day_start(&self) -> u16 {
        self.start_hour * 60
    }

    pub fn day_end(&self) -> u16 {
        self.end_hour * 60 + self.end_minute
    }
}

/// Enumerates the atomic bookable slots of a day: one slot per
/// `interval_minutes` mark from `start_hour` up to and including the
/// `end_hour:end_minute` boundary.
pub fn generate_day_slots(config: &SlotGridConfig) -> Vec<TimeSlot> {
    if config.interval_minutes == 0 {
        return Vec::new();
    }

    let mut slots = Vec::new();
    let mut mark = config.day_start();
    while mark <= config.day_end() {
        if let Ok(slot) = TimeSlot::new(mark, mark + config.interval_minutes) {
            slots.push(slot);
        }
        mark += config.interval_minutes;
    }
    slots
}

/// Allowed booking length, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationLimits {
    pub min_minutes: u16,
    pub max_minutes: u16,
}

impl Default for DurationLimits {
    fn default() -> Self {
        Self {
            min_minutes: 30,
            max_minutes: 480,
        }
    }
}

impl DurationLimits {
    pub fn validate(&self, slot: &TimeSlot) -> BookingResult<()> {
        let duration = slot.duration_minutes();
        if duration < self.min_minutes || duration > self.max_minutes {
            return Err(BookingError::InvalidDuration(format!(
                "booking length {} min outside allowed {} to {} min",
                duration, self.min_minutes, self.max_minutes
            )));
        }
        Ok(())
    }
}
