//! Software wall clock
//!
//! The watch has no RTC yet, so time of day is a counter advanced once per
//! second by the render loop. [`ClockTime`] is the counter itself and
//! [`WatchClock`] adds the "has a second passed" bookkeeping.

use core::fmt::Write;
use core::str::FromStr;

use embassy_time::{Duration, Instant};
use heapless::String;
use thiserror_no_std::Error;

/// Minimum time between two clock advances.
pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// 24-hour or 12-hour presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFormat {
    #[default]
    TwentyFourHour,
    TwelveHour,
}

impl FromStr for TimeFormat {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "24h" | "24" => Ok(TimeFormat::TwentyFourHour),
            "12h" | "12" => Ok(TimeFormat::TwelveHour),
            _ => Err(ClockError::UnknownFormat),
        }
    }
}

/// Errors from parsing clock settings
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ClockError {
    /// Not `HH:MM` or `HH:MM:SS`
    #[error("Malformed time, expected HH:MM or HH:MM:SS")]
    Malformed,

    /// A field was out of range
    #[error("Time field out of range")]
    OutOfRange,

    /// Format was not `12h` or `24h`
    #[error("Unknown time format, expected 12h or 24h")]
    UnknownFormat,
}

/// Time of day with one-second resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    hours: u8,
    minutes: u8,
    seconds: u8,
}

impl Default for ClockTime {
    /// Noon, the power-on time.
    fn default() -> Self {
        Self {
            hours: 12,
            minutes: 0,
            seconds: 0,
        }
    }
}

impl ClockTime {
    /// Build a time, clamping each field into its valid range.
    pub fn new(hours: u8, minutes: u8, seconds: u8) -> Self {
        Self {
            hours: hours.min(23),
            minutes: minutes.min(59),
            seconds: seconds.min(59),
        }
    }

    pub fn hours(&self) -> u8 {
        self.hours
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn seconds(&self) -> u8 {
        self.seconds
    }

    /// Advance by one second, rolling over at midnight.
    pub fn tick(&mut self) {
        self.seconds += 1;
        if self.seconds < 60 {
            return;
        }
        self.seconds = 0;
        self.minutes += 1;
        if self.minutes < 60 {
            return;
        }
        self.minutes = 0;
        self.hours = (self.hours + 1) % 24;
    }

    /// `HH:MM:SS`. In 12-hour mode the hour runs 01..=12; see
    /// [`meridiem`](Self::meridiem) for the AM/PM marker.
    pub fn format_full(&self, format: TimeFormat) -> String<8> {
        let mut out = String::new();
        // 8 bytes always fits
        write!(
            out,
            "{:02}:{:02}:{:02}",
            self.display_hours(format),
            self.minutes,
            self.seconds
        )
        .ok();
        out
    }

    /// `HH:MM` for the status bar.
    pub fn format_short(&self, format: TimeFormat) -> String<5> {
        let mut out = String::new();
        write!(out, "{:02}:{:02}", self.display_hours(format), self.minutes).ok();
        out
    }

    /// `AM`/`PM` in 12-hour mode, nothing in 24-hour mode.
    pub fn meridiem(&self, format: TimeFormat) -> Option<&'static str> {
        match format {
            TimeFormat::TwentyFourHour => None,
            TimeFormat::TwelveHour if self.hours < 12 => Some("AM"),
            TimeFormat::TwelveHour => Some("PM"),
        }
    }

    fn display_hours(&self, format: TimeFormat) -> u8 {
        match (format, self.hours % 12) {
            (TimeFormat::TwentyFourHour, _) => self.hours,
            (TimeFormat::TwelveHour, 0) => 12,
            (TimeFormat::TwelveHour, h) => h,
        }
    }
}

impl FromStr for ClockTime {
    type Err = ClockError;

    /// Parse `HH:MM` or `HH:MM:SS` (24-hour).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.trim().split(':');
        let mut next = |required: bool| -> Result<u8, ClockError> {
            match fields.next() {
                Some(f) => f.parse::<u8>().map_err(|_| ClockError::Malformed),
                None if required => Err(ClockError::Malformed),
                None => Ok(0),
            }
        };

        let hours = next(true)?;
        let minutes = next(true)?;
        let seconds = next(false)?;
        if fields.next().is_some() {
            return Err(ClockError::Malformed);
        }
        if hours > 23 || minutes > 59 || seconds > 59 {
            return Err(ClockError::OutOfRange);
        }

        Ok(Self {
            hours,
            minutes,
            seconds,
        })
    }
}

/// [`ClockTime`] driven by a monotonic timestamp.
#[derive(Debug, Clone, Copy)]
pub struct WatchClock {
    time: ClockTime,
    last_tick: Instant,
}

impl Default for WatchClock {
    fn default() -> Self {
        Self::new(ClockTime::default())
    }
}

impl WatchClock {
    pub fn new(time: ClockTime) -> Self {
        Self {
            time,
            last_tick: Instant::from_ticks(0),
        }
    }

    pub fn time(&self) -> ClockTime {
        self.time
    }

    pub fn set_time(&mut self, time: ClockTime) {
        self.time = time;
    }

    /// Advance one second if at least [`TICK_INTERVAL`] passed since the last
    /// advance. Returns whether the time changed.
    ///
    /// The reference moves forward by exactly one interval, so late callers
    /// do not drift. At most one second is added per call; once the caller
    /// falls two intervals behind the reference snaps to `now` and the
    /// missed seconds are lost.
    pub fn update(&mut self, now: Instant) -> bool {
        let elapsed = now.saturating_duration_since(self.last_tick);
        if elapsed < TICK_INTERVAL {
            return false;
        }
        if elapsed >= TICK_INTERVAL * 2 {
            self.last_tick = now;
        } else {
            self.last_tick += TICK_INTERVAL;
        }
        self.time.tick();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_rolls_over_at_midnight() {
        let mut time = ClockTime::new(23, 59, 59);
        time.tick();
        assert_eq!(time, ClockTime::new(0, 0, 0));

        let mut time = ClockTime::new(9, 59, 59);
        time.tick();
        assert_eq!(time, ClockTime::new(10, 0, 0));
    }

    #[test]
    fn test_new_clamps_fields() {
        let time = ClockTime::new(30, 75, 60);
        assert_eq!((time.hours(), time.minutes(), time.seconds()), (23, 59, 59));
    }

    #[test]
    fn test_format_24_hour() {
        let time = ClockTime::new(7, 5, 9);
        assert_eq!(time.format_full(TimeFormat::TwentyFourHour).as_str(), "07:05:09");
        assert_eq!(time.format_short(TimeFormat::TwentyFourHour).as_str(), "07:05");
    }

    #[test]
    fn test_format_12_hour() {
        let after_midnight = ClockTime::new(0, 30, 0);
        assert_eq!(
            after_midnight.format_full(TimeFormat::TwelveHour).as_str(),
            "12:30:00"
        );
        assert_eq!(after_midnight.meridiem(TimeFormat::TwelveHour), Some("AM"));

        let afternoon = ClockTime::new(13, 5, 0);
        assert_eq!(afternoon.format_full(TimeFormat::TwelveHour).as_str(), "01:05:00");
        assert_eq!(afternoon.meridiem(TimeFormat::TwelveHour), Some("PM"));
        assert_eq!(afternoon.meridiem(TimeFormat::TwentyFourHour), None);
        assert_eq!(
            ClockTime::new(12, 0, 0).format_short(TimeFormat::TwelveHour).as_str(),
            "12:00"
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!("07:05:09".parse::<ClockTime>(), Ok(ClockTime::new(7, 5, 9)));
        assert_eq!("18:30".parse::<ClockTime>(), Ok(ClockTime::new(18, 30, 0)));
        assert_eq!("24:00".parse::<ClockTime>(), Err(ClockError::OutOfRange));
        assert_eq!("7".parse::<ClockTime>(), Err(ClockError::Malformed));
        assert_eq!("1:2:3:4".parse::<ClockTime>(), Err(ClockError::Malformed));
        assert_eq!("ab:cd".parse::<ClockTime>(), Err(ClockError::Malformed));
    }

    #[test]
    fn test_parse_time_format() {
        assert_eq!("12h".parse::<TimeFormat>(), Ok(TimeFormat::TwelveHour));
        assert_eq!(" 24h ".parse::<TimeFormat>(), Ok(TimeFormat::TwentyFourHour));
        assert_eq!("am".parse::<TimeFormat>(), Err(ClockError::UnknownFormat));
    }

    #[test]
    fn test_update_needs_a_full_second() {
        let mut clock = WatchClock::new(ClockTime::new(10, 0, 0));

        assert!(!clock.update(Instant::from_millis(999)));
        assert!(clock.update(Instant::from_millis(1000)));
        assert_eq!(clock.time(), ClockTime::new(10, 0, 1));

        assert!(!clock.update(Instant::from_millis(1500)));
        // A long stall still only advances one second
        assert!(clock.update(Instant::from_millis(5000)));
        assert_eq!(clock.time(), ClockTime::new(10, 0, 2));
    }

    #[test]
    fn test_update_keeps_pace_with_late_wakeups() {
        let mut clock = WatchClock::new(ClockTime::new(10, 0, 0));

        // Each wakeup lands a little after the second, by a varying amount
        let jitter_us = [70, 20, 55, 30, 65, 25, 60, 20, 45, 35, 50];
        let mut advanced = 0;
        for (k, jitter) in jitter_us.iter().enumerate() {
            let now = Instant::from_micros((k as u64 + 1) * 1_000_000 + jitter);
            if clock.update(now) {
                advanced += 1;
            }
        }

        assert_eq!(advanced, jitter_us.len());
        assert_eq!(clock.time(), ClockTime::new(10, 0, 11));
    }

    #[test]
    fn test_update_snaps_after_stall() {
        let mut clock = WatchClock::new(ClockTime::new(10, 0, 0));
        assert!(clock.update(Instant::from_millis(1000)));

        // Three seconds late: one second added, the rest dropped
        assert!(clock.update(Instant::from_millis(4000)));
        assert!(!clock.update(Instant::from_millis(4999)));
        assert!(clock.update(Instant::from_millis(5000)));
        assert_eq!(clock.time(), ClockTime::new(10, 0, 3));
    }
}
