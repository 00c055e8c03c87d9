//! Time utilities: an injectable clock with a local timezone.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::InvalidTimezone;

/// Source of "now". Everything that reads the current date goes through this.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Zone used to derive calendar days and month names.
    fn timezone(&self) -> Tz;

    fn local_now(&self) -> DateTime<Tz> {
        self.now().with_timezone(&self.timezone())
    }

    fn today(&self) -> NaiveDate {
        self.local_now().date_naive()
    }
}

/// Wall clock in a configured IANA zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(chrono_tz::UTC)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn timezone(&self) -> Tz {
        self.tz
    }
}

/// A clock frozen at one instant, for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    at: DateTime<Utc>,
    tz: Tz,
}

impl FixedClock {
    pub fn new(at: DateTime<Utc>, tz: Tz) -> Self {
        Self { at, tz }
    }

    /// Frozen at `hh:mm` UTC on the given day.
    ///
    /// # Panics
    ///
    /// If the date or time does not exist. Meant for fixtures, where a typo
    /// should fail loudly rather than move "today" somewhere else.
    pub fn utc(year: i32, month: u32, day: u32, hour: u32, min: u32) -> Self {
        let at = Utc
            .with_ymd_and_hms(year, month, day, hour, min, 0)
            .single()
            .expect("FixedClock::utc: invalid date or time");
        Self::new(at, chrono_tz::UTC)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.at
    }

    fn timezone(&self) -> Tz {
        self.tz
    }
}

/// Parse an IANA zone name like "America/Chicago".
pub fn parse_timezone(tz: &str) -> Result<Tz, InvalidTimezone> {
    tz.trim()
        .parse()
        .map_err(|_| InvalidTimezone(tz.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_today_follows_timezone() {
        // 03:00 UTC on Feb 21 is still Feb 20 in Chicago (UTC-6)
        let at = Utc.with_ymd_and_hms(2026, 2, 21, 3, 0, 0).unwrap();
        let chicago = FixedClock::new(at, parse_timezone("America/Chicago").unwrap());
        assert_eq!(chicago.today(), NaiveDate::from_ymd_opt(2026, 2, 20).unwrap());

        let utc = FixedClock::new(at, chrono_tz::UTC);
        assert_eq!(utc.today(), NaiveDate::from_ymd_opt(2026, 2, 21).unwrap());
    }

    #[test]
    fn test_parse_timezone_rejects_garbage() {
        assert!(parse_timezone("Mars/Olympus").is_err());
    }

    #[test]
    fn test_fixed_utc_clock() {
        let clock = FixedClock::utc(2026, 2, 19, 18, 30);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 2, 19).unwrap());
        assert_eq!(clock.timezone(), chrono_tz::UTC);
    }

    #[test]
    #[should_panic(expected = "invalid date or time")]
    fn test_fixed_utc_clock_rejects_impossible_date() {
        FixedClock::utc(2026, 2, 30, 12, 0);
    }
}
