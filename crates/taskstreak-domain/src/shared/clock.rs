use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Utc};

use super::DomainError;

/// Source of "now" and "today".
///
/// Every calendar date in the system (creation, completion, heatmap window)
/// is derived from the same clock so that day boundaries agree.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn offset(&self) -> FixedOffset;

    fn today(&self) -> NaiveDate {
        self.now().with_timezone(&self.offset()).date_naive()
    }
}

/// Wall clock pinned to a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    pub fn with_offset_minutes(minutes: i32) -> Result<Self, DomainError> {
        let offset = FixedOffset::east_opt(minutes * 60).ok_or_else(|| {
            DomainError::Validation(format!("UTC offset out of range: {} minutes", minutes))
        })?;
        Ok(Self { offset })
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}

/// Clock frozen at a given day, used by tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    /// Noon UTC on `date`.
    pub fn on(date: NaiveDate) -> Self {
        let noon = date.and_time(NaiveTime::MIN) + Duration::hours(12);
        Self {
            now: Utc.from_utc_datetime(&noon),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn offset(&self) -> FixedOffset {
        Utc.fix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_today() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(FixedClock::on(date).today(), date);
    }

    #[test]
    fn test_offset_moves_day_boundary() {
        struct Shifted(FixedOffset);
        impl Clock for Shifted {
            fn now(&self) -> DateTime<Utc> {
                Utc.with_ymd_and_hms(2024, 1, 5, 23, 30, 0).unwrap()
            }
            fn offset(&self) -> FixedOffset {
                self.0
            }
        }

        let plus_one = Shifted(FixedOffset::east_opt(3600).unwrap());
        assert_eq!(plus_one.today(), NaiveDate::from_ymd_opt(2024, 1, 6).unwrap());

        let minus_one = Shifted(FixedOffset::west_opt(3600).unwrap());
        assert_eq!(minus_one.today(), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    }

    #[test]
    fn test_out_of_range_offset_rejected() {
        assert!(SystemClock::with_offset_minutes(24 * 60).is_err());
        assert!(SystemClock::with_offset_minutes(-330).is_ok());
    }
}
