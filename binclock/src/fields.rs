//! Wraparound arithmetic for the hour and minute fields.
//!
//! All functions are pure and total over their documented domains
//! (hour 0..=23, minute 0..=59); overflow is never an error, it wraps.

/// Result of a minute increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinuteRollover {
    pub minute: u8,
    pub hour: u8,
    /// True iff the minute wrapped 59 -> 0 and carried into the hour.
    pub carried: bool,
}

/// Adds one hour, wrapping 23 -> 0.
pub fn increment_hour(hour: u8) -> u8 {
    if hour >= 23 {
        return 0;
    }
    return hour + 1;
}

/// Adds one minute, carrying into the hour exactly once on 59 -> 0.
pub fn increment_minute(minute: u8, hour: u8) -> MinuteRollover {
    if minute >= 59 {
        return MinuteRollover {
            minute: 0,
            hour: increment_hour(hour),
            carried: true,
        };
    }
    return MinuteRollover {
        minute: minute + 1,
        hour,
        carried: false,
    };
}

/// Maps an hour into the 12-hour display range.
///
/// 24 and above clamp to 0, and 12 stays 12 (not 0). The 12 -> 12
/// boundary matches the original firmware and is intentional.
pub fn format_hour(hour: u8) -> u8 {
    if hour >= 24 {
        return 0;
    }
    if hour > 12 {
        return hour - 12;
    }
    return hour;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hour_wraps_at_midnight() {
        for hour in 0..24 {
            assert_eq!(increment_hour(hour), (hour + 1) % 24);
        }
    }

    #[test]
    fn minute_without_carry() {
        let rollover = increment_minute(48, 20);
        assert_eq!(
            rollover,
            MinuteRollover {
                minute: 49,
                hour: 20,
                carried: false,
            }
        );
    }

    #[test]
    fn minute_carries_exactly_at_59() {
        for minute in 0..60 {
            for hour in [0, 11, 23] {
                let rollover = increment_minute(minute, hour);
                assert_eq!(rollover.minute, (minute + 1) % 60);
                assert_eq!(rollover.carried, minute == 59);
                if minute == 59 {
                    assert_eq!(rollover.hour, increment_hour(hour));
                } else {
                    assert_eq!(rollover.hour, hour);
                }
            }
        }
    }

    #[test]
    fn carry_at_day_boundary() {
        let rollover = increment_minute(59, 23);
        assert_eq!(
            rollover,
            MinuteRollover {
                minute: 0,
                hour: 0,
                carried: true,
            }
        );
    }

    #[test]
    fn hour_format() {
        assert_eq!(format_hour(0), 0);
        assert_eq!(format_hour(12), 12);
        assert_eq!(format_hour(13), 1);
        assert_eq!(format_hour(23), 11);
        assert_eq!(format_hour(24), 0);
        assert_eq!(format_hour(30), 0);
    }
}
