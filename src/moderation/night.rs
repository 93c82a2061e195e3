use chrono::{DateTime, FixedOffset, Timelike, Utc};

/// Night window is `[NIGHT_START, 24) ∪ [0, NIGHT_END)`.
pub const NIGHT_START: u32 = 22;
pub const NIGHT_END: u32 = 9;

/// True when a night-mode group must drop every non-admin message.
pub fn is_silenced(night_mode_enabled: bool, hour: u32) -> bool {
    night_mode_enabled && (hour >= NIGHT_START || hour < NIGHT_END)
}

pub fn local_hour(now: DateTime<Utc>, offset: &FixedOffset) -> u32 {
    now.with_timezone(offset).hour()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn window_boundaries() {
        for hour in [22, 23, 0, 5, 8] {
            assert!(is_silenced(true, hour), "{hour}");
        }
        for hour in [9, 12, 21] {
            assert!(!is_silenced(true, hour), "{hour}");
        }
        assert!(!is_silenced(false, 23));
    }

    fn hours(h: f64) -> FixedOffset {
        FixedOffset::east_opt((h * 3600.0) as i32).unwrap()
    }

    #[test]
    fn hour_follows_offset() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 14, 30, 0).unwrap();
        assert_eq!(local_hour(now, &hours(8.0)), 22);
        assert_eq!(local_hour(now, &hours(0.0)), 14);
        assert_eq!(local_hour(now, &hours(-5.0)), 9);
    }

    #[test]
    fn half_hour_offset_moves_window_edge() {
        let ist = hours(5.5);
        // 03:15 UTC is 08:45 at UTC+5:30, still night
        let before = Utc.with_ymd_and_hms(2024, 1, 1, 3, 15, 0).unwrap();
        assert!(is_silenced(true, local_hour(before, &ist)));
        // 03:30 UTC is 09:00 local
        let after = Utc.with_ymd_and_hms(2024, 1, 1, 3, 30, 0).unwrap();
        assert!(!is_silenced(true, local_hour(after, &ist)));
        // 16:29 UTC is 21:59, 16:30 UTC is 22:00
        let evening = Utc.with_ymd_and_hms(2024, 1, 1, 16, 29, 0).unwrap();
        assert!(!is_silenced(true, local_hour(evening, &ist)));
        let night = Utc.with_ymd_and_hms(2024, 1, 1, 16, 30, 0).unwrap();
        assert!(is_silenced(true, local_hour(night, &ist)));
    }
}
