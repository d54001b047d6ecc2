use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDateTime, NaiveTime, Utc};

/// One reporting period: a Monday-through-Sunday calendar week evaluated in
/// the configured fixed zone. Built once per run, immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub label: String,
}

/// Resolve the calendar week containing `now`. The start is Monday 00:00:00
/// and the end Sunday 23:59:59 in `tz`; `num_days_from_monday` keeps Sunday
/// as the last day of the week, so a Sunday instant maps back six days.
pub fn current_week(now: DateTime<Utc>, tz: FixedOffset) -> Window {
    let local = now.with_timezone(&tz);
    let days_back = i64::from(local.weekday().num_days_from_monday());
    let monday = local.date_naive() - Duration::days(days_back);

    let start = at_offset(monday.and_time(NaiveTime::MIN), tz);
    let end = start + Duration::days(7) - Duration::seconds(1);
    let label = format!(
        "{} to {}",
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d")
    );

    Window { start, end, label }
}

/// Attach a fixed offset to a wall-clock reading. Fixed offsets have no
/// gaps or overlaps, so this is total, unlike `TimeZone::from_local_datetime`.
fn at_offset(local: NaiveDateTime, tz: FixedOffset) -> DateTime<FixedOffset> {
    let utc = local - Duration::seconds(i64::from(tz.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc, tz)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Weekday};

    use super::*;

    fn offset(hours: i32) -> FixedOffset {
        FixedOffset::east_opt(hours * 3600).unwrap()
    }

    fn assert_week_shape(window: &Window) {
        assert_eq!(window.start.weekday(), Weekday::Mon);
        assert_eq!(window.start.time(), NaiveTime::MIN);
        assert_eq!(window.end.weekday(), Weekday::Sun);
        assert_eq!(
            window.end.time(),
            NaiveTime::from_hms_opt(23, 59, 59).unwrap()
        );
    }

    #[test]
    fn midweek_instant_resolves_to_surrounding_week() {
        // 2025-01-08 is a Wednesday.
        let now = Utc.with_ymd_and_hms(2025, 1, 8, 12, 0, 0).unwrap();
        let window = current_week(now, offset(0));

        assert_week_shape(&window);
        assert_eq!(window.start.date_naive().to_string(), "2025-01-06");
        assert_eq!(window.end.date_naive().to_string(), "2025-01-12");
        assert!(window.start <= now.with_timezone(&offset(0)));
        assert!(now.with_timezone(&offset(0)) <= window.end);
    }

    #[test]
    fn sunday_maps_back_to_the_preceding_monday() {
        // 2025-01-12 is a Sunday; it must close the week, not open one.
        let now = Utc.with_ymd_and_hms(2025, 1, 12, 9, 30, 0).unwrap();
        let window = current_week(now, offset(0));

        assert_week_shape(&window);
        assert_eq!(window.start.date_naive().to_string(), "2025-01-06");
        assert_eq!(window.end.date_naive().to_string(), "2025-01-12");
    }

    #[test]
    fn monday_opens_its_own_week() {
        let now = Utc.with_ymd_and_hms(2025, 1, 6, 0, 0, 0).unwrap();
        let window = current_week(now, offset(0));

        assert_eq!(window.start.date_naive().to_string(), "2025-01-06");
        assert_eq!(window.start.with_timezone(&Utc), now);
    }

    #[test]
    fn configured_zone_decides_the_week() {
        // Sunday 22:30 UTC is already Monday 00:30 at +02:00, so the two
        // zones land in different weeks.
        let now = Utc.with_ymd_and_hms(2025, 1, 12, 22, 30, 0).unwrap();

        let utc_week = current_week(now, offset(0));
        assert_eq!(utc_week.start.date_naive().to_string(), "2025-01-06");

        let warsaw_week = current_week(now, offset(2));
        assert_eq!(warsaw_week.start.date_naive().to_string(), "2025-01-13");
        assert_week_shape(&warsaw_week);
    }

    #[test]
    fn label_renders_both_calendar_dates() {
        let now = Utc.with_ymd_and_hms(2025, 1, 8, 12, 0, 0).unwrap();
        let window = current_week(now, offset(0));
        assert_eq!(window.label, "2025-01-06 to 2025-01-12");
    }
}
