use time::{format_description::BorrowedFormatItem, macros::format_description, Date, Duration};

const DAY_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub fn parse_day(s: &str) -> anyhow::Result<Date> {
    Date::parse(s, DAY_FORMAT).map_err(|e| anyhow::anyhow!("invalid date {s:?}: {e}"))
}

pub fn format_day(d: Date) -> String {
    // The format has no fallible components.
    d.format(DAY_FORMAT).expect("YYYY-MM-DD always formats")
}

/// Monday of the ISO week containing `d`. Grocery lists are keyed by this date.
pub fn monday_of_week(d: Date) -> Date {
    let back = i64::from(d.weekday().number_from_monday()) - 1;
    d - Duration::days(back)
}

/// The seven calendar days starting at `start`, as `YYYY-MM-DD` strings.
pub fn week_dates(start: Date) -> Vec<String> {
    (0..7)
        .map(|i| format_day(start + Duration::days(i)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_format_round_trip() {
        let d = parse_day("2024-06-03").unwrap();
        assert_eq!(format_day(d), "2024-06-03");
        assert!(parse_day("not-a-date").is_err());
        assert!(parse_day("2024-13-40").is_err());
    }

    #[test]
    fn monday_is_fixed_point() {
        let monday = parse_day("2024-06-03").unwrap();
        assert_eq!(monday_of_week(monday), monday);
    }

    #[test]
    fn midweek_snaps_back_to_monday() {
        let wednesday = parse_day("2024-06-05").unwrap();
        assert_eq!(format_day(monday_of_week(wednesday)), "2024-06-03");
    }

    #[test]
    fn sunday_belongs_to_the_preceding_monday() {
        let sunday = parse_day("2024-06-09").unwrap();
        assert_eq!(format_day(monday_of_week(sunday)), "2024-06-03");
    }

    #[test]
    fn week_dates_cover_exactly_seven_days() {
        let start = parse_day("2024-06-03").unwrap();
        let days = week_dates(start);
        assert_eq!(days.len(), 7);
        assert_eq!(days.first().unwrap(), "2024-06-03");
        assert_eq!(days.last().unwrap(), "2024-06-09");
    }

    #[test]
    fn week_dates_cross_month_boundary() {
        let start = parse_day("2024-05-27").unwrap();
        let days = week_dates(start);
        assert_eq!(days.last().unwrap(), "2024-06-02");
    }
}
