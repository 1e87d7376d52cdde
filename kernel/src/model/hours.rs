use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};

/// Opening hours per weekday, as inclusive `[open, last seating]` ranges
/// (a request at the last seating time is still accepted). Closed on
/// Mondays; weekends run later and Sunday opens early.
///
/// Note: the reservation creation path deliberately does not consult this
/// table; it only rejects malformed times. The front desk reviews every
/// pending request by hand, so out-of-hours requests are caught there.
pub fn is_within_business_hours(date: NaiveDate, time: &str) -> bool {
    let Ok(time) = NaiveTime::parse_from_str(time, "%H:%M") else {
        return false;
    };
    let range = match date.weekday() {
        Weekday::Mon => return false,
        Weekday::Tue | Weekday::Wed | Weekday::Thu => ("17:00", "21:30"),
        Weekday::Fri | Weekday::Sat => ("17:00", "22:30"),
        Weekday::Sun => ("16:00", "20:30"),
    };
    let open = NaiveTime::parse_from_str(range.0, "%H:%M").ok();
    let last = NaiveTime::parse_from_str(range.1, "%H:%M").ok();
    match (open, last) {
        (Some(open), Some(last)) => time >= open && time <= last,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn closed_on_mondays() {
        // 2030-06-03 is a Monday
        assert!(!is_within_business_hours(day(2030, 6, 3), "19:00"));
    }

    #[test]
    fn weekday_last_seating_is_earlier_than_weekend() {
        let tuesday = day(2030, 6, 4);
        let friday = day(2030, 6, 7);
        assert!(is_within_business_hours(tuesday, "21:30"));
        assert!(!is_within_business_hours(tuesday, "22:00"));
        assert!(is_within_business_hours(friday, "22:00"));
    }

    #[test]
    fn sunday_opens_early() {
        let sunday = day(2030, 6, 2);
        assert!(is_within_business_hours(sunday, "16:00"));
        assert!(!is_within_business_hours(sunday, "21:00"));
    }

    #[test]
    fn malformed_time_is_outside_hours() {
        assert!(!is_within_business_hours(day(2030, 6, 4), "7pm"));
    }
}
