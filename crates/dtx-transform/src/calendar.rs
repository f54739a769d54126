//! Gregorian calendar arithmetic in closed form.
//!
//! Weekdays are numbered Monday = 0 through Sunday = 6. Week numbers follow
//! ISO 8601: week 1 holds the year's first Thursday.

/// Abbreviated month names, January first. Matching is case-sensitive.
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const DAYS_IN_MONTH: [i64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

const THURSDAY: i64 = 3;
const WEDNESDAY: i64 = 2;

/// Month number (1-12) for an abbreviated month name.
pub fn month_from_name(name: &str) -> Option<i64> {
    MONTH_NAMES
        .iter()
        .position(|&m| m == name)
        .map(|i| i as i64 + 1)
}

pub fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Days in `month` of `year`, or `None` for a month outside 1-12.
pub fn days_in_month(year: i64, month: i64) -> Option<i64> {
    let index = usize::try_from(month.checked_sub(1)?).ok()?;
    let days = *DAYS_IN_MONTH.get(index)?;
    Some(if month == 2 && is_leap_year(year) {
        days + 1
    } else {
        days
    })
}

/// Remainder that is never negative, unlike `%`.
pub fn positive_modulo(i: i64, n: i64) -> i64 {
    (i % n + n) % n
}

/// Day of week via Zeller's congruence.
pub fn weekday(year: i64, month: i64, day: i64) -> i64 {
    // January and February count as months 13 and 14 of the previous year.
    let (m, y) = if month < 3 {
        (month + 12, year - 1)
    } else {
        (month, year)
    };
    let k = positive_modulo(y, 100);
    let j = (y - k) / 100;
    // Zeller yields 0 = Saturday.
    let h = positive_modulo(day + (13 * (m + 1)) / 5 + k + k / 4 + j.div_euclid(4) + 5 * j, 7);
    positive_modulo(h + 5, 7)
}

/// 1-based ordinal day within the year.
pub fn day_of_year(year: i64, month: i64, day: i64) -> i64 {
    let before: i64 = (1..month)
        .map(|m| days_in_month(year, m).unwrap_or(0))
        .sum();
    before + day
}

/// Number of ISO weeks (52 or 53) in `year`.
pub fn iso_weeks_in_year(year: i64) -> i64 {
    long_year(year, weekday(year, 1, 1))
}

fn long_year(year: i64, jan1: i64) -> i64 {
    if jan1 == THURSDAY || (jan1 == WEDNESDAY && is_leap_year(year)) {
        53
    } else {
        52
    }
}

/// ISO 8601 week number of a date.
///
/// Days before the year's first week belong to the last week of the
/// previous year; trailing days of a 52-week year belong to week 1.
pub fn week_of_year(year: i64, month: i64, day: i64) -> i64 {
    let ordinal = day_of_year(year, month, day);
    let wd = weekday(year, month, day);
    let week = (ordinal - wd + 9) / 7;
    if week < 1 {
        return iso_weeks_in_year(year - 1);
    }
    if week == 53 {
        let jan1 = positive_modulo(wd - (ordinal - 1), 7);
        if long_year(year, jan1) == 52 {
            return 1;
        }
    }
    week
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(2023, 12), Some(31));
        assert_eq!(days_in_month(2023, 0), None);
        assert_eq!(days_in_month(2023, 13), None);
    }

    #[test]
    fn test_positive_modulo() {
        assert_eq!(positive_modulo(-1, 7), 6);
        assert_eq!(positive_modulo(-14, 7), 0);
        assert_eq!(positive_modulo(15, 7), 1);
        assert_eq!(-1 % 7, -1);
    }

    #[test]
    fn test_weekday_known_dates() {
        assert_eq!(weekday(2024, 1, 1), 0); // Monday
        assert_eq!(weekday(2000, 2, 29), 1); // Tuesday
        assert_eq!(weekday(1900, 1, 1), 0); // Monday
        assert_eq!(weekday(2023, 12, 31), 6); // Sunday
        assert_eq!(weekday(2021, 1, 1), 4); // Friday
    }

    #[test]
    fn test_day_of_year() {
        assert_eq!(day_of_year(2024, 1, 1), 1);
        assert_eq!(day_of_year(2024, 3, 1), 61);
        assert_eq!(day_of_year(2023, 3, 1), 60);
        assert_eq!(day_of_year(2024, 12, 31), 366);
    }

    #[test]
    fn test_week_of_year_boundaries() {
        assert_eq!(week_of_year(2024, 1, 1), 1);
        // 2021-01-01 falls in 2020-W53.
        assert_eq!(week_of_year(2021, 1, 1), 53);
        // 2024-12-31 falls in 2025-W01.
        assert_eq!(week_of_year(2024, 12, 31), 1);
        // 2026 has 53 ISO weeks.
        assert_eq!(week_of_year(2026, 12, 31), 53);
        assert_eq!(week_of_year(2023, 1, 1), 52);
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_from_name("Jan"), Some(1));
        assert_eq!(month_from_name("Dec"), Some(12));
        assert_eq!(month_from_name("jan"), None);
        assert_eq!(month_from_name("January"), None);
    }
}
