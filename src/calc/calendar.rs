use serde::{Deserialize, Serialize};

/// Weekday occupying column 0 of the month grid.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl WeekStart {
    /// Zero-based index with Sunday = 0.
    pub fn index(self) -> u32 {
        match self {
            WeekStart::Sunday => 0,
            WeekStart::Monday => 1,
            WeekStart::Tuesday => 2,
            WeekStart::Wednesday => 3,
            WeekStart::Thursday => 4,
            WeekStart::Friday => 5,
            WeekStart::Saturday => 6,
        }
    }
}

pub(crate) fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Gregorian month length. Callers guarantee `month` is in 1..=12.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Days since 1970-01-01 in the proleptic Gregorian calendar.
///
/// Works on 400-year eras so that negative years need no special casing.
pub fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let y = year as i64 - if month <= 2 { 1 } else { 0 };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let m = month as i64;
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Weekday of a date with Sunday = 0. 1970-01-01 was a Thursday.
pub fn weekday_index(year: i32, month: u32, day: u32) -> u32 {
    (days_from_civil(year, month, day) + 4).rem_euclid(7) as u32
}

/// Offset of day 1 of the month from the week-start column.
pub fn first_weekday_index(year: i32, month: u32, week_start: WeekStart) -> u32 {
    (weekday_index(year, month, 1) + 7 - week_start.index()) % 7
}

/// Rotates Sunday-first labels so that `week_start` comes first.
pub fn header_labels<T: Clone>(sunday_first: &[T; 7], week_start: WeekStart) -> [T; 7] {
    let offset = week_start.index() as usize;
    std::array::from_fn(|i| sunday_first[(i + offset) % 7].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2025));
        assert!(is_leap_year(-4));
    }

    #[test]
    fn test_days_in_month_february() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2100, 2), 28);
        assert_eq!(days_in_month(2400, 2), 29);
    }

    #[test]
    fn test_days_in_month_long_and_short() {
        assert_eq!(days_in_month(2025, 1), 31);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    #[test]
    fn test_february_rule_over_four_centuries() {
        for year in 1600..2000 {
            let expected = if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) {
                29
            } else {
                28
            };
            assert_eq!(days_in_month(year, 2), expected, "year {year}");
        }
    }

    #[test]
    fn test_days_from_civil_epoch() {
        assert_eq!(days_from_civil(1970, 1, 1), 0);
        assert_eq!(days_from_civil(1969, 12, 31), -1);
        assert_eq!(days_from_civil(2000, 3, 1), 11_017);
    }

    #[test]
    fn test_weekday_index_known_dates() {
        // 2025-07-01 is a Tuesday
        assert_eq!(weekday_index(2025, 7, 1), 2);
        // 2000-01-01 is a Saturday
        assert_eq!(weekday_index(2000, 1, 1), 6);
        // 1970-01-04 is a Sunday
        assert_eq!(weekday_index(1970, 1, 4), 0);
    }

    #[test]
    fn test_weekday_index_matches_chrono() {
        let mut date = NaiveDate::from_ymd_opt(1899, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2101, 1, 1).unwrap();
        while date < end {
            assert_eq!(
                weekday_index(date.year(), date.month(), date.day()),
                date.weekday().num_days_from_sunday(),
                "{date}"
            );
            date = date + chrono::Duration::days(13);
        }
    }

    #[test]
    fn test_first_weekday_index_shifts_with_week_start() {
        assert_eq!(first_weekday_index(2025, 7, WeekStart::Sunday), 2);
        assert_eq!(first_weekday_index(2025, 7, WeekStart::Monday), 1);
        assert_eq!(first_weekday_index(2025, 7, WeekStart::Tuesday), 0);
        assert_eq!(first_weekday_index(2025, 7, WeekStart::Wednesday), 6);
    }

    #[test]
    fn test_header_labels_rotation() {
        let labels = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
        assert_eq!(header_labels(&labels, WeekStart::Sunday), labels);
        assert_eq!(
            header_labels(&labels, WeekStart::Monday),
            ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]
        );
        assert_eq!(
            header_labels(&labels, WeekStart::Saturday),
            ["Sa", "Su", "Mo", "Tu", "We", "Th", "Fr"]
        );
    }

    #[test]
    fn test_week_start_serde_lowercase() {
        let yaml = serde_norway::to_string(&WeekStart::Monday).unwrap();
        assert_eq!(yaml.trim(), "monday");
        let parsed: WeekStart = serde_norway::from_str("saturday").unwrap();
        assert_eq!(parsed, WeekStart::Saturday);
    }

    #[test]
    fn test_month_name_known_values() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(7), "July");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(13), "Unknown");
    }
}
