//! Week arithmetic for the agenda.
//!
//! Weeks always start on Monday at 00:00 local time. Nothing here reads the
//! clock: callers pass "today" in, which keeps every function pure.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use std::ops::RangeInclusive;

/// First visible hour of the timeline
pub const DEFAULT_FIRST_HOUR: u32 = 8;
/// Last visible hour of the timeline (inclusive)
pub const DEFAULT_LAST_HOUR: u32 = 21;

/// The Monday on or before `date`
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    // (weekday + 6) % 7 with Sunday = 0 is exactly "days since Monday"
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Midnight at the start of `date`
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Move a week start by `weeks` (negative goes back)
pub fn shift_weeks(week_start: NaiveDate, weeks: i64) -> NaiveDate {
    let days = Days::new(weeks.unsigned_abs() * 7);
    let shifted = if weeks >= 0 {
        week_start.checked_add_days(days)
    } else {
        week_start.checked_sub_days(days)
    };
    shifted.unwrap_or(week_start)
}

/// One column header of the weekly calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekDay {
    pub date: NaiveDate,
    pub day_name: &'static str,
    pub day_number: u32,
    pub is_today: bool,
    pub is_current_month: bool,
}

/// The seven consecutive days starting at `start`
pub fn week_days(start: NaiveDate, today: NaiveDate) -> [WeekDay; 7] {
    std::array::from_fn(|offset| {
        let date = start
            .checked_add_days(Days::new(offset as u64))
            .unwrap_or(start);
        WeekDay {
            date,
            day_name: short_day_name(date.weekday()),
            day_number: date.day(),
            is_today: date == today,
            is_current_month: date.month() == today.month() && date.year() == today.year(),
        }
    })
}

/// English three-letter day name
pub fn short_day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// English three-letter month name
pub fn short_month_name(month: u32) -> &'static str {
    match month {
        1 => "Jan", 2 => "Feb", 3 => "Mar", 4 => "Apr",
        5 => "May", 6 => "Jun", 7 => "Jul", 8 => "Aug",
        9 => "Sep", 10 => "Oct", 11 => "Nov", 12 => "Dec",
        _ => "Invalid",
    }
}

/// Visible hours of the timeline.
///
/// `Copy` and restartable: every `into_iter` yields the full range again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourRange {
    first: u32,
    last: u32,
}

impl HourRange {
    /// Hours `first..=last`; arguments are clamped to 0..=23 and swapped if reversed
    pub fn new(first: u32, last: u32) -> Self {
        let first = first.min(23);
        let last = last.min(23);
        if first <= last {
            Self { first, last }
        } else {
            Self { first: last, last: first }
        }
    }

    pub fn first(&self) -> u32 {
        self.first
    }

    pub fn last(&self) -> u32 {
        self.last
    }

    pub fn contains(&self, hour: u32) -> bool {
        (self.first..=self.last).contains(&hour)
    }

    pub fn len(&self) -> usize {
        (self.last - self.first + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> RangeInclusive<u32> {
        self.first..=self.last
    }
}

impl Default for HourRange {
    fn default() -> Self {
        Self::new(DEFAULT_FIRST_HOUR, DEFAULT_LAST_HOUR)
    }
}

impl IntoIterator for HourRange {
    type Item = u32;
    type IntoIter = RangeInclusive<u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Half-open `[start, end)` window sent to the range endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    /// Monday 00:00 up to the following Monday 00:00
    pub fn for_week(week_start: NaiveDate) -> Self {
        Self {
            start: start_of_day(week_start),
            end: start_of_day(shift_weeks(week_start, 1)),
        }
    }

    pub fn contains(&self, instant: &NaiveDateTime) -> bool {
        *instant >= self.start && *instant < self.end
    }
}

/// Header text such as `Jun 3 - Jun 9, 2024`
pub fn format_week_range(week_start: NaiveDate) -> String {
    let week_end = week_start
        .checked_add_days(Days::new(6))
        .unwrap_or(week_start);
    format!(
        "{} {} - {} {}, {}",
        short_month_name(week_start.month()),
        week_start.day(),
        short_month_name(week_end.month()),
        week_end.day(),
        week_end.year()
    )
}

/// Slot label such as `8:00`
pub fn hour_label(hour: u32) -> String {
    format!("{}:00", hour)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monday_of_every_weekday() {
        // 2024-06-03 is a Monday
        for offset in 0..7u64 {
            let day = date(2024, 6, 3).checked_add_days(Days::new(offset)).unwrap();
            assert_eq!(monday_of(day), date(2024, 6, 3), "offset {}", offset);
        }
        // Sunday belongs to the week that started six days earlier
        assert_eq!(monday_of(date(2024, 6, 2)), date(2024, 5, 27));
    }

    #[test]
    fn test_monday_of_is_monday_and_at_most_six_days_back() {
        let mut day = date(2023, 12, 20);
        for _ in 0..400 {
            let monday = monday_of(day);
            assert_eq!(monday.weekday(), Weekday::Mon);
            assert!(monday <= day);
            assert!((day - monday).num_days() <= 6);
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_monday_of_crosses_month_and_year() {
        assert_eq!(monday_of(date(2025, 1, 1)), date(2024, 12, 30));
        assert_eq!(monday_of(date(2024, 3, 2)), date(2024, 2, 26));
    }

    #[test]
    fn test_week_days_are_seven_consecutive_dates() {
        let today = date(2024, 6, 5);
        let days = week_days(date(2024, 6, 3), today);

        assert_eq!(days.len(), 7);
        for pair in days.windows(2) {
            assert_eq!(pair[0].date.succ_opt().unwrap(), pair[1].date);
        }
        assert_eq!(days[0].day_name, "Mon");
        assert_eq!(days[6].day_name, "Sun");
        assert_eq!(days[2].day_number, 5);

        let todays: Vec<_> = days.iter().filter(|d| d.is_today).collect();
        assert_eq!(todays.len(), 1);
        assert_eq!(todays[0].date, today);
    }

    #[test]
    fn test_week_days_flag_current_month() {
        let days = week_days(date(2024, 5, 27), date(2024, 6, 1));
        assert!(!days[0].is_current_month); // May 27
        assert!(days[5].is_current_month); // Jun 1
        assert!(days.iter().all(|d| d.date != date(2024, 6, 3)));
        assert!(!days.iter().any(|d| d.is_today && d.date.month() == 5));
    }

    #[test]
    fn test_hour_range_is_restartable() {
        let hours = HourRange::default();
        let first: Vec<u32> = hours.into_iter().collect();
        let second: Vec<u32> = hours.into_iter().collect();
        assert_eq!(first, (8..=21).collect::<Vec<_>>());
        assert_eq!(first, second);
        assert_eq!(hours.len(), 14);
        assert!(hours.contains(21));
        assert!(!hours.contains(22));
        assert!(!hours.contains(7));
    }

    #[test]
    fn test_hour_range_normalizes_arguments() {
        assert_eq!(HourRange::new(20, 9), HourRange::new(9, 20));
        assert_eq!(HourRange::new(5, 40).last(), 23);
    }

    #[test]
    fn test_week_navigation() {
        let start = date(2024, 6, 3);
        assert_eq!(shift_weeks(start, 1), date(2024, 6, 10));
        assert_eq!(shift_weeks(start, -1), date(2024, 5, 27));
        assert_eq!(shift_weeks(start, 0), start);
    }

    #[test]
    fn test_date_range_for_week() {
        let range = DateRange::for_week(date(2024, 6, 3));
        assert_eq!(range.start, start_of_day(date(2024, 6, 3)));
        assert_eq!(range.end, start_of_day(date(2024, 6, 10)));
        assert!(range.contains(&date(2024, 6, 9).and_hms_opt(23, 59, 0).unwrap()));
        assert!(!range.contains(&range.end));
    }

    #[test]
    fn test_format_week_range() {
        assert_eq!(format_week_range(date(2024, 6, 3)), "Jun 3 - Jun 9, 2024");
        assert_eq!(format_week_range(date(2024, 12, 30)), "Dec 30 - Jan 5, 2025");
        assert_eq!(hour_label(8), "8:00");
    }
}
