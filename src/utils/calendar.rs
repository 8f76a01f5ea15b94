use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};

use crate::models::period::{assert_valid_day, PERIOD_DAYS};

/// Calendar date of day 1 (1 Ramadhan 1446, 19 February 2025).
pub const ANCHOR_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2025, 2, 19) {
    Some(date) => date,
    None => panic!("invalid anchor date"),
};

/// Abbreviated month names, id-ID (index 0 = January).
const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

fn weekday_short(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Sen",
        Weekday::Tue => "Sel",
        Weekday::Wed => "Rab",
        Weekday::Thu => "Kam",
        Weekday::Fri => "Jum",
        Weekday::Sat => "Sab",
        Weekday::Sun => "Min",
    }
}

fn month_short(date: NaiveDate) -> &'static str {
    MONTHS_SHORT[date.month0() as usize]
}

/// Logical day (1..=30) that `today` falls on, counted from `anchor`.
///
/// Dates before the period map to day 1 and dates after it to day 30, so a
/// caller always gets a day it can highlight.
pub fn day_index_for_date(anchor: NaiveDate, today: NaiveDate) -> u8 {
    let elapsed = today.signed_duration_since(anchor).num_days();
    elapsed
        .saturating_add(1)
        .clamp(1, i64::from(PERIOD_DAYS)) as u8
}

pub fn current_day_index() -> u8 {
    day_index_for_date(ANCHOR_DATE, Local::now().date_naive())
}

pub fn date_for_day_index(anchor: NaiveDate, day: u8) -> NaiveDate {
    assert_valid_day(day);
    anchor + Duration::days(i64::from(day - 1))
}

/// Short id-ID label for a day of the period, e.g. "Rab, 19 Feb".
///
/// Panics if `day` is outside 1..=30.
pub fn date_label_for_day_index(anchor: NaiveDate, day: u8) -> String {
    let date = date_for_day_index(anchor, day);
    format!(
        "{}, {} {}",
        weekday_short(date.weekday()),
        date.day(),
        month_short(date)
    )
}

pub fn day_month_label(date: NaiveDate) -> String {
    format!("{} {}", date.day(), month_short(date))
}

/// Today's date as "19 Feb". Reads the clock on every call.
pub fn today_label() -> String {
    day_month_label(Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor_plus(days: i64) -> NaiveDate {
        ANCHOR_DATE + Duration::days(days)
    }

    #[test]
    fn anchor_is_day_one() {
        assert_eq!(day_index_for_date(ANCHOR_DATE, ANCHOR_DATE), 1);
    }

    #[test]
    fn counts_whole_days() {
        assert_eq!(day_index_for_date(ANCHOR_DATE, anchor_plus(1)), 2);
        assert_eq!(day_index_for_date(ANCHOR_DATE, anchor_plus(20)), 21);
        assert_eq!(day_index_for_date(ANCHOR_DATE, anchor_plus(29)), 30);
    }

    #[test]
    fn clamps_outside_period() {
        assert_eq!(day_index_for_date(ANCHOR_DATE, anchor_plus(-1)), 1);
        assert_eq!(day_index_for_date(ANCHOR_DATE, anchor_plus(-400)), 1);
        assert_eq!(day_index_for_date(ANCHOR_DATE, anchor_plus(30)), 30);
        assert_eq!(day_index_for_date(ANCHOR_DATE, anchor_plus(40)), 30);
    }

    #[test]
    fn current_day_is_in_range() {
        let day = current_day_index();
        assert!((1..=30).contains(&day));
    }

    #[test]
    fn labels_use_indonesian_abbreviations() {
        assert_eq!(date_label_for_day_index(ANCHOR_DATE, 1), "Rab, 19 Feb");
        assert_eq!(date_label_for_day_index(ANCHOR_DATE, 11), "Sab, 1 Mar");
        assert_eq!(date_label_for_day_index(ANCHOR_DATE, 30), "Kam, 20 Mar");
        // Pure: same input, same output.
        assert_eq!(
            date_label_for_day_index(ANCHOR_DATE, 11),
            date_label_for_day_index(ANCHOR_DATE, 11)
        );
    }

    #[test]
    fn day_month_label_formats() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 17).unwrap();
        assert_eq!(day_month_label(date), "17 Agu");
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        assert_eq!(day_month_label(date), "1 Mei");
    }

    #[test]
    #[should_panic]
    fn label_rejects_day_zero() {
        date_label_for_day_index(ANCHOR_DATE, 0);
    }

    #[test]
    #[should_panic]
    fn label_rejects_day_31() {
        date_label_for_day_index(ANCHOR_DATE, 31);
    }
}
