/// Number of logical days in the tracking period.
pub const PERIOD_DAYS: u8 = 30;

/// First day of the last-ten-days stretch, where the decree-night task opens up.
pub const LAST_TEN_START: u8 = 21;

pub fn is_valid_day(day: u8) -> bool {
    (1..=PERIOD_DAYS).contains(&day)
}

/// Panics on a day index outside 1..=30. Callers own that precondition.
pub fn assert_valid_day(day: u8) {
    assert!(
        is_valid_day(day),
        "day index {} outside 1..={}",
        day,
        PERIOD_DAYS
    );
}

pub fn all_days() -> impl Iterator<Item = u8> {
    1..=PERIOD_DAYS
}

pub fn is_last_ten(day: u8) -> bool {
    day >= LAST_TEN_START
}
