//! Victorian public holidays and COVID-19 lockdown periods
//!
//! Both flags are evaluated on AEST wall-clock time. Holidays are keyed by
//! calendar date; lockdowns are closed intervals bounded at 00:00 AEST.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, TimeZone, Weekday};
use data_spi::{aest, to_aest};

/// First year covered by [`Calendar::victoria`].
pub const FIRST_HOLIDAY_YEAR: i32 = 2021;
/// Last year covered by [`Calendar::victoria`].
pub const LAST_HOLIDAY_YEAR: i32 = 2099;

/// Stay-at-home orders in Melbourne, as (start, end) calendar dates.
pub const LOCKDOWN_PERIODS: [((i32, u32, u32), (i32, u32, u32)); 7] = [
    ((2020, 3, 31), (2020, 5, 31)),
    ((2020, 7, 1), (2020, 7, 8)),
    ((2020, 7, 9), (2020, 10, 27)),
    ((2021, 2, 13), (2021, 2, 17)),
    ((2021, 5, 28), (2021, 6, 10)),
    ((2021, 7, 16), (2021, 7, 27)),
    ((2021, 8, 5), (2021, 10, 21)),
];

/// The Friday before the AFL Grand Final is only a holiday once gazetted.
const GRAND_FINAL_FRIDAYS: [(i32, u32, u32); 5] = [
    (2021, 9, 24),
    (2022, 9, 23),
    (2023, 9, 29),
    (2024, 9, 27),
    (2025, 9, 26),
];

const NATIONAL_DAY_OF_MOURNING: (i32, u32, u32) = (2022, 9, 22);

/// Holiday and lockdown lookup.
#[derive(Debug, Clone)]
pub struct Calendar {
    holidays: BTreeMap<NaiveDate, String>,
    lockdowns: Vec<(DateTime<FixedOffset>, DateTime<FixedOffset>)>,
}

impl Calendar {
    /// Victorian holidays for 2021 through 2099 plus the Melbourne lockdowns.
    pub fn victoria() -> Self {
        Self::victoria_years(FIRST_HOLIDAY_YEAR..=LAST_HOLIDAY_YEAR)
    }

    /// Victorian holidays for a custom year range plus the Melbourne lockdowns.
    pub fn victoria_years(years: RangeInclusive<i32>) -> Self {
        let mut holidays = BTreeMap::new();
        for year in years.clone() {
            add_victorian_year(&mut holidays, year);
        }
        for (y, m, d) in GRAND_FINAL_FRIDAYS
            .iter()
            .chain(std::iter::once(&NATIONAL_DAY_OF_MOURNING))
        {
            if !years.contains(y) {
                continue;
            }
            let name = if (*y, *m, *d) == NATIONAL_DAY_OF_MOURNING {
                "National Day of Mourning"
            } else {
                "Friday before the AFL Grand Final"
            };
            if let Some(date) = NaiveDate::from_ymd_opt(*y, *m, *d) {
                holidays.entry(date).or_insert_with(|| name.to_string());
            }
        }

        let lockdowns = LOCKDOWN_PERIODS
            .iter()
            .filter_map(|&(start, end)| Some((midnight(start)?, midnight(end)?)))
            .collect();

        Self {
            holidays,
            lockdowns,
        }
    }

    /// Whether `date` is a public holiday (including observed days).
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains_key(&date)
    }

    /// Holiday name for `date`, if any.
    pub fn holiday_name(&self, date: NaiveDate) -> Option<&str> {
        self.holidays.get(&date).map(String::as_str)
    }

    /// Whether `timestamp` falls inside any lockdown, bounds inclusive.
    pub fn is_lockdown<Tz: TimeZone>(&self, timestamp: &DateTime<Tz>) -> bool {
        let ts = to_aest(timestamp);
        self.lockdowns
            .iter()
            .any(|(start, end)| *start <= ts && ts <= *end)
    }

    /// Number of holiday dates known to the calendar.
    pub fn holiday_count(&self) -> usize {
        self.holidays.len()
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::victoria()
    }
}

fn midnight((y, m, d): (i32, u32, u32)) -> Option<DateTime<FixedOffset>> {
    let naive = NaiveDate::from_ymd_opt(y, m, d)?.and_hms_opt(0, 0, 0)?;
    aest().from_local_datetime(&naive).single()
}

fn add_victorian_year(holidays: &mut BTreeMap<NaiveDate, String>, year: i32) {
    let mut add = |date: Option<NaiveDate>, name: &str| {
        if let Some(date) = date {
            holidays.entry(date).or_insert_with(|| name.to_string());
        }
    };

    // Weekend falls shift to the following Monday.
    for (month, day, name) in [(1, 1, "New Year's Day"), (1, 26, "Australia Day")] {
        let date = NaiveDate::from_ymd_opt(year, month, day);
        add(date, name);
        let shift = match date.map(|d| d.weekday()) {
            Some(Weekday::Sat) => 2,
            Some(Weekday::Sun) => 1,
            _ => 0,
        };
        if shift > 0 {
            add(
                date.map(|d| d + Duration::days(shift)),
                &format!("{} (observed)", name),
            );
        }
    }

    add(
        NaiveDate::from_weekday_of_month_opt(year, 3, Weekday::Mon, 2),
        "Labour Day",
    );

    if let Some(easter) = easter_sunday(year) {
        add(Some(easter - Duration::days(2)), "Good Friday");
        add(Some(easter - Duration::days(1)), "Easter Saturday");
        add(Some(easter), "Easter Sunday");
        add(Some(easter + Duration::days(1)), "Easter Monday");
    }

    // No substitute day when ANZAC Day falls on a weekend.
    add(NaiveDate::from_ymd_opt(year, 4, 25), "ANZAC Day");

    add(
        NaiveDate::from_weekday_of_month_opt(year, 6, Weekday::Mon, 2),
        "King's Birthday",
    );
    add(
        NaiveDate::from_weekday_of_month_opt(year, 11, Weekday::Tue, 1),
        "Melbourne Cup",
    );

    // Christmas and Boxing Day on a weekend both move two days on, which
    // keeps the observed pair on consecutive weekdays.
    for (day, name) in [(25, "Christmas Day"), (26, "Boxing Day")] {
        let date = NaiveDate::from_ymd_opt(year, 12, day);
        add(date, name);
        if matches!(date.map(|d| d.weekday()), Some(Weekday::Sat | Weekday::Sun)) {
            add(
                date.map(|d| d + Duration::days(2)),
                &format!("{} (observed)", name),
            );
        }
    }
}

/// Gregorian Easter Sunday (anonymous Gregorian computus).
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let n = h + l - 7 * m + 114;
    NaiveDate::from_ymd_opt(year, (n / 31) as u32, (n % 31 + 1) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
        aest().with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    // ==================== Easter Tests ====================

    #[test]
    fn test_easter_sunday_known_years() {
        assert_eq!(easter_sunday(2024), Some(date(2024, 3, 31)));
        assert_eq!(easter_sunday(2025), Some(date(2025, 4, 20)));
        assert_eq!(easter_sunday(2038), Some(date(2038, 4, 25)));
    }

    // ==================== Holiday Tests ====================

    #[test]
    fn test_fixed_holidays() {
        let cal = Calendar::victoria();
        assert!(cal.is_holiday(date(2025, 1, 1)));
        assert!(!cal.is_holiday(date(2025, 1, 2)));
        assert!(cal.is_holiday(date(2023, 4, 25)));
        assert_eq!(cal.holiday_name(date(2024, 12, 25)), Some("Christmas Day"));
    }

    #[test]
    fn test_easter_block() {
        let cal = Calendar::victoria();
        for day in [18, 19, 20, 21] {
            assert!(cal.is_holiday(date(2025, 4, day)), "2025-04-{}", day);
        }
        assert!(!cal.is_holiday(date(2025, 4, 17)));
        assert!(!cal.is_holiday(date(2025, 4, 22)));
    }

    #[test]
    fn test_rule_based_mondays_and_tuesday() {
        let cal = Calendar::victoria();
        assert_eq!(cal.holiday_name(date(2025, 3, 10)), Some("Labour Day"));
        assert_eq!(cal.holiday_name(date(2025, 6, 9)), Some("King's Birthday"));
        assert_eq!(cal.holiday_name(date(2024, 11, 5)), Some("Melbourne Cup"));
        assert!(!cal.is_holiday(date(2025, 3, 3)));
    }

    #[test]
    fn test_new_year_observed_on_monday() {
        let cal = Calendar::victoria();
        // 2022-01-01 was a Saturday
        assert!(cal.is_holiday(date(2022, 1, 1)));
        assert!(cal.is_holiday(date(2022, 1, 3)));
        // 2025-01-26 was a Sunday
        assert!(cal.is_holiday(date(2025, 1, 27)));
    }

    #[test]
    fn test_christmas_weekend_substitution() {
        let cal = Calendar::victoria();
        // Saturday Christmas 2021: Monday and Tuesday observed
        assert!(cal.is_holiday(date(2021, 12, 27)));
        assert!(cal.is_holiday(date(2021, 12, 28)));
        // Sunday Christmas 2022: Boxing Day Monday, Christmas observed Tuesday
        assert!(cal.is_holiday(date(2022, 12, 26)));
        assert!(cal.is_holiday(date(2022, 12, 27)));
        assert!(!cal.is_holiday(date(2022, 12, 28)));
    }

    #[test]
    fn test_anzac_day_not_substituted() {
        let cal = Calendar::victoria();
        // 2021-04-25 was a Sunday
        assert!(cal.is_holiday(date(2021, 4, 25)));
        assert!(!cal.is_holiday(date(2021, 4, 26)));
    }

    #[test]
    fn test_gazetted_one_off_days() {
        let cal = Calendar::victoria();
        assert!(cal.is_holiday(date(2024, 9, 27)));
        assert!(cal.is_holiday(date(2022, 9, 22)));
        assert!(!cal.is_holiday(date(2026, 9, 25)));
    }

    #[test]
    fn test_year_range_bounds() {
        let cal = Calendar::victoria();
        assert!(!cal.is_holiday(date(2020, 12, 25)));
        assert!(cal.is_holiday(date(2099, 12, 25)));
        assert!(!cal.is_holiday(date(2100, 1, 1)));

        let narrow = Calendar::victoria_years(2024..=2024);
        assert!(narrow.is_holiday(date(2024, 9, 27)));
        assert!(!narrow.is_holiday(date(2025, 9, 26)));
        assert!(narrow.holiday_count() < cal.holiday_count());
    }

    // ==================== Lockdown Tests ====================

    #[test]
    fn test_lockdown_inclusive_bounds() {
        let cal = Calendar::victoria();
        assert!(cal.is_lockdown(&at(2020, 3, 31, 0)));
        assert!(cal.is_lockdown(&at(2020, 4, 15, 12)));
        assert!(cal.is_lockdown(&at(2020, 5, 31, 0)));
        assert!(!cal.is_lockdown(&at(2020, 5, 31, 1)));
        assert!(!cal.is_lockdown(&at(2020, 3, 30, 23)));
    }

    #[test]
    fn test_lockdown_end_is_midnight() {
        let cal = Calendar::victoria();
        assert!(!cal.is_lockdown(&at(2021, 2, 17, 12)));
        assert!(cal.is_lockdown(&at(2021, 8, 20, 9)));
        assert!(!cal.is_lockdown(&at(2025, 4, 10, 9)));
    }

    #[test]
    fn test_lockdown_uses_aest_for_other_offsets() {
        let cal = Calendar::victoria();
        // 2020-03-30T14:00Z is 2020-03-31T00:00 AEST
        let utc = chrono::Utc.with_ymd_and_hms(2020, 3, 30, 14, 0, 0).unwrap();
        assert!(cal.is_lockdown(&utc));
        let before = chrono::Utc.with_ymd_and_hms(2020, 3, 30, 13, 0, 0).unwrap();
        assert!(!cal.is_lockdown(&before));
    }
}
