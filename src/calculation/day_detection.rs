//! Day detection for timesheet columns.
//!
//! This module classifies each day of a month as a weekday, Saturday, Sunday,
//! or declared holiday. A declared holiday always wins over the calendar
//! weekday, and day numbers that do not exist in the month (trailing columns
//! such as the 31st of April) read as ordinary weekdays.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::{HolidayInput, Period};

/// Represents the kind of day a timesheet column falls on.
///
/// # Example
///
/// ```
/// use kpi_engine::calculation::DayType;
///
/// let day_type = DayType::Saturday;
/// assert_eq!(format!("{:?}", day_type), "Saturday");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// Monday through Friday.
    Weekday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
    /// A declared holiday, whatever its weekday.
    Holiday,
}

impl DayType {
    /// Returns true for days that are not ordinary working weekdays.
    pub fn is_day_off(&self) -> bool {
        !matches!(self, DayType::Weekday)
    }
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayType::Weekday => write!(f, "Weekday"),
            DayType::Saturday => write!(f, "Saturday"),
            DayType::Sunday => write!(f, "Sunday"),
            DayType::Holiday => write!(f, "Holiday"),
        }
    }
}

/// The declared holidays of one month, as day numbers in `1..=31`.
///
/// # Example
///
/// ```
/// use kpi_engine::calculation::HolidaySet;
/// use kpi_engine::models::{HolidayInput, Period};
///
/// let inputs = vec![
///     HolidayInput::from("2025-12-16"),
///     HolidayInput::from("2024-12-17"),
///     HolidayInput::from(25),
/// ];
/// let holidays = HolidaySet::from_inputs(Period::new(2025, 12), &inputs);
/// assert!(holidays.contains(16));
/// assert!(!holidays.contains(17)); // different year
/// assert!(holidays.contains(25));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidaySet {
    days: BTreeSet<u32>,
}

impl HolidaySet {
    /// Creates a holiday set from day numbers, dropping any outside `1..=31`.
    pub fn from_days(days: impl IntoIterator<Item = u32>) -> Self {
        Self {
            days: days.into_iter().filter(|d| (1..=31).contains(d)).collect(),
        }
    }

    /// Normalizes caller-supplied holidays for one month.
    ///
    /// ISO date strings are kept only when they fall in `period`; bare day
    /// numbers, as integers or digit strings, are kept when in `1..=31`.
    /// Anything else is ignored.
    pub fn from_inputs(period: Period, inputs: &[HolidayInput]) -> Self {
        let days = inputs.iter().filter_map(|input| match input {
            HolidayInput::Day(day) => u32::try_from(*day).ok(),
            HolidayInput::Text(text) => holiday_day_from_text(period, text),
        });
        Self::from_days(days)
    }

    /// Returns true if the day number is a declared holiday.
    pub fn contains(&self, day: u32) -> bool {
        self.days.contains(&day)
    }

    /// Returns the number of declared holidays.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Returns true if no holidays are declared.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Iterates over the holiday day numbers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.days.iter().copied()
    }
}

fn holiday_day_from_text(period: Period, text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if text.len() >= 8 && text.contains('-') {
        let date_part = text.split('T').next().unwrap_or(text);
        let parts: Vec<&str> = date_part.split('-').collect();
        if parts.len() == 3 && parts.iter().all(|p| is_digits(p)) {
            let date = NaiveDate::from_ymd_opt(
                parts[0].parse().ok()?,
                parts[1].parse().ok()?,
                parts[2].parse().ok()?,
            )?;
            return period.contains_date(date).then_some(date.day());
        }
    }

    if is_digits(text) {
        return text.parse().ok();
    }
    None
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Splits a free-text holiday field into inputs.
///
/// Accepts a JSON array (`["2025-12-16", 17]`) or a list separated by
/// commas or semicolons (`"16, 17; 2025-12-18"`). Digit-only items become
/// [`HolidayInput::Day`].
///
/// # Example
///
/// ```
/// use kpi_engine::calculation::parse_holiday_field;
/// use kpi_engine::models::HolidayInput;
///
/// let inputs = parse_holiday_field("16;17");
/// assert_eq!(inputs, vec![HolidayInput::Day(16), HolidayInput::Day(17)]);
/// ```
pub fn parse_holiday_field(raw: &str) -> Vec<HolidayInput> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    if raw.starts_with('[') {
        if let Ok(inputs) = serde_json::from_str::<Vec<HolidayInput>>(raw) {
            return inputs;
        }
    }

    raw.replace(';', ",")
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| match part.parse::<i64>() {
            Ok(day) if is_digits(part) => HolidayInput::Day(day),
            _ => HolidayInput::Text(part.to_string()),
        })
        .collect()
}

/// Determines the day type for a day number of the given month.
///
/// Holidays take precedence over the calendar weekday. A day number that is
/// not a valid date in the month falls back to [`DayType::Weekday`].
///
/// # Example
///
/// ```
/// use kpi_engine::calculation::{classify_day, DayType, HolidaySet};
/// use kpi_engine::models::Period;
///
/// let period = Period::new(2026, 1);
/// let holidays = HolidaySet::from_days([17]);
///
/// // 2026-01-17 is a Saturday, but it is declared a holiday
/// assert_eq!(classify_day(period, 17, &holidays), DayType::Holiday);
/// // 2026-01-18 is a Sunday
/// assert_eq!(classify_day(period, 18, &holidays), DayType::Sunday);
/// // 2026-01-12 is a Monday
/// assert_eq!(classify_day(period, 12, &holidays), DayType::Weekday);
/// ```
pub fn classify_day(period: Period, day: u32, holidays: &HolidaySet) -> DayType {
    if holidays.contains(day) {
        return DayType::Holiday;
    }
    match period.date(day) {
        Some(date) => get_day_type(date),
        None => DayType::Weekday,
    }
}

/// Determines the calendar day type of a date, ignoring holidays.
pub fn get_day_type(date: NaiveDate) -> DayType {
    match date.weekday() {
        Weekday::Sat => DayType::Saturday,
        Weekday::Sun => DayType::Sunday,
        _ => DayType::Weekday,
    }
}

/// One day of a month calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    /// The date.
    pub date: NaiveDate,
    /// The day of the month.
    pub day: u32,
    /// The day classification.
    pub day_type: DayType,
    /// Weekday index, 0 = Monday through 6 = Sunday.
    pub weekday: u32,
    /// True for Saturdays, Sundays and holidays.
    pub is_day_off: bool,
}

/// Lists every day of a month with its classification.
///
/// Returns an empty list for an invalid period.
pub fn month_calendar(period: Period, holidays: &HolidaySet) -> Vec<CalendarDay> {
    (1..=period.days_in_month())
        .filter_map(|day| {
            let date = period.date(day)?;
            let day_type = classify_day(period, day, holidays);
            Some(CalendarDay {
                date,
                day,
                day_type,
                weekday: date.weekday().num_days_from_monday(),
                is_day_off: day_type.is_day_off(),
            })
        })
        .collect()
}

/// Counts the ordinary working weekdays of a month.
///
/// This is the natural day norm for a day-schedule employee.
///
/// # Example
///
/// ```
/// use kpi_engine::calculation::{working_days_in_month, HolidaySet};
/// use kpi_engine::models::Period;
///
/// // December 2025 has 23 weekdays; the 16th (Tuesday) is a holiday
/// let holidays = HolidaySet::from_days([16]);
/// assert_eq!(working_days_in_month(Period::new(2025, 12), &holidays), 22);
/// ```
pub fn working_days_in_month(period: Period, holidays: &HolidaySet) -> u32 {
    month_calendar(period, holidays)
        .iter()
        .filter(|d| d.day_type == DayType::Weekday)
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan_2026() -> Period {
        Period::new(2026, 1)
    }

    // ==========================================================================
    // Calendar weekday classification
    // ==========================================================================
    #[test]
    fn test_monday_is_weekday() {
        // 2026-01-12 is a Monday
        assert_eq!(classify_day(jan_2026(), 12, &HolidaySet::default()), DayType::Weekday);
    }

    #[test]
    fn test_friday_is_weekday() {
        // 2026-01-16 is a Friday
        assert_eq!(classify_day(jan_2026(), 16, &HolidaySet::default()), DayType::Weekday);
    }

    #[test]
    fn test_saturday_is_saturday() {
        assert_eq!(classify_day(jan_2026(), 17, &HolidaySet::default()), DayType::Saturday);
    }

    #[test]
    fn test_sunday_is_sunday() {
        assert_eq!(classify_day(jan_2026(), 18, &HolidaySet::default()), DayType::Sunday);
    }

    // ==========================================================================
    // Holiday precedence
    // ==========================================================================
    #[test]
    fn test_holiday_on_weekday_is_holiday() {
        let holidays = HolidaySet::from_days([14]);
        assert_eq!(classify_day(jan_2026(), 14, &holidays), DayType::Holiday);
    }

    #[test]
    fn test_holiday_on_saturday_is_holiday() {
        let holidays = HolidaySet::from_days([17]);
        assert_eq!(classify_day(jan_2026(), 17, &holidays), DayType::Holiday);
    }

    #[test]
    fn test_holiday_on_sunday_is_holiday() {
        let holidays = HolidaySet::from_days([18]);
        assert_eq!(classify_day(jan_2026(), 18, &holidays), DayType::Holiday);
    }

    // ==========================================================================
    // Invalid dates
    // ==========================================================================
    #[test]
    fn test_day_31_in_30_day_month_falls_back_to_weekday() {
        assert_eq!(
            classify_day(Period::new(2025, 4), 31, &HolidaySet::default()),
            DayType::Weekday
        );
    }

    #[test]
    fn test_february_29_in_common_year_falls_back_to_weekday() {
        assert_eq!(
            classify_day(Period::new(2025, 2), 29, &HolidaySet::default()),
            DayType::Weekday
        );
    }

    #[test]
    fn test_ghost_day_declared_holiday_is_holiday() {
        let holidays = HolidaySet::from_days([31]);
        assert_eq!(classify_day(Period::new(2025, 4), 31, &holidays), DayType::Holiday);
    }

    // ==========================================================================
    // Holiday normalization
    // ==========================================================================
    #[test]
    fn test_from_inputs_filters_iso_dates_by_period() {
        let inputs = vec![
            HolidayInput::from("2025-12-16"),
            HolidayInput::from("2025-11-16"),
            HolidayInput::from("2025-12-17T00:00:00"),
        ];
        let holidays = HolidaySet::from_inputs(Period::new(2025, 12), &inputs);
        assert_eq!(holidays.iter().collect::<Vec<_>>(), vec![16, 17]);
    }

    #[test]
    fn test_from_inputs_accepts_bare_days() {
        let inputs = vec![
            HolidayInput::Day(1),
            HolidayInput::from(" 2 "),
            HolidayInput::Day(0),
            HolidayInput::Day(32),
            HolidayInput::Day(-3),
            HolidayInput::from("abc"),
            HolidayInput::from(""),
        ];
        let holidays = HolidaySet::from_inputs(Period::new(2025, 12), &inputs);
        assert_eq!(holidays.iter().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_from_inputs_ignores_malformed_iso() {
        let inputs = vec![
            HolidayInput::from("2025-xx-16"),
            HolidayInput::from("16-12-2025x"),
            HolidayInput::from("2025-12-32"),
        ];
        let holidays = HolidaySet::from_inputs(Period::new(2025, 12), &inputs);
        assert!(holidays.is_empty());
    }

    #[test]
    fn test_parse_holiday_field_json() {
        let inputs = parse_holiday_field(r#"["2025-12-16", 17]"#);
        assert_eq!(
            inputs,
            vec![HolidayInput::from("2025-12-16"), HolidayInput::Day(17)]
        );
    }

    #[test]
    fn test_parse_holiday_field_csv() {
        let inputs = parse_holiday_field(" 16, 17 ;2025-12-18,, ");
        assert_eq!(
            inputs,
            vec![
                HolidayInput::Day(16),
                HolidayInput::Day(17),
                HolidayInput::from("2025-12-18"),
            ]
        );
    }

    #[test]
    fn test_parse_holiday_field_broken_json_falls_back_to_csv() {
        let inputs = parse_holiday_field("[16, 17");
        assert_eq!(
            inputs,
            vec![HolidayInput::from("[16"), HolidayInput::Day(17)]
        );
    }

    #[test]
    fn test_parse_holiday_field_empty() {
        assert!(parse_holiday_field("   ").is_empty());
    }

    // ==========================================================================
    // Month calendar
    // ==========================================================================
    #[test]
    fn test_month_calendar_covers_every_day() {
        let calendar = month_calendar(Period::new(2024, 2), &HolidaySet::default());
        assert_eq!(calendar.len(), 29);
        assert_eq!(calendar[0].day, 1);
        // 2024-02-01 is a Thursday
        assert_eq!(calendar[0].weekday, 3);
        assert!(!calendar[0].is_day_off);
        // 2024-02-03 is a Saturday
        assert_eq!(calendar[2].day_type, DayType::Saturday);
        assert!(calendar[2].is_day_off);
    }

    #[test]
    fn test_month_calendar_invalid_period_is_empty() {
        assert!(month_calendar(Period::new(2025, 13), &HolidaySet::default()).is_empty());
    }

    #[test]
    fn test_working_days_in_month() {
        // January 2026: 22 weekdays
        assert_eq!(working_days_in_month(jan_2026(), &HolidaySet::default()), 22);
        // Declaring a Saturday a holiday does not change the count
        assert_eq!(working_days_in_month(jan_2026(), &HolidaySet::from_days([17])), 22);
        // Declaring a weekday a holiday removes it
        assert_eq!(working_days_in_month(jan_2026(), &HolidaySet::from_days([1, 2])), 20);
    }

    #[test]
    fn test_day_type_display() {
        assert_eq!(format!("{}", DayType::Weekday), "Weekday");
        assert_eq!(format!("{}", DayType::Holiday), "Holiday");
    }

    #[test]
    fn test_day_type_serialization() {
        let json = serde_json::to_string(&DayType::Holiday).unwrap();
        assert_eq!(json, "\"holiday\"");

        let deserialized: DayType = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, DayType::Holiday);
    }
}
