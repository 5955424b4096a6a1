//! Roster entries: per-employee KPI entitlements.
//!
//! The roster is owned by an external store. The engine only reads a
//! snapshot of it, so deserialization here is lenient about the loosely
//! typed values such stores tend to hold (numeric category codes, blank
//! schedule types, amounts as strings).

use rust_decimal::Decimal;
use serde::de::{Error as _, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use super::cell::parse_decimal_text;

/// The work-schedule regime an employee's KPI is computed under.
///
/// Blank or unrecognized labels fall back to [`ScheduleType::Day`].
///
/// # Example
///
/// ```
/// use kpi_engine::models::ScheduleType;
///
/// assert_eq!(ScheduleType::from_label(" Shift "), ScheduleType::Shift);
/// assert_eq!(ScheduleType::from_label(""), ScheduleType::Day);
/// assert_eq!(ScheduleType::from_label("rotating"), ScheduleType::Day);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleType {
    /// Regular weekday schedule, measured against the day norm.
    #[default]
    Day,
    /// Shift schedule (Saturdays are working days), measured against the shift norm.
    Shift,
}

impl ScheduleType {
    /// Parses a schedule label, case-insensitively, defaulting to `Day`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "shift" => ScheduleType::Shift,
            _ => ScheduleType::Day,
        }
    }
}

impl std::fmt::Display for ScheduleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleType::Day => write!(f, "day"),
            ScheduleType::Shift => write!(f, "shift"),
        }
    }
}

impl<'de> Deserialize<'de> for ScheduleType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.map(|l| Self::from_label(&l)).unwrap_or_default())
    }
}

/// The category code marking students, who are excluded from KPI.
pub const STUDENT_CATEGORY_CODE: &str = "4";

/// A single roster entry.
///
/// # Example
///
/// ```
/// use kpi_engine::models::{RosterEntry, ScheduleType};
///
/// let entry: RosterEntry = serde_json::from_str(
///     r#"{"id": 7, "name": "Иванов И.И.", "kpi_sum": 15000, "schedule_type": "",
///         "department": "ОРИТ", "category_code": 4}"#,
/// ).unwrap();
/// assert_eq!(entry.schedule_type, ScheduleType::Day);
/// assert_eq!(entry.category_code, "4");
/// assert!(entry.is_student());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Roster-assigned identifier.
    #[serde(default)]
    pub id: i64,
    /// Employee name, the join key against timesheet rows.
    #[serde(deserialize_with = "trimmed_string")]
    pub name: String,
    /// The full KPI entitlement amount; null or blank reads as zero.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub kpi_sum: Decimal,
    /// Work-schedule regime.
    #[serde(default)]
    pub schedule_type: ScheduleType,
    /// Department label, informational.
    #[serde(default, deserialize_with = "trimmed_string")]
    pub department: String,
    /// Staff category code; `"4"` marks a student.
    #[serde(default, deserialize_with = "trimmed_string")]
    pub category_code: String,
}

impl RosterEntry {
    /// Returns true if this entry is a student excluded from KPI.
    pub fn is_student(&self) -> bool {
        self.category_code.trim() == STUDENT_CATEGORY_CODE
    }
}

/// Accepts a string, number, or null and yields a trimmed string.
fn trimmed_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Text(s)) => s.trim().to_string(),
        Some(Loose::Int(n)) => n.to_string(),
        Some(Loose::Float(n)) if n.fract() == 0.0 => (n as i64).to_string(),
        Some(Loose::Float(n)) => n.to_string(),
        None => String::new(),
    })
}

/// Accepts a number, a numeric string with `.` or `,` as decimal
/// separator, or null. Null and blank text read as zero.
fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Option::<Loose>::deserialize(deserializer)? {
        None => Ok(Decimal::ZERO),
        Some(Loose::Int(n)) => Ok(Decimal::from(n)),
        Some(Loose::Float(n)) => Decimal::try_from(n)
            .map_err(|_| D::Error::custom(format!("kpi_sum {} is not a finite amount", n))),
        Some(Loose::Text(s)) if s.trim().is_empty() => Ok(Decimal::ZERO),
        Some(Loose::Text(s)) => parse_decimal_text(&s)
            .ok_or_else(|| D::Error::custom(format!("kpi_sum {:?} is not a number", s))),
    }
}

/// Deserializes a roster list, dropping entries that fail to parse.
///
/// A roster snapshot comes from an external store; one malformed row is
/// logged and skipped rather than rejecting the whole list.
///
/// # Example
///
/// ```
/// use kpi_engine::models::{lenient_roster, RosterEntry};
///
/// #[derive(serde::Deserialize)]
/// struct Snapshot {
///     #[serde(deserialize_with = "lenient_roster")]
///     roster: Vec<RosterEntry>,
/// }
///
/// let snapshot: Snapshot = serde_json::from_str(
///     r#"{"roster": [{"name": "Ким", "kpi_sum": "1000"}, {"kpi_sum": 5}, 42]}"#,
/// ).unwrap();
/// assert_eq!(snapshot.roster.len(), 1);
/// ```
pub fn lenient_roster<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<RosterEntry>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MaybeEntry {
        Valid(RosterEntry),
        Malformed(IgnoredAny),
    }

    let rows = Option::<Vec<MaybeEntry>>::deserialize(deserializer)?.unwrap_or_default();
    let total = rows.len();
    let roster: Vec<RosterEntry> = rows
        .into_iter()
        .filter_map(|row| match row {
            MaybeEntry::Valid(entry) => Some(entry),
            MaybeEntry::Malformed(_) => None,
        })
        .collect();

    if roster.len() < total {
        warn!(
            skipped = total - roster.len(),
            kept = roster.len(),
            "Skipped malformed roster entries"
        );
    }
    Ok(roster)
}

/// Like [`lenient_roster`], for an optional roster override.
pub fn lenient_optional_roster<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<RosterEntry>>, D::Error> {
    #[derive(Deserialize)]
    struct Lenient(#[serde(deserialize_with = "lenient_roster")] Vec<RosterEntry>);

    Ok(Option::<Lenient>::deserialize(deserializer)?.map(|roster| roster.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_type_from_label() {
        assert_eq!(ScheduleType::from_label("day"), ScheduleType::Day);
        assert_eq!(ScheduleType::from_label("DAY"), ScheduleType::Day);
        assert_eq!(ScheduleType::from_label("shift"), ScheduleType::Shift);
        assert_eq!(ScheduleType::from_label("SHIFT"), ScheduleType::Shift);
        assert_eq!(ScheduleType::from_label("   "), ScheduleType::Day);
        assert_eq!(ScheduleType::from_label("night"), ScheduleType::Day);
    }

    #[test]
    fn test_schedule_type_serialization() {
        assert_eq!(serde_json::to_string(&ScheduleType::Day).unwrap(), "\"day\"");
        assert_eq!(serde_json::to_string(&ScheduleType::Shift).unwrap(), "\"shift\"");
        let parsed: ScheduleType = serde_json::from_str("null").unwrap();
        assert_eq!(parsed, ScheduleType::Day);
    }

    #[test]
    fn test_schedule_type_display() {
        assert_eq!(format!("{}", ScheduleType::Day), "day");
        assert_eq!(format!("{}", ScheduleType::Shift), "shift");
    }

    #[test]
    fn test_deserialize_minimal_entry() {
        let entry: RosterEntry = serde_json::from_str(r#"{"name": "  Сидоров  "}"#).unwrap();
        assert_eq!(entry.name, "Сидоров");
        assert_eq!(entry.id, 0);
        assert_eq!(entry.kpi_sum, Decimal::ZERO);
        assert_eq!(entry.schedule_type, ScheduleType::Day);
        assert!(entry.department.is_empty());
        assert!(!entry.is_student());
    }

    #[test]
    fn test_deserialize_string_amount_and_shift() {
        let entry: RosterEntry = serde_json::from_str(
            r#"{"id": 3, "name": "Ким", "kpi_sum": "12500.50", "schedule_type": "Shift",
                "department": 12, "category_code": "2"}"#,
        )
        .unwrap();
        assert_eq!(entry.kpi_sum, Decimal::new(1250050, 2));
        assert_eq!(entry.schedule_type, ScheduleType::Shift);
        assert_eq!(entry.department, "12");
        assert_eq!(entry.category_code, "2");
    }

    #[test]
    fn test_student_detection_from_numeric_code() {
        let entry: RosterEntry =
            serde_json::from_str(r#"{"name": "Студент", "category_code": 4.0}"#).unwrap();
        assert_eq!(entry.category_code, "4");
        assert!(entry.is_student());
    }

    #[test]
    fn test_null_or_blank_amount_reads_as_zero() {
        for json in [
            r#"{"name": "Ким", "kpi_sum": null}"#,
            r#"{"name": "Ким", "kpi_sum": ""}"#,
            r#"{"name": "Ким", "kpi_sum": "   "}"#,
        ] {
            let entry: RosterEntry = serde_json::from_str(json).unwrap();
            assert_eq!(entry.kpi_sum, Decimal::ZERO, "input: {}", json);
        }
    }

    #[test]
    fn test_amount_accepts_comma_and_numbers() {
        let entry: RosterEntry =
            serde_json::from_str(r#"{"name": "Ким", "kpi_sum": "15000,5"}"#).unwrap();
        assert_eq!(entry.kpi_sum, Decimal::new(150005, 1));

        let entry: RosterEntry =
            serde_json::from_str(r#"{"name": "Ким", "kpi_sum": 12500.5}"#).unwrap();
        assert_eq!(entry.kpi_sum, Decimal::new(125005, 1));

        let entry: RosterEntry =
            serde_json::from_str(r#"{"name": "Ким", "kpi_sum": "15000"}"#).unwrap();
        assert_eq!(entry.kpi_sum, Decimal::from(15000));
    }

    #[test]
    fn test_non_numeric_amount_is_rejected() {
        let result: Result<RosterEntry, _> =
            serde_json::from_str(r#"{"name": "Ким", "kpi_sum": "много"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_lenient_roster_skips_malformed_rows() {
        #[derive(Deserialize)]
        struct Snapshot {
            #[serde(deserialize_with = "lenient_roster")]
            roster: Vec<RosterEntry>,
        }

        let snapshot: Snapshot = serde_json::from_str(
            r#"{"roster": [
                {"name": "Иванов", "kpi_sum": null},
                {"name": "Петров", "kpi_sum": "много"},
                {"kpi_sum": 100},
                {"name": "Ким", "kpi_sum": "1000,5"}
            ]}"#,
        )
        .unwrap();
        let names: Vec<_> = snapshot.roster.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Иванов", "Ким"]);
        assert_eq!(snapshot.roster[1].kpi_sum, Decimal::new(10005, 1));
    }

    #[test]
    fn test_lenient_optional_roster() {
        #[derive(Deserialize)]
        struct Request {
            #[serde(default, deserialize_with = "lenient_optional_roster")]
            roster: Option<Vec<RosterEntry>>,
        }

        let absent: Request = serde_json::from_str("{}").unwrap();
        assert!(absent.roster.is_none());

        let null: Request = serde_json::from_str(r#"{"roster": null}"#).unwrap();
        assert!(null.roster.is_none());

        let present: Request =
            serde_json::from_str(r#"{"roster": [{"name": "Ким"}, "broken"]}"#).unwrap();
        assert_eq!(present.roster.map(|r| r.len()), Some(1));
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let yaml = "- id: 1\n  name: Иванов\n  kpi_sum: 15000\n  schedule_type: day\n  category_code: 1\n";
        let entries: Vec<RosterEntry> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kpi_sum, Decimal::from(15000));
        assert_eq!(entries[0].category_code, "1");
    }
}
