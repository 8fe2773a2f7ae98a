//! Record format validation
//!
//! Each field is checked against a fixed, fully anchored pattern. The
//! patterns are kept exactly as the output format was first defined, even
//! where they disagree with the generator ranges:
//!
//! - the age pattern accepts 10–99 while the generator draws 18–99
//! - the oxygen saturation pattern accepts two digits only, so the
//!   generator's upper bound of `100%` is always rejected

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::record::Record;

static ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ID-\d{3}$").expect("Invalid id regex"));

static AGE_GROUP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9] Anos$").expect("Invalid age group regex"));

static HEART_RATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}ppm$").expect("Invalid heart rate regex"));

static OXYGEN_SATURATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}%$").expect("Invalid oxygen saturation regex"));

/// Record field, in serialization order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    AgeGroup,
    HeartRate,
    OxygenSaturation,
}

impl Field {
    /// All fields in serialization order
    pub const ALL: [Field; 4] = [
        Field::Id,
        Field::AgeGroup,
        Field::HeartRate,
        Field::OxygenSaturation,
    ];

    /// Serialized key name
    pub fn key(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::AgeGroup => "fr",
            Field::HeartRate => "fc",
            Field::OxygenSaturation => "spo2",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Field::Id => &*ID_REGEX,
            Field::AgeGroup => &*AGE_GROUP_REGEX,
            Field::HeartRate => &*HEART_RATE_REGEX,
            Field::OxygenSaturation => &*OXYGEN_SATURATION_REGEX,
        }
    }

    /// Check a raw value against this field's pattern
    pub fn accepts(self, value: &str) -> bool {
        self.pattern().is_match(value)
    }

    fn value_of(self, record: &Record) -> &str {
        match self {
            Field::Id => &record.id,
            Field::AgeGroup => &record.age_group,
            Field::HeartRate => &record.heart_rate,
            Field::OxygenSaturation => &record.oxygen_saturation,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

pub fn validate_id(value: &str) -> bool {
    Field::Id.accepts(value)
}

pub fn validate_age_group(value: &str) -> bool {
    Field::AgeGroup.accepts(value)
}

pub fn validate_heart_rate(value: &str) -> bool {
    Field::HeartRate.accepts(value)
}

pub fn validate_oxygen_saturation(value: &str) -> bool {
    Field::OxygenSaturation.accepts(value)
}

/// True iff all four fields match their patterns
pub fn validate_record(record: &Record) -> bool {
    Field::ALL
        .iter()
        .all(|field| field.accepts(field.value_of(record)))
}

/// Fields of `record` that fail their pattern, in serialization order
pub fn failed_fields(record: &Record) -> Vec<Field> {
    Field::ALL
        .into_iter()
        .filter(|field| !field.accepts(field.value_of(record)))
        .collect()
}

/// Validate an untyped JSON object with the same rules
///
/// A missing key, a non-string value, or a non-object input fails the
/// check instead of raising an error.
pub fn validate_document(document: &Value) -> bool {
    let Some(map) = document.as_object() else {
        return false;
    };

    Field::ALL.iter().all(|field| {
        map.get(field.key())
            .and_then(Value::as_str)
            .is_some_and(|value| field.accepts(value))
    })
}

/// Split records into `(valid, invalid)`, preserving order
pub fn partition(records: Vec<Record>) -> (Vec<Record>, Vec<Record>) {
    records.into_iter().partition(validate_record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::generator::{
        AGE_RANGE, OXYGEN_SATURATION_RANGE, format_age_group, format_oxygen_saturation,
    };
    use serde_json::json;

    fn record(id: &str, fr: &str, fc: &str, spo2: &str) -> Record {
        Record {
            id: id.to_string(),
            age_group: fr.to_string(),
            heart_rate: fc.to_string(),
            oxygen_saturation: spo2.to_string(),
        }
    }

    #[test]
    fn test_valid_record() {
        assert!(validate_record(&record("ID-001", "42 Anos", "090ppm", "95%")));
        assert!(failed_fields(&record("ID-001", "42 Anos", "090ppm", "95%")).is_empty());
    }

    #[test]
    fn test_id_pattern_is_anchored() {
        assert!(validate_id("ID-007"));
        assert!(!validate_id("ID-07"));
        assert!(!validate_id("ID-0007"));
        assert!(!validate_id("xID-007"));
        assert!(!validate_id("ID-007 "));
        assert!(!validate_id("id-007"));
    }

    #[test]
    fn test_oxygen_saturation_100_is_rejected() {
        // The generator can draw 100, but the pattern only allows two digits.
        assert!(!validate_oxygen_saturation(&format_oxygen_saturation(100)));

        for spo2 in 85..=99 {
            let value = format_oxygen_saturation(spo2);
            assert!(validate_oxygen_saturation(&value), "{value} should validate");
        }

        let rejected: Vec<u32> = OXYGEN_SATURATION_RANGE
            .filter(|v| !validate_oxygen_saturation(&format_oxygen_saturation(*v)))
            .collect();
        assert_eq!(rejected, vec![100]);
    }

    #[test]
    fn test_age_group_pattern_against_generator_range() {
        // Every generated age passes.
        for age in AGE_RANGE {
            let value = format_age_group(age);
            assert!(validate_age_group(&value), "{value} should validate");
        }

        // The pattern is wider than the generator: 10-17 also pass.
        for age in 10..18 {
            assert!(validate_age_group(&format_age_group(age)));
        }

        // Single digits and three digits never pass.
        for age in 0..10 {
            assert!(!validate_age_group(&format_age_group(age)));
        }
        assert!(!validate_age_group(&format_age_group(100)));
        assert!(!validate_age_group("42 anos"));
        assert!(!validate_age_group("42Anos"));
    }

    #[test]
    fn test_heart_rate_pattern() {
        assert!(validate_heart_rate("050ppm"));
        assert!(validate_heart_rate("140ppm"));
        assert!(!validate_heart_rate("50ppm"));
        assert!(!validate_heart_rate("1400ppm"));
        assert!(!validate_heart_rate("090 ppm"));
    }

    #[test]
    fn test_failed_fields_reports_each_field() {
        let bad = record("ID-1", "5 Anos", "90ppm", "100%");
        assert_eq!(failed_fields(&bad), Field::ALL.to_vec());

        let spo2_only = record("ID-003", "30 Anos", "120ppm", "100%");
        assert_eq!(failed_fields(&spo2_only), vec![Field::OxygenSaturation]);
        assert!(!validate_record(&spo2_only));
    }

    #[test]
    fn test_validate_document_missing_keys() {
        let complete = json!({"id": "ID-001", "fr": "42 Anos", "fc": "090ppm", "spo2": "95%"});
        assert!(validate_document(&complete));

        let missing = json!({"id": "ID-001", "fr": "42 Anos", "fc": "090ppm"});
        assert!(!validate_document(&missing));

        let wrong_type = json!({"id": "ID-001", "fr": 42, "fc": "090ppm", "spo2": "95%"});
        assert!(!validate_document(&wrong_type));

        assert!(!validate_document(&json!(["ID-001"])));
        assert!(!validate_document(&Value::Null));
    }

    #[test]
    fn test_partition_preserves_order() {
        let records = vec![
            record("ID-001", "42 Anos", "090ppm", "95%"),
            record("ID-002", "42 Anos", "090ppm", "100%"),
            record("ID-003", "18 Anos", "140ppm", "85%"),
        ];
        let (valid, invalid) = partition(records);
        let valid_ids: Vec<&str> = valid.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(valid_ids, vec!["ID-001", "ID-003"]);
        assert_eq!(invalid.len(), 1);
        assert_eq!(invalid[0].id, "ID-002");
    }

    #[test]
    fn test_field_keys() {
        let keys: Vec<&str> = Field::ALL.iter().map(|f| f.key()).collect();
        assert_eq!(keys, crate::record::FIELD_NAMES.to_vec());
        assert_eq!(Field::HeartRate.to_string(), "fc");
    }
}
