//! Write-time validation for day records.
//!
//! Runs synchronously before any store access; a failed validation means
//! nothing is persisted. Both POST /upload and the full-replace PUT path
//! go through [`validate_day`], so defaulted fields are re-checked on edit.

use crate::error::AppError;
use crate::models::day::{DayRecordInput, Mood, MONTHS};

/// A day-record payload that passed validation, with the mood resolved to
/// its enumerated form and the month canonicalized.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDay {
    pub work: f64,
    pub sleep: f64,
    pub chores: f64,
    pub leisure: f64,
    pub self_care: f64,
    pub mood: Mood,
    pub month: &'static str,
    pub day: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("Invalid value for field `{0}`")]
    FieldInvalid(&'static str),
    #[error("There aren't that many hours in the day")]
    SumExceeded,
}

impl From<RecordError> for AppError {
    fn from(e: RecordError) -> Self {
        match e {
            RecordError::FieldInvalid(field) => AppError::FieldInvalid(field),
            RecordError::SumExceeded => AppError::SumExceeded,
        }
    }
}

fn check_hours(field: &'static str, value: f64) -> Result<f64, RecordError> {
    // NaN fails the range check too.
    if !(0.0..=24.0).contains(&value) {
        return Err(RecordError::FieldInvalid(field));
    }
    Ok(value)
}

/// Validate a candidate day record.
///
/// Field checks come first (each hour field in `[0, 24]`, mood one of the
/// seven labels, month one of the twelve calendar names, day in `1..=31`),
/// then the cross-field constraint: the five hour fields may not sum past
/// 24. The day bound is 1-31 for every month; day 31 of February passes.
pub fn validate_day(input: &DayRecordInput) -> Result<ValidatedDay, RecordError> {
    let work = check_hours("work", input.work)?;
    let sleep = check_hours("sleep", input.sleep)?;
    let chores = check_hours("chores", input.chores)?;
    let leisure = check_hours("leisure", input.leisure)?;
    let self_care = check_hours("self_care", input.self_care)?;

    let mood = input
        .mood
        .as_deref()
        .and_then(Mood::parse)
        .ok_or(RecordError::FieldInvalid("mood"))?;

    let month = input
        .month
        .as_deref()
        .and_then(|m| MONTHS.iter().find(|&&name| name == m))
        .copied()
        .ok_or(RecordError::FieldInvalid("month"))?;

    let day = input.day.ok_or(RecordError::FieldInvalid("day"))?;
    if !(1..=31).contains(&day) {
        return Err(RecordError::FieldInvalid("day"));
    }

    if work + sleep + chores + leisure + self_care > 24.0 {
        return Err(RecordError::SumExceeded);
    }

    Ok(ValidatedDay {
        work,
        sleep,
        chores,
        leisure,
        self_care,
        mood,
        month,
        day,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(json: &str) -> DayRecordInput {
        serde_json::from_str(json).unwrap()
    }

    fn valid_input() -> DayRecordInput {
        input(
            r#"{"work":10,"sleep":8,"chores":2,"leisure":3,"self_care":1,
                "mood":"Happy","month":"May","day":5}"#,
        )
    }

    #[test]
    fn accepts_a_full_valid_record() {
        let valid = validate_day(&valid_input()).unwrap();
        assert_eq!(valid.mood, Mood::Happy);
        assert_eq!(valid.month, "May");
        assert_eq!(valid.day, 5);
        assert_eq!(valid.work, 10.0);
    }

    #[test]
    fn sum_of_exactly_24_passes() {
        // 10 + 8 + 2 + 3 + 1 = 24
        assert!(validate_day(&valid_input()).is_ok());
    }

    #[test]
    fn sum_over_24_is_rejected() {
        let mut i = valid_input();
        i.self_care = 2.0; // sum = 25
        assert_eq!(validate_day(&i), Err(RecordError::SumExceeded));
    }

    #[test]
    fn fractional_sum_over_24_is_rejected() {
        let mut i = valid_input();
        i.self_care = 1.5; // sum = 24.5
        assert_eq!(validate_day(&i), Err(RecordError::SumExceeded));
    }

    #[test]
    fn hour_field_above_24_names_the_field() {
        let mut i = valid_input();
        i.sleep = 25.0;
        assert_eq!(validate_day(&i), Err(RecordError::FieldInvalid("sleep")));
    }

    #[test]
    fn negative_hours_are_rejected() {
        let mut i = valid_input();
        i.chores = -1.0;
        assert_eq!(validate_day(&i), Err(RecordError::FieldInvalid("chores")));
    }

    #[test]
    fn nan_hours_are_rejected() {
        let mut i = valid_input();
        i.work = f64::NAN;
        assert_eq!(validate_day(&i), Err(RecordError::FieldInvalid("work")));
    }

    #[test]
    fn missing_mood_is_rejected() {
        let mut i = valid_input();
        i.mood = None;
        assert_eq!(validate_day(&i), Err(RecordError::FieldInvalid("mood")));
    }

    #[test]
    fn unknown_mood_is_rejected() {
        let mut i = valid_input();
        i.mood = Some("Grumpy".into());
        assert_eq!(validate_day(&i), Err(RecordError::FieldInvalid("mood")));
    }

    #[test]
    fn unknown_month_is_rejected() {
        let mut i = valid_input();
        i.month = Some("Smarch".into());
        assert_eq!(validate_day(&i), Err(RecordError::FieldInvalid("month")));
    }

    #[test]
    fn day_bounds_are_1_to_31() {
        let mut i = valid_input();
        i.day = Some(0);
        assert_eq!(validate_day(&i), Err(RecordError::FieldInvalid("day")));
        i.day = Some(32);
        assert_eq!(validate_day(&i), Err(RecordError::FieldInvalid("day")));
        i.day = Some(31);
        assert!(validate_day(&i).is_ok());
    }

    #[test]
    fn day_is_not_calendar_aware() {
        // The upper bound is 31 regardless of month.
        let mut i = valid_input();
        i.month = Some("February".into());
        i.day = Some(31);
        assert!(validate_day(&i).is_ok());
    }

    #[test]
    fn missing_day_is_rejected() {
        let mut i = valid_input();
        i.day = None;
        assert_eq!(validate_day(&i), Err(RecordError::FieldInvalid("day")));
    }

    #[test]
    fn defaulted_hours_pass_validation() {
        let i = input(r#"{"mood":"Tired","month":"January","day":1}"#);
        let valid = validate_day(&i).unwrap();
        assert_eq!(valid.work, 0.0);
        assert_eq!(valid.sleep, 0.0);
    }
}
