use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One user's logged allocation of hours across categories, plus a mood
/// label, for a specific calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DayRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub work: f64,
    pub sleep: f64,
    pub chores: f64,
    pub leisure: f64,
    pub self_care: f64,
    pub mood: String,
    pub month: String,
    pub day: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Incoming payload for POST /upload and PUT /:id.
///
/// Hour fields default to 0 when absent. PUT uses full-replace semantics,
/// so a field left out of the body reverts to its default. `alias` keeps
/// camelCase clients working.
#[derive(Debug, Deserialize)]
pub struct DayRecordInput {
    #[serde(default)]
    pub work: f64,
    #[serde(default)]
    pub sleep: f64,
    #[serde(default)]
    pub chores: f64,
    #[serde(default)]
    pub leisure: f64,
    #[serde(default, alias = "selfCare")]
    pub self_care: f64,
    pub mood: Option<String>,
    pub month: Option<String>,
    pub day: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Angry,
    Calm,
    Excited,
    Happy,
    Sad,
    Stressed,
    Tired,
}

impl Mood {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Angry" => Some(Self::Angry),
            "Calm" => Some(Self::Calm),
            "Excited" => Some(Self::Excited),
            "Happy" => Some(Self::Happy),
            "Sad" => Some(Self::Sad),
            "Stressed" => Some(Self::Stressed),
            "Tired" => Some(Self::Tired),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Angry => "Angry",
            Self::Calm => "Calm",
            Self::Excited => "Excited",
            Self::Happy => "Happy",
            Self::Sad => "Sad",
            Self::Stressed => "Stressed",
            Self::Tired => "Tired",
        }
    }
}

pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mood_round_trips_through_parse() {
        for name in ["Angry", "Calm", "Excited", "Happy", "Sad", "Stressed", "Tired"] {
            let mood = Mood::parse(name).expect("known mood should parse");
            assert_eq!(mood.as_str(), name);
        }
    }

    #[test]
    fn mood_parse_is_case_sensitive() {
        assert!(Mood::parse("happy").is_none());
        assert!(Mood::parse("HAPPY").is_none());
        assert!(Mood::parse("Grumpy").is_none());
    }

    #[test]
    fn input_defaults_hours_to_zero() {
        let input: DayRecordInput =
            serde_json::from_str(r#"{"mood":"Calm","month":"May","day":5}"#).unwrap();
        assert_eq!(input.work, 0.0);
        assert_eq!(input.sleep, 0.0);
        assert_eq!(input.self_care, 0.0);
        assert_eq!(input.mood.as_deref(), Some("Calm"));
    }

    #[test]
    fn input_accepts_camel_case_self_care() {
        let input: DayRecordInput =
            serde_json::from_str(r#"{"selfCare":2.5,"mood":"Happy","month":"May","day":5}"#)
                .unwrap();
        assert_eq!(input.self_care, 2.5);
    }
}
