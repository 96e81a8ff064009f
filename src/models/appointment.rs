use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One scheduled follow-up. Never updated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Creation timestamp (RFC 3339, UTC, milliseconds).
    pub id: String,
    /// Stored as YYYY-MM-DD.
    pub date: NaiveDate,
    /// Stored as HH:MM.
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor: Option<String>,
}

/// `NaiveTime` as "HH:MM".
mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_is_stored_as_hours_and_minutes() {
        let appointment = Appointment {
            id: "2026-10-16T08:00:00.000Z".into(),
            date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
            time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            reason: "Follow-up".into(),
            doctor: None,
        };
        let json = serde_json::to_string(&appointment).unwrap();
        assert!(json.contains("\"time\":\"14:00\""));
        assert!(json.contains("\"date\":\"2026-10-20\""));
        assert!(!json.contains("doctor"));

        let back: Appointment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, appointment);
    }

    #[test]
    fn malformed_time_rejected() {
        let json = r#"{"id":"x","date":"2026-10-20","time":"2pm","reason":"r"}"#;
        assert!(serde_json::from_str::<Appointment>(json).is_err());
    }
}
