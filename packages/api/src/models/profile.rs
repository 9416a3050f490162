//! Edit buffer for the profile page.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::record::UserRecord;

/// Values offered by the gender selector.
pub const GENDER_OPTIONS: &[&str] = &["male", "female", "other"];

/// Locally held, not-yet-submitted profile fields.
///
/// Always serialized as the same three fields, whatever keys the fetched record had.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditBuffer {
    pub display_name: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub gender: String,
}

impl EditBuffer {
    /// Initialise from a fetched record.
    ///
    /// `displayName` comes from the record when it holds a string, else from
    /// `fallback_name`. A missing or unparsable `birthdate` stays `None`; a
    /// missing `gender` is the empty selection.
    pub fn from_record(record: &UserRecord, fallback_name: Option<&str>) -> Self {
        Self {
            display_name: record
                .get_str("displayName")
                .or(fallback_name)
                .map(str::to_string),
            birthdate: record.get_str("birthdate").and_then(parse_date),
            gender: record.get_str("gender").unwrap_or_default().to_string(),
        }
    }

    /// JSON sent as `data` in an update.
    pub fn to_payload(&self) -> Value {
        json!({
            "displayName": self.display_name,
            "birthdate": self.birthdate.map(|d| d.format("%Y-%m-%d").to_string()),
            "gender": self.gender,
        })
    }
}

/// Parse `YYYY-MM-DD` or an RFC 3339 timestamp into a calendar date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(value: Value) -> UserRecord {
        UserRecord::try_from(value).unwrap()
    }

    #[test]
    fn test_payload_shape_and_order() {
        let buffer = EditBuffer {
            display_name: Some("Bob".to_string()),
            birthdate: None,
            gender: "other".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&buffer.to_payload()).unwrap(),
            r#"{"displayName":"Bob","birthdate":null,"gender":"other"}"#
        );

        let buffer = EditBuffer {
            birthdate: NaiveDate::from_ymd_opt(1990, 4, 1),
            ..buffer
        };
        assert_eq!(buffer.to_payload()["birthdate"], "1990-04-01");
    }

    #[test]
    fn test_from_record_defaults() {
        let buffer = EditBuffer::from_record(&record(json!({ "email": "a@b.c" })), Some("Ann"));
        assert_eq!(buffer.display_name.as_deref(), Some("Ann"));
        assert_eq!(buffer.birthdate, None);
        assert_eq!(buffer.gender, "");
    }

    #[test]
    fn test_from_record_reads_values() {
        let buffer = EditBuffer::from_record(
            &record(json!({
                "displayName": "Ann",
                "birthdate": "1990-04-01T00:00:00.000Z",
                "gender": "female",
            })),
            Some("Session Name"),
        );
        assert_eq!(buffer.display_name.as_deref(), Some("Ann"));
        assert_eq!(buffer.birthdate, NaiveDate::from_ymd_opt(1990, 4, 1));
        assert_eq!(buffer.gender, "female");
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2001-02-03"), NaiveDate::from_ymd_opt(2001, 2, 3));
        assert_eq!(
            parse_date("2001-02-03T10:00:00+00:00"),
            NaiveDate::from_ymd_opt(2001, 2, 3)
        );
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("not a date"), None);
    }
}
