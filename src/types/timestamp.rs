//! Serde adapter for `yyyy-MM-dd HH:mm:ss` timestamps.
//!
//! Use with `#[serde(with = "crate::types::timestamp")]` on `DateTime<Utc>`
//! fields. Values are rendered in UTC with second precision.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serializer};

use crate::config::TIMESTAMP_FORMAT;

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(de::Error::custom)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Stamped {
        #[serde(with = "super")]
        at: DateTime<Utc>,
    }

    #[test]
    fn test_format_drops_subseconds() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap()
            + chrono::Duration::milliseconds(987);
        let json = serde_json::to_string(&Stamped { at }).unwrap();
        assert_eq!(json, r#"{"at":"2024-03-09 07:05:01"}"#);
    }

    #[test]
    fn test_parse() {
        let parsed: Stamped = serde_json::from_str(r#"{"at":"2024-12-31 23:59:58"}"#).unwrap();
        assert_eq!(parsed.at, Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 58).unwrap());

        assert!(serde_json::from_str::<Stamped>(r#"{"at":"2024-12-31T23:59:58Z"}"#).is_err());
    }
}
