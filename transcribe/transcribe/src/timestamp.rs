//! Timestamps travel as epoch seconds in a JSON number, fractional part allowed.

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};
use std::fmt;

pub fn to_epoch_seconds(value: &DateTime<Utc>) -> f64 {
    value.timestamp_millis() as f64 / 1000.0
}

pub fn from_epoch_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis((seconds * 1000.0).round() as i64)
}

struct EpochSecondsVisitor;

impl Visitor<'_> for EpochSecondsVisitor {
    type Value = DateTime<Utc>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a timestamp in epoch seconds")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        from_epoch_seconds(v).ok_or_else(|| E::custom(format!("timestamp out of range: {v}")))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        DateTime::from_timestamp(v, 0).ok_or_else(|| E::custom(format!("timestamp out of range: {v}")))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        let v = i64::try_from(v).map_err(|_| E::custom(format!("timestamp out of range: {v}")))?;
        self.visit_i64(v)
    }
}

/// `#[serde(with = "epoch_seconds")]` for required timestamps.
pub mod epoch_seconds {
    use super::*;

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(to_epoch_seconds(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        deserializer.deserialize_any(EpochSecondsVisitor)
    }
}

/// `#[serde(default, with = "epoch_seconds_option")]` for optional timestamps.
pub mod epoch_seconds_option {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_some(&to_epoch_seconds(value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        struct OptionVisitor;

        impl<'de> Visitor<'de> for OptionVisitor {
            type Value = Option<DateTime<Utc>>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an optional timestamp in epoch seconds")
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(None)
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(None)
            }

            fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
                super::epoch_seconds::deserialize(deserializer).map(Some)
            }
        }

        deserializer.deserialize_option(OptionVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Stamped {
        #[serde(with = "epoch_seconds")]
        at: DateTime<Utc>,
        #[serde(default, with = "epoch_seconds_option", skip_serializing_if = "Option::is_none")]
        maybe: Option<DateTime<Utc>>,
    }

    #[test]
    fn fractional_seconds_keep_millisecond_precision() {
        let parsed: Stamped = serde_json::from_str(r#"{"at": 1700000000.123}"#).unwrap();
        assert_eq!(parsed.at, Utc.timestamp_millis_opt(1_700_000_000_123).unwrap());
        assert_eq!(parsed.maybe, None);
    }

    #[test]
    fn integer_seconds_are_accepted() {
        let parsed: Stamped = serde_json::from_str(r#"{"at": 1700000000, "maybe": 1}"#).unwrap();
        assert_eq!(parsed.at, Utc.timestamp_opt(1_700_000_000, 0).unwrap());
        assert_eq!(parsed.maybe, Some(Utc.timestamp_opt(1, 0).unwrap()));
    }

    #[test]
    fn null_optional_timestamp_is_absent() {
        let parsed: Stamped = serde_json::from_str(r#"{"at": 0, "maybe": null}"#).unwrap();
        assert_eq!(parsed.maybe, None);
    }

    #[test]
    fn strings_are_rejected() {
        assert!(serde_json::from_str::<Stamped>(r#"{"at": "yesterday"}"#).is_err());
    }

    #[test]
    fn absent_optional_is_not_written() {
        let value = Stamped {
            at: Utc.timestamp_millis_opt(1_500).unwrap(),
            maybe: None,
        };
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"at":1.5}"#);
    }
}
