//! Custom scalar types for GraphQL

use async_graphql::{InputValueError, InputValueResult, Scalar, ScalarType, Value};
use chrono::{NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

/// ISO-8601 timestamp, always emitted in UTC
///
/// Input accepts an ISO-8601 string or a number of milliseconds since the
/// Unix epoch. Strings without an offset are read as UTC; a bare date is
/// midnight UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateTime(pub chrono::DateTime<Utc>);

#[Scalar(name = "DateTime")]
impl ScalarType for DateTime {
    fn parse(value: Value) -> InputValueResult<Self> {
        match &value {
            Value::String(s) => parse_iso8601(s)
                .map(DateTime)
                .ok_or_else(|| InputValueError::custom(format!("Invalid DateTime '{}'", s))),
            Value::Number(n) => n
                .as_i64()
                .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
                .map(DateTime)
                .ok_or_else(|| InputValueError::custom(format!("Invalid DateTime '{}'", n))),
            _ => Err(InputValueError::expected_type(value)),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

fn parse_iso8601(s: &str) -> Option<chrono::DateTime<Utc>> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

impl From<chrono::DateTime<Utc>> for DateTime {
    fn from(dt: chrono::DateTime<Utc>) -> Self {
        DateTime(dt)
    }
}

impl From<DateTime> for chrono::DateTime<Utc> {
    fn from(dt: DateTime) -> Self {
        dt.0
    }
}

/// Arbitrary structured data carried on the wire as a JSON-encoded string
#[derive(Debug, Clone, PartialEq)]
pub struct Json(pub serde_json::Value);

#[Scalar(name = "Json")]
impl ScalarType for Json {
    fn parse(value: Value) -> InputValueResult<Self> {
        match &value {
            Value::String(s) => serde_json::from_str(s)
                .map(Json)
                .map_err(|e| InputValueError::custom(format!("Invalid Json: {}", e))),
            _ => Err(InputValueError::expected_type(value)),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.to_string())
    }
}

impl From<serde_json::Value> for Json {
    fn from(value: serde_json::Value) -> Self {
        Json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_datetime_roundtrip() {
        let now = DateTime(Utc::now());
        let parsed = <DateTime as ScalarType>::parse(now.to_value()).unwrap();
        assert_eq!(parsed, now);
    }

    #[test]
    fn test_datetime_output_is_utc_iso8601() {
        let dt = DateTime(Utc.with_ymd_and_hms(2025, 5, 17, 9, 30, 0).unwrap());
        assert_eq!(dt.to_value(), Value::String("2025-05-17T09:30:00Z".into()));
    }

    #[test]
    fn test_datetime_offset_is_normalized() {
        let parsed =
            <DateTime as ScalarType>::parse(Value::String("2025-05-17T11:30:00+02:00".into()))
                .unwrap();
        assert_eq!(parsed.0, Utc.with_ymd_and_hms(2025, 5, 17, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_datetime_from_epoch_millis() {
        let parsed = <DateTime as ScalarType>::parse(Value::from(1_700_000_000_123i64)).unwrap();
        assert_eq!(parsed.0.timestamp_millis(), 1_700_000_000_123);
    }

    #[test]
    fn test_datetime_without_offset_is_utc() {
        let parse = |s: &str| <DateTime as ScalarType>::parse(Value::String(s.into())).unwrap().0;

        let expected = Utc.with_ymd_and_hms(2025, 7, 1, 10, 0, 0).unwrap();
        assert_eq!(parse("2025-07-01T10:00:00"), expected);
        assert_eq!(parse("2025-07-01T10:00"), expected);
        assert_eq!(parse("2025-07-01T10:00:00.000Z"), expected);
        assert_eq!(
            parse("2025-07-01T10:00:00.250").timestamp_millis(),
            expected.timestamp_millis() + 250
        );
        assert_eq!(
            parse("2025-07-01"),
            Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_malformed_datetime_is_rejected() {
        assert!(<DateTime as ScalarType>::parse(Value::String("not a date".into())).is_err());
        assert!(<DateTime as ScalarType>::parse(Value::String("2025-13-01".into())).is_err());
        assert!(<DateTime as ScalarType>::parse(Value::String("2025-07-01T25:00:00".into())).is_err());
        assert!(<DateTime as ScalarType>::parse(Value::String(String::new())).is_err());
        assert!(<DateTime as ScalarType>::parse(Value::Boolean(true)).is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let style = Json(json!({
            "layers": [{"id": "water", "fill": "#0af"}, {"id": "roads", "width": 1.5}],
            "nested": {"empty": [], "flag": false, "none": null}
        }));
        let encoded = style.to_value();
        assert!(matches!(encoded, Value::String(_)));
        assert_eq!(<Json as ScalarType>::parse(encoded).unwrap(), style);
    }

    #[test]
    fn test_json_keeps_key_order() {
        let text = r#"{"zoom":12,"layers":[],"center":[1,2]}"#;
        let style = <Json as ScalarType>::parse(Value::String(text.into())).unwrap();
        assert_eq!(style.to_value(), Value::String(text.into()));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(<Json as ScalarType>::parse(Value::String("{not json".into())).is_err());
        assert!(<Json as ScalarType>::parse(Value::Number(1.into())).is_err());
    }
}
