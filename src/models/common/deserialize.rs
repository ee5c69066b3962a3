//! 宽松的数字反序列化
//!
//! 客户端（尤其是表单提交）经常把数字当作字符串发送，
//! 这里同时接受 JSON 数字和数字字符串。

use serde::de::{Error, Unexpected, Visitor};
use std::fmt;

struct OptionalI64Visitor;

impl<'de> Visitor<'de> for OptionalI64Visitor {
    type Value = Option<i64>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer or a string containing an integer")
    }

    fn visit_none<E: Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_i64<E: Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Some(value))
    }

    fn visit_u64<E: Error>(self, value: u64) -> Result<Self::Value, E> {
        if value <= i64::MAX as u64 {
            Ok(Some(value as i64))
        } else {
            Err(Error::invalid_value(Unexpected::Unsigned(value), &self))
        }
    }

    fn visit_str<E: Error>(self, value: &str) -> Result<Self::Value, E> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse()
            .map(Some)
            .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
    }
}

struct OptionalF64Visitor;

impl<'de> Visitor<'de> for OptionalF64Visitor {
    type Value = Option<f64>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number or a string containing a number")
    }

    fn visit_none<E: Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_i64<E: Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Some(value as f64))
    }

    fn visit_u64<E: Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(Some(value as f64))
    }

    fn visit_f64<E: Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(Some(value))
    }

    fn visit_str<E: Error>(self, value: &str) -> Result<Self::Value, E> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            _ => Err(Error::invalid_value(Unexpected::Str(value), &self)),
        }
    }
}

pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserializer.deserialize_any(OptionalI64Visitor)
}

pub fn deserialize_optional_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserializer.deserialize_any(OptionalF64Visitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "deserialize_optional_i64")]
        id: Option<i64>,
        #[serde(default, deserialize_with = "deserialize_optional_f64")]
        score: Option<f64>,
    }

    #[test]
    fn test_accepts_numbers_and_numeric_strings() {
        let probe: Probe = serde_json::from_str(r#"{"id": "42", "score": "4.5"}"#).unwrap();
        assert_eq!(probe.id, Some(42));
        assert_eq!(probe.score, Some(4.5));

        let probe: Probe = serde_json::from_str(r#"{"id": 7, "score": 3}"#).unwrap();
        assert_eq!(probe.id, Some(7));
        assert_eq!(probe.score, Some(3.0));
    }

    #[test]
    fn test_missing_null_and_blank_are_none() {
        let probe: Probe = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(probe.id, None);

        let probe: Probe = serde_json::from_str(r#"{"id": null, "score": ""}"#).unwrap();
        assert_eq!(probe.id, None);
        assert_eq!(probe.score, None);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_str::<Probe>(r#"{"id": "abc"}"#).is_err());
        assert!(serde_json::from_str::<Probe>(r#"{"score": "NaN"}"#).is_err());
    }
}
