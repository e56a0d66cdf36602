//! TelemetryRecord / StreamMessage - inbound stream payloads
//!
//! One JSON object per message. Either a metrics record, or the
//! `{"status": "disconnected", "error": ...}` envelope sent by the relay when
//! the vehicle side vanishes while the relay connection stays up.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::{ContractError, MetricKey, MetricValue};

/// One decoded telemetry message.
///
/// Only keys present on the wire are stored; a present key may still carry `Null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetryRecord {
    values: BTreeMap<MetricKey, MetricValue>,
    unknown_keys: Vec<String>,
}

impl TelemetryRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: MetricKey, value: impl Into<MetricValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a value
    pub fn insert(&mut self, key: MetricKey, value: impl Into<MetricValue>) {
        self.values.insert(key, value.into());
    }

    /// Value for `key`, if the key was present on the wire
    pub fn get(&self, key: MetricKey) -> Option<&MetricValue> {
        self.values.get(&key)
    }

    /// Present keys with their values, in dashboard order
    pub fn iter(&self) -> impl Iterator<Item = (MetricKey, &MetricValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    /// Number of known keys present
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no known key is present
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Keys that were on the wire but are not part of the metric set
    pub fn unknown_keys(&self) -> &[String] {
        &self.unknown_keys
    }

    /// Build a record from a decoded JSON object, skipping unknown keys
    pub fn from_json_object(object: Map<String, Value>) -> Self {
        let mut record = Self::new();
        for (name, value) in object {
            match name.parse::<MetricKey>() {
                Ok(key) => record.insert(key, MetricValue::from(value)),
                Err(_) => record.unknown_keys.push(name),
            }
        }
        record
    }
}

impl FromIterator<(MetricKey, MetricValue)> for TelemetryRecord {
    fn from_iter<I: IntoIterator<Item = (MetricKey, MetricValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
            unknown_keys: Vec::new(),
        }
    }
}

/// A decoded message from the inbound stream
#[derive(Debug, Clone, PartialEq)]
pub enum StreamMessage {
    /// Regular metrics delta
    Metrics(TelemetryRecord),

    /// The producer behind the relay disconnected; the relay connection itself is still open
    UpstreamDisconnected { error: String },
}

impl StreamMessage {
    /// Decode one text frame
    ///
    /// # Errors
    /// - The frame is not valid JSON
    /// - The frame is valid JSON but not an object
    pub fn decode(text: &str) -> Result<Self, ContractError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| ContractError::StreamDecode {
                message: format!("invalid JSON frame: {e}"),
                source: Some(e),
            })?;
        Self::from_json(value)
    }

    /// Classify an already-parsed JSON value
    pub fn from_json(value: Value) -> Result<Self, ContractError> {
        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(ContractError::UnexpectedPayload {
                    kind: json_kind(&other),
                })
            }
        };

        if object.get("status").and_then(Value::as_str) == Some("disconnected") {
            let error = match object.get("error") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            };
            return Ok(StreamMessage::UpstreamDisconnected { error });
        }

        Ok(StreamMessage::Metrics(TelemetryRecord::from_json_object(
            object,
        )))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_metrics_record() {
        let msg = StreamMessage::decode(
            r#"{"rpm": 2731, "speed": null, "ignitionState": "Running", "gpsFix": 3}"#,
        )
        .unwrap();

        let StreamMessage::Metrics(record) = msg else {
            panic!("expected metrics record");
        };
        assert_eq!(record.len(), 3);
        assert_eq!(record.get(MetricKey::Rpm), Some(&MetricValue::Number(2731.0)));
        assert_eq!(record.get(MetricKey::Speed), Some(&MetricValue::Null));
        assert_eq!(record.get(MetricKey::Dtc), None);
        assert_eq!(record.unknown_keys(), ["gpsFix".to_string()]);
    }

    #[test]
    fn test_decode_disconnect_envelope() {
        let msg =
            StreamMessage::decode(r#"{"status": "disconnected", "error": "ELM327 timeout"}"#)
                .unwrap();
        assert_eq!(
            msg,
            StreamMessage::UpstreamDisconnected {
                error: "ELM327 timeout".into()
            }
        );
    }

    #[test]
    fn test_other_status_is_a_metrics_record() {
        let msg = StreamMessage::decode(r#"{"status": "connected", "rpm": 800}"#).unwrap();
        assert!(matches!(msg, StreamMessage::Metrics(r) if r.len() == 1));
    }

    #[test]
    fn test_decode_rejects_non_object() {
        let err = StreamMessage::decode("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ContractError::UnexpectedPayload { kind: "array" }));
    }

    #[test]
    fn test_decode_rejects_invalid_json() {
        let err = StreamMessage::decode("{rpm: ").unwrap_err();
        assert!(matches!(err, ContractError::StreamDecode { .. }));
    }
}
