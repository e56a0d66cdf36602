//! MetricKey / MetricValue - the fixed telemetry vocabulary
//!
//! Every inbound record is keyed by one of the fifteen known metrics.
//! Unknown keys never reach a widget.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the fixed, known telemetry metrics.
///
/// Wire names are camelCase, matching the JSON produced by the telemetry relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKey {
    Rpm,
    Speed,
    CoolantTemp,
    EngineLoad,
    FuelLevel,
    ThrottlePos,
    MafAirFlow,
    Mpg,
    BatteryVoltage,
    Soc,
    IdlingTime,
    Acceleration,
    TripDistance,
    Dtc,
    IgnitionState,
}

impl MetricKey {
    /// All metrics, in dashboard order.
    pub const ALL: [MetricKey; 15] = [
        MetricKey::Rpm,
        MetricKey::Speed,
        MetricKey::CoolantTemp,
        MetricKey::EngineLoad,
        MetricKey::FuelLevel,
        MetricKey::ThrottlePos,
        MetricKey::MafAirFlow,
        MetricKey::Mpg,
        MetricKey::BatteryVoltage,
        MetricKey::Soc,
        MetricKey::IdlingTime,
        MetricKey::Acceleration,
        MetricKey::TripDistance,
        MetricKey::Dtc,
        MetricKey::IgnitionState,
    ];

    /// Wire name of the metric
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::Rpm => "rpm",
            MetricKey::Speed => "speed",
            MetricKey::CoolantTemp => "coolantTemp",
            MetricKey::EngineLoad => "engineLoad",
            MetricKey::FuelLevel => "fuelLevel",
            MetricKey::ThrottlePos => "throttlePos",
            MetricKey::MafAirFlow => "mafAirFlow",
            MetricKey::Mpg => "mpg",
            MetricKey::BatteryVoltage => "batteryVoltage",
            MetricKey::Soc => "soc",
            MetricKey::IdlingTime => "idlingTime",
            MetricKey::Acceleration => "acceleration",
            MetricKey::TripDistance => "tripDistance",
            MetricKey::Dtc => "dtc",
            MetricKey::IgnitionState => "ignitionState",
        }
    }

    /// Formatting family the metric belongs to
    pub fn kind(&self) -> MetricKind {
        match self {
            MetricKey::IgnitionState => MetricKind::Categorical,
            MetricKey::Dtc => MetricKind::FaultCode,
            MetricKey::IdlingTime => MetricKind::Duration,
            _ => MetricKind::Measurement,
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("unknown metric key: {s}"))
    }
}

/// Formatting family of a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Numeric measurement, one decimal place
    Measurement,
    /// Elapsed seconds, rendered as HH:MM:SS
    Duration,
    /// Ignition state (Off / On / Running)
    Categorical,
    /// Diagnostic trouble code or the no-fault sentinel
    FaultCode,
}

/// A single decoded metric value.
///
/// `Other` keeps the JSON text of values with an unexpected type (bool, object)
/// so they can still be shown literally.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    /// Sensor unavailable
    Null,
    /// Numeric reading
    Number(f64),
    /// String reading
    Text(String),
    /// JSON array (the relay sends several fault codes this way)
    List(Vec<MetricValue>),
    /// Any other JSON value, kept as its JSON text
    Other(String),
}

impl MetricValue {
    /// True for `Null`
    pub fn is_null(&self) -> bool {
        matches!(self, MetricValue::Null)
    }

    /// Numeric view of the value, if it is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Textual form of the value, unchanged
    pub fn to_text(&self) -> String {
        match self {
            MetricValue::Null => String::new(),
            MetricValue::Number(v) => format_number_literal(*v),
            MetricValue::Text(s) => s.clone(),
            MetricValue::List(items) => items
                .iter()
                .map(MetricValue::to_text)
                .collect::<Vec<_>>()
                .join(","),
            MetricValue::Other(s) => s.clone(),
        }
    }
}

impl From<serde_json::Value> for MetricValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => MetricValue::Null,
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(v) => MetricValue::Number(v),
                None => MetricValue::Other(n.to_string()),
            },
            serde_json::Value::String(s) => MetricValue::Text(s),
            serde_json::Value::Array(items) => {
                MetricValue::List(items.into_iter().map(MetricValue::from).collect())
            }
            other => MetricValue::Other(other.to_string()),
        }
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Number(v)
    }
}

impl From<&str> for MetricValue {
    fn from(s: &str) -> Self {
        MetricValue::Text(s.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(s: String) -> Self {
        MetricValue::Text(s)
    }
}

impl<T: Into<MetricValue>> From<Option<T>> for MetricValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(MetricValue::Null)
    }
}

/// Integral values print without a fractional part ("3", not "3.0")
fn format_number_literal(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}
