//! Per-field formatting rules
//!
//! Pure functions, no state. The renderer decides where the output goes.

use contracts::{DisplayConfig, IgnitionState, MetricKey, MetricKind, MetricValue, StyleClass};

/// What a widget should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayText {
    /// The configured "no data" text
    Placeholder,
    /// A formatted value
    Value(String),
}

/// Formatted output for one metric
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedMetric {
    pub text: DisplayText,
    /// Categorical style; `None` means the widget carries no style
    pub style: Option<StyleClass>,
}

impl FormattedMetric {
    fn placeholder() -> Self {
        Self {
            text: DisplayText::Placeholder,
            style: None,
        }
    }

    fn value(text: String, style: Option<StyleClass>) -> Self {
        Self {
            text: DisplayText::Value(text),
            style,
        }
    }
}

/// Formatting parameters shared by all fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatRules {
    /// Text shown for missing data
    pub placeholder: String,
    /// Value the relay sends for "no fault"
    pub no_fault_sentinel: String,
    /// Text shown when there is no fault
    pub no_fault_label: String,
}

impl Default for FormatRules {
    fn default() -> Self {
        Self::from_config(&DisplayConfig::default())
    }
}

impl FormatRules {
    pub fn from_config(config: &DisplayConfig) -> Self {
        Self {
            placeholder: config.placeholder.clone(),
            no_fault_sentinel: config.dtc_no_fault_sentinel.clone(),
            no_fault_label: config.dtc_no_fault_label.clone(),
        }
    }

    /// Format `value` for the widget of `key`
    pub fn format(&self, key: MetricKey, value: &MetricValue) -> FormattedMetric {
        if value.is_null() {
            return FormattedMetric::placeholder();
        }

        match key.kind() {
            MetricKind::Categorical => {
                let text = value.to_text();
                let style = IgnitionState::from_text(&text).map(StyleClass::Ignition);
                FormattedMetric::value(text, style)
            }
            MetricKind::FaultCode => {
                if self.is_fault(value) {
                    FormattedMetric::value(value.to_text(), Some(StyleClass::HasFault))
                } else {
                    FormattedMetric::value(self.no_fault_label.clone(), Some(StyleClass::NoFault))
                }
            }
            MetricKind::Duration => match duration_seconds(value) {
                Some(seconds) => FormattedMetric::value(format_idle_duration(seconds), None),
                None => FormattedMetric::value(value.to_text(), None),
            },
            MetricKind::Measurement => match value.as_f64() {
                Some(v) => FormattedMetric::value(format_measurement(v), None),
                None => FormattedMetric::value(value.to_text(), None),
            },
        }
    }
}

impl FormatRules {
    /// Only non-empty strings and non-empty lists carry fault codes;
    /// numbers, booleans and objects count as "no fault".
    fn is_fault(&self, value: &MetricValue) -> bool {
        match value {
            MetricValue::Text(code) => classify_fault(code, &self.no_fault_sentinel),
            MetricValue::List(codes) => !codes.is_empty(),
            _ => false,
        }
    }
}

/// Format one metric value under `rules`
pub fn format_metric(key: MetricKey, value: &MetricValue, rules: &FormatRules) -> FormattedMetric {
    rules.format(key, value)
}

/// True when `code` names an actual fault: non-empty and not the sentinel
pub fn classify_fault(code: &str, sentinel: &str) -> bool {
    !code.is_empty() && code != sentinel
}

/// Round to exactly one decimal place, ties away from zero
///
/// Beyond 1e15 scaling by ten is no longer exact, so those print as-is.
pub fn format_measurement(value: f64) -> String {
    if !value.is_finite() || value.abs() >= 1e15 {
        return format!("{value:.1}");
    }
    let rounded = (value * 10.0).round() / 10.0;
    format!("{rounded:.1}")
}

/// Render elapsed seconds as `HH:MM:SS`
///
/// Hours are not wrapped at 24. Fractions are truncated, negatives clamp to zero.
pub fn format_idle_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Numeric seconds, accepting numeric strings the way the relay sometimes sends them
fn duration_seconds(value: &MetricValue) -> Option<f64> {
    match value {
        MetricValue::Number(v) => Some(*v),
        MetricValue::Text(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
