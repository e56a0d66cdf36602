//! Metric widgets and status slot backed by plain strings

use contracts::{MetricWidget, Severity, StatusSlot, StyleClass};
use tracing::info;

/// One metric cell of the console table
#[derive(Debug, Default, Clone)]
pub struct ConsoleWidget {
    text: String,
    style: Option<StyleClass>,
    placeholder: bool,
    updates: u64,
}

impl ConsoleWidget {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> Option<StyleClass> {
        self.style
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    /// Number of value updates received (placeholders excluded)
    pub fn updates(&self) -> u64 {
        self.updates
    }
}

impl MetricWidget for ConsoleWidget {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.placeholder = false;
        self.updates += 1;
    }

    fn set_placeholder(&mut self, placeholder: &str) {
        self.text = placeholder.to_string();
        self.placeholder = true;
    }

    fn set_style_class(&mut self, class: Option<StyleClass>) {
        self.style = class;
    }
}

/// Connection status line
#[derive(Debug, Default, Clone)]
pub struct ConsoleStatus {
    message: String,
    severity: Severity,
    changes: usize,
}

impl ConsoleStatus {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn changes(&self) -> usize {
        self.changes
    }
}

impl StatusSlot for ConsoleStatus {
    fn set_status(&mut self, message: &str, severity: Severity) {
        if self.message != message || self.severity != severity {
            info!(severity = severity.css_class(), "{}", message);
        }
        self.message = message.to_string();
        self.severity = severity;
        self.changes += 1;
    }
}
