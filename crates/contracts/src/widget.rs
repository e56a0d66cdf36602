//! Rendering capabilities for metric widgets and the status slot
//!
//! Implemented by the host (DOM bindings, terminal table, test recorder).
//! Only the telemetry renderer and the connection orchestrator's reset touch widgets.

use crate::{Severity, StyleClass};

/// Handle to one metric display slot
pub trait MetricWidget {
    /// Show a formatted value
    fn set_text(&mut self, text: &str);

    /// Show the "no data" placeholder
    fn set_placeholder(&mut self, placeholder: &str);

    /// Replace the categorical style (`None` clears it)
    ///
    /// The caller guarantees at most one class is ever applied.
    fn set_style_class(&mut self, class: Option<StyleClass>);
}

/// Handle to the connection status slot
pub trait StatusSlot {
    /// Replace the status text and its severity class
    fn set_status(&mut self, message: &str, severity: Severity);
}

impl<T: MetricWidget + ?Sized> MetricWidget for Box<T> {
    fn set_text(&mut self, text: &str) {
        (**self).set_text(text)
    }

    fn set_placeholder(&mut self, placeholder: &str) {
        (**self).set_placeholder(placeholder)
    }

    fn set_style_class(&mut self, class: Option<StyleClass>) {
        (**self).set_style_class(class)
    }
}

impl<T: StatusSlot + ?Sized> StatusSlot for Box<T> {
    fn set_status(&mut self, message: &str, severity: Severity) {
        (**self).set_status(message, severity)
    }
}
