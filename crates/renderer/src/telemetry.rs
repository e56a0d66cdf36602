//! TelemetryRenderer - applies records to metric widgets
//!
//! The renderer owns every widget handle together with the categorical style
//! currently applied to it. Style changes are a single replace, so two
//! mutually exclusive classes can never coexist on one widget.

use std::collections::BTreeMap;

use contracts::{MetricKey, MetricWidget, MetricsView, StyleClass, TelemetryRecord};
use observability::{record_record_rendered, record_widgets_reset};
use tracing::{debug, trace, warn};

use crate::format::{DisplayText, FormatRules};

/// One widget and the style the renderer last applied to it
struct WidgetSlot<W> {
    widget: W,
    style: Option<StyleClass>,
    showing_placeholder: bool,
}

impl<W: MetricWidget> WidgetSlot<W> {
    fn show_placeholder(&mut self, placeholder: &str) {
        self.widget.set_placeholder(placeholder);
        self.showing_placeholder = true;
        self.apply_style(None);
    }

    fn show_text(&mut self, text: &str) {
        self.widget.set_text(text);
        self.showing_placeholder = false;
    }

    fn apply_style(&mut self, style: Option<StyleClass>) {
        if self.style != style {
            self.widget.set_style_class(style);
            self.style = style;
        }
    }
}

/// Outcome of one `reconcile` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Widgets that received a formatted value
    pub rendered: usize,
    /// Widgets that were set to the placeholder (null values)
    pub placeholders: usize,
    /// Known keys with no bound widget
    pub unbound: usize,
    /// Keys outside the metric set
    pub ignored: usize,
}

/// Renders telemetry records onto injected widgets
pub struct TelemetryRenderer<W> {
    slots: BTreeMap<MetricKey, WidgetSlot<W>>,
    rules: FormatRules,
}

impl<W: MetricWidget> TelemetryRenderer<W> {
    /// Bind widgets and put all of them into the placeholder state
    pub fn new(widgets: impl IntoIterator<Item = (MetricKey, W)>, rules: FormatRules) -> Self {
        let mut slots = BTreeMap::new();
        for (key, mut widget) in widgets {
            widget.set_placeholder(&rules.placeholder);
            widget.set_style_class(None);
            slots.insert(
                key,
                WidgetSlot {
                    widget,
                    style: None,
                    showing_placeholder: true,
                },
            );
        }

        let missing: Vec<_> = MetricKey::ALL
            .iter()
            .filter(|key| !slots.contains_key(*key))
            .map(MetricKey::as_str)
            .collect();
        if !missing.is_empty() {
            warn!(missing = ?missing, "Renderer created without widgets for some metrics");
        }

        Self { slots, rules }
    }

    /// Apply `record` as a delta: keys not in the record keep their current display
    pub fn reconcile(&mut self, record: &TelemetryRecord) -> ReconcileSummary {
        let mut summary = ReconcileSummary {
            ignored: record.unknown_keys().len(),
            ..Default::default()
        };

        if summary.ignored > 0 {
            debug!(keys = ?record.unknown_keys(), "Ignoring unknown metric keys");
        }

        for (key, value) in record.iter() {
            let Some(slot) = self.slots.get_mut(&key) else {
                summary.unbound += 1;
                continue;
            };

            let formatted = self.rules.format(key, value);
            match &formatted.text {
                DisplayText::Placeholder => {
                    slot.show_placeholder(&self.rules.placeholder);
                    summary.placeholders += 1;
                }
                DisplayText::Value(text) => {
                    slot.show_text(text);
                    slot.apply_style(formatted.style);
                    summary.rendered += 1;
                }
            }
            trace!(metric = %key, value = ?value, style = ?formatted.style, "Metric rendered");
        }

        record_record_rendered(summary.rendered, summary.placeholders);
        summary
    }

    /// Every widget back to the placeholder, every style cleared
    pub fn reset(&mut self) {
        for slot in self.slots.values_mut() {
            slot.show_placeholder(&self.rules.placeholder);
        }
        record_widgets_reset();
        debug!(widgets = self.slots.len(), "Metric widgets reset");
    }

    /// Widget bound to `key`
    pub fn widget(&self, key: MetricKey) -> Option<&W> {
        self.slots.get(&key).map(|slot| &slot.widget)
    }

    /// Style the renderer currently has applied to `key`
    pub fn style_of(&self, key: MetricKey) -> Option<StyleClass> {
        self.slots.get(&key).and_then(|slot| slot.style)
    }

    /// True when `key`'s widget shows the placeholder
    pub fn is_placeholder(&self, key: MetricKey) -> bool {
        self.slots
            .get(&key)
            .is_some_and(|slot| slot.showing_placeholder)
    }

    /// Bound widgets in dashboard order
    pub fn widgets(&self) -> impl Iterator<Item = (MetricKey, &W)> {
        self.slots.iter().map(|(key, slot)| (*key, &slot.widget))
    }

    pub fn rules(&self) -> &FormatRules {
        &self.rules
    }
}

impl<W: MetricWidget> MetricsView for TelemetryRenderer<W> {
    fn reconcile(&mut self, record: &TelemetryRecord) {
        TelemetryRenderer::reconcile(self, record);
    }

    fn reset(&mut self) {
        TelemetryRenderer::reset(self);
    }
}
