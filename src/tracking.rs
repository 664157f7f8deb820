use log::{debug, info, warn};
use serde_json::json;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Array, Function, Reflect};

use crate::config::BehaviorConfig;

/// One analytics event, built at the call site and handed off as-is.
/// Dropped silently when no backend is configured; never queued or retried.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalyticsEvent {
    pub category: &'static str,
    pub action: &'static str,
    pub label: String,
    pub value: Option<i64>,
}

impl AnalyticsEvent {
    pub fn new(category: &'static str, action: &'static str) -> Self {
        Self {
            category,
            action,
            label: String::new(),
            value: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_value(mut self, value: i64) -> Self {
        self.value = Some(value);
        self
    }
}

/// Where events end up. Implementations must swallow backend failures:
/// a broken analytics script must never take page behavior down with it.
pub trait Reporter {
    fn report(&self, event: &AnalyticsEvent);
}

/// Forwards to the gtag.js global: `gtag('event', action, {..})`.
pub struct GtagReporter {
    tag: Function,
}

impl Reporter for GtagReporter {
    fn report(&self, event: &AnalyticsEvent) {
        let params = serde_wasm_bindgen::to_value(&json!({
            "event_category": event.category,
            "event_label": event.label,
            "value": event.value,
        }))
        .unwrap_or(JsValue::NULL);

        if self
            .tag
            .call3(
                &JsValue::NULL,
                &JsValue::from_str("event"),
                &JsValue::from_str(event.action),
                &params,
            )
            .is_err()
        {
            warn!("gtag call failed for {}/{}", event.category, event.action);
        } else {
            debug!("event tracked: {}/{} ({})", event.category, event.action, event.label);
        }
    }
}

/// Forwards to the old analytics.js global:
/// `ga('send', 'event', category, action, label, value)`.
pub struct LegacyGaReporter {
    ga: Function,
}

impl Reporter for LegacyGaReporter {
    fn report(&self, event: &AnalyticsEvent) {
        let args = Array::new();
        args.push(&JsValue::from_str("send"));
        args.push(&JsValue::from_str("event"));
        args.push(&JsValue::from_str(event.category));
        args.push(&JsValue::from_str(event.action));
        args.push(&JsValue::from_str(&event.label));
        match event.value {
            Some(v) => args.push(&JsValue::from_f64(v as f64)),
            None => args.push(&JsValue::NULL),
        };

        if self.ga.apply(&JsValue::NULL, &args).is_err() {
            warn!("ga call failed for {}/{}", event.category, event.action);
        } else {
            debug!("event tracked (legacy): {}/{}", event.category, event.action);
        }
    }
}

/// Logs intent and drops the event.
pub struct NoopReporter {
    reason: &'static str,
}

impl Reporter for NoopReporter {
    fn report(&self, event: &AnalyticsEvent) {
        debug!(
            "event dropped ({}): {}/{} label={:?} value={:?}",
            self.reason, event.category, event.action, event.label, event.value
        );
    }
}

fn global_function(name: &str) -> Option<Function> {
    let window = web_sys::window()?;
    Reflect::get(&window, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
}

/// Pick the backend once at attach. Callers only ever see the trait.
pub fn detect(config: &BehaviorConfig) -> Rc<dyn Reporter> {
    if !config.tracking_enabled {
        info!("tracking disabled by configuration");
        return Rc::new(NoopReporter { reason: "disabled" });
    }
    if let Some(tag) = global_function("gtag") {
        info!("analytics backend: gtag ({})", config.measurement_id);
        return Rc::new(GtagReporter { tag });
    }
    if let Some(ga) = global_function("ga") {
        info!("analytics backend: legacy ga");
        return Rc::new(LegacyGaReporter { ga });
    }
    warn!("no analytics library present, events will be dropped");
    Rc::new(NoopReporter { reason: "no backend" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_defaults_to_empty_label_and_no_value() {
        let event = AnalyticsEvent::new("Page", "Loaded");
        assert_eq!(event.label, "");
        assert_eq!(event.value, None);
    }

    #[test]
    fn event_builder_sets_label_and_value() {
        let event = AnalyticsEvent::new("Engagement", "Scroll Depth")
            .with_label("75%")
            .with_value(75);
        assert_eq!(event.label, "75%");
        assert_eq!(event.value, Some(75));
    }

    #[test]
    fn noop_reporter_accepts_any_event() {
        let reporter = NoopReporter { reason: "test" };
        reporter.report(&AnalyticsEvent::new("Error", "Init Failed").with_label("boom"));
    }
}
