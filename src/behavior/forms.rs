use log::{debug, info};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, HtmlInputElement, HtmlTextAreaElement};

use super::boot::{noop_cleanup, Cleanup, PageContext};
use super::support;
use crate::tracking::AnalyticsEvent;

const ERROR_CLASS: &str = "error";

fn field_value(field: &Element) -> String {
    if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = field.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn submit_label(form_id: &str) -> String {
    if form_id.is_empty() {
        "contact-form".to_string()
    } else {
        form_id.to_string()
    }
}

/// Opt-in submit validation for forms marked with `data-validate`: every
/// required field must be non-blank, with a per-field error class toggle.
pub fn init(ctx: &Rc<PageContext>) -> Result<Cleanup, JsValue> {
    let forms = support::query_all(&ctx.document, "form[data-validate]")?;
    if forms.is_empty() {
        return Ok(noop_cleanup());
    }

    let mut listeners: Vec<(Element, Closure<dyn FnMut(Event)>)> = Vec::new();
    for form in forms {
        let on_submit = Closure::<dyn FnMut(Event)>::new({
            let ctx = ctx.clone();
            let form = form.clone();
            move |event: Event| {
                event.prevent_default();

                let fields = form
                    .query_selector_all("input[required], textarea[required]")
                    .map(support::collect)
                    .unwrap_or_default();
                let mut valid = true;
                for field in fields {
                    let classes = field.class_list();
                    if is_blank(&field_value(&field)) {
                        valid = false;
                        let _ = classes.add_1(ERROR_CLASS);
                    } else {
                        let _ = classes.remove_1(ERROR_CLASS);
                    }
                }

                if valid {
                    ctx.reporter.report(
                        &AnalyticsEvent::new("Form", "Submit").with_label(submit_label(&form.id())),
                    );
                    debug!("form submitted");
                } else {
                    debug!("form validation failed");
                }
            }
        });
        form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
        listeners.push((form, on_submit));
    }

    info!("form validation attached to {} forms", listeners.len());
    Ok(Box::new(move || {
        for (form, on_submit) in listeners {
            let _ = form
                .remove_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref());
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::{is_blank, submit_label};

    #[test]
    fn whitespace_only_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   \t"));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn unnamed_forms_report_the_default_label() {
        assert_eq!(submit_label(""), "contact-form");
        assert_eq!(submit_label("booking"), "booking");
    }
}
