use gloo_timers::callback::{Interval, Timeout};
use log::{debug, info, warn};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AddEventListenerOptions, Element};

use super::boot::{Cleanup, PageContext};
use super::support;
use crate::tracking::AnalyticsEvent;

const SLOW_LOAD_MS: f64 = 3000.0;

/// Page scroll progress as a whole percentage, None when the page does not
/// scroll at all.
fn depth_percent(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> Option<u8> {
    let scrollable = scroll_height - viewport_height;
    if scrollable <= 0.0 {
        return None;
    }
    Some(((scroll_y / scrollable) * 100.0).round().clamp(0.0, 100.0) as u8)
}

fn measured_depth(ctx: &PageContext) -> Option<u8> {
    let root = ctx.document.document_element()?;
    let viewport = ctx.window.inner_height().ok()?.as_f64()?;
    let scroll_y = ctx.window.scroll_y().ok()?;
    depth_percent(scroll_y, root.scroll_height() as f64, viewport)
}

type ClickListener = (Element, Closure<dyn FnMut()>);

fn attach_contact_clicks(ctx: &Rc<PageContext>) -> Result<Vec<ClickListener>, JsValue> {
    let mut listeners = Vec::new();

    for link in support::query_all(&ctx.document, "a[href^='tel:']")? {
        let on_click = Closure::<dyn FnMut()>::new({
            let ctx = ctx.clone();
            let link = link.clone();
            move || {
                let href = link.get_attribute("href").unwrap_or_default();
                let number = href.trim_start_matches("tel:").to_string();
                debug!("phone click: {number}");
                ctx.reporter
                    .report(&AnalyticsEvent::new("Contact", "Phone Click").with_label(number));
            }
        });
        link.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        listeners.push((link, on_click));
    }

    for link in support::query_all(&ctx.document, "a[href^='https://wa.me']")? {
        let on_click = Closure::<dyn FnMut()>::new({
            let ctx = ctx.clone();
            let link = link.clone();
            move || {
                let href = link.get_attribute("href").unwrap_or_default();
                debug!("whatsapp click");
                ctx.reporter
                    .report(&AnalyticsEvent::new("Contact", "WhatsApp Click").with_label(href));
            }
        });
        link.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        listeners.push((link, on_click));
    }

    Ok(listeners)
}

/// Report load timing once the document has finished loading; flag loads
/// slower than three seconds.
fn check_load_time(ctx: &Rc<PageContext>) {
    let Some(performance) = ctx.window.performance() else {
        return;
    };
    let timing = performance.timing();
    let page_load = timing.load_event_end() - timing.navigation_start();
    let connect = timing.response_end() - timing.request_start();
    let render = timing.dom_complete() - timing.dom_loading();
    debug!("performance: load {page_load}ms, connect {connect}ms, render {render}ms");

    if page_load > SLOW_LOAD_MS {
        warn!("slow page load: {page_load}ms");
        ctx.reporter.report(
            &AnalyticsEvent::new("Performance", "Slow Load")
                .with_label(format!("{page_load}ms"))
                .with_value(page_load as i64),
        );
    }
}

fn schedule_load_check(ctx: &Rc<PageContext>) -> Result<(), JsValue> {
    if ctx.document.ready_state() == "complete" {
        let ctx = ctx.clone();
        // Next macrotask, so loadEventEnd is populated.
        Timeout::new(0, move || check_load_time(&ctx)).forget();
        return Ok(());
    }
    let once = Closure::once({
        let ctx = ctx.clone();
        move || {
            let ctx = ctx.clone();
            Timeout::new(0, move || check_load_time(&ctx)).forget();
        }
    });
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    ctx.window
        .add_event_listener_with_callback_and_add_event_listener_options(
            "load",
            once.as_ref().unchecked_ref(),
            &options,
        )?;
    once.forget();
    Ok(())
}

/// Engagement tracking: contact clicks, time on page off a single 10 s
/// interval, a debounced scroll-depth ladder, the exit report, and the
/// load-time check.
pub fn init(ctx: &Rc<PageContext>) -> Result<Cleanup, JsValue> {
    let contact_listeners = attach_contact_clicks(ctx)?;

    // One ticker owns the elapsed-time counter; reports come due at 30 s
    // multiples. Cleared on page exit so it cannot fire after teardown.
    let interval_slot = Rc::new(RefCell::new(None::<Interval>));
    *interval_slot.borrow_mut() = Some(Interval::new(10_000, {
        let ctx = ctx.clone();
        move || {
            if let Some(total) = ctx.session.time.borrow_mut().tick() {
                ctx.reporter.report(
                    &AnalyticsEvent::new("Engagement", "Time on Page")
                        .with_label(format!("{total}s"))
                        .with_value(total as i64),
                );
            }
        }
    }));

    let debouncer = support::Debouncer::new(ctx.config.depth_debounce_ms);
    let on_scroll = Closure::<dyn FnMut()>::new({
        let ctx = ctx.clone();
        move || {
            let ctx = ctx.clone();
            debouncer.call(move || {
                let Some(percent) = measured_depth(&ctx) else {
                    return;
                };
                for milestone in ctx.session.depth.borrow_mut().advance(percent) {
                    ctx.reporter.report(
                        &AnalyticsEvent::new("Engagement", "Scroll Depth")
                            .with_label(format!("{milestone}%"))
                            .with_value(i64::from(milestone)),
                    );
                }
            });
        }
    });
    ctx.window
        .add_event_listener_with_callback_and_add_event_listener_options(
            "scroll",
            on_scroll.as_ref().unchecked_ref(),
            &support::passive_options(),
        )?;

    let on_exit = Closure::<dyn FnMut()>::new({
        let ctx = ctx.clone();
        let interval_slot = interval_slot.clone();
        move || {
            let elapsed = ctx.session.time.borrow().seconds();
            ctx.reporter.report(
                &AnalyticsEvent::new("Engagement", "Page Exit")
                    .with_label(format!("After {elapsed}s"))
                    .with_value(i64::from(elapsed)),
            );
            interval_slot.borrow_mut().take();
        }
    });
    ctx.window
        .add_event_listener_with_callback("beforeunload", on_exit.as_ref().unchecked_ref())?;

    schedule_load_check(ctx)?;

    info!(
        "engagement tracking attached ({} contact links)",
        contact_listeners.len()
    );
    let window = ctx.window.clone();
    Ok(Box::new(move || {
        for (link, on_click) in contact_listeners {
            let _ = link
                .remove_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
        }
        let _ = window
            .remove_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
        let _ = window.remove_event_listener_with_callback(
            "beforeunload",
            on_exit.as_ref().unchecked_ref(),
        );
        interval_slot.borrow_mut().take();
    }))
}

#[cfg(test)]
mod tests {
    use super::depth_percent;

    #[test]
    fn depth_spans_zero_to_hundred() {
        assert_eq!(depth_percent(0.0, 3000.0, 1000.0), Some(0));
        assert_eq!(depth_percent(1000.0, 3000.0, 1000.0), Some(50));
        assert_eq!(depth_percent(2000.0, 3000.0, 1000.0), Some(100));
    }

    #[test]
    fn overshoot_clamps() {
        // Rubber-band scrolling can push scrollY past the scrollable range.
        assert_eq!(depth_percent(2100.0, 3000.0, 1000.0), Some(100));
        assert_eq!(depth_percent(-50.0, 3000.0, 1000.0), Some(0));
    }

    #[test]
    fn non_scrolling_page_has_no_depth() {
        assert_eq!(depth_percent(0.0, 800.0, 1000.0), None);
        assert_eq!(depth_percent(0.0, 1000.0, 1000.0), None);
    }
}
