use log::{debug, info};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, MouseEvent, ScrollBehavior, ScrollToOptions};

use super::boot::{noop_cleanup, Cleanup, PageContext};
use super::support;
use crate::tracking::AnalyticsEvent;

/// A bare "#" keeps its default (non-)behavior; anything else is a selector
/// for the in-page target.
fn fragment_selector(href: &str) -> Option<&str> {
    (href != "#").then_some(href)
}

/// Destination for an anchor scroll: the target's document-relative top,
/// lifted above the fixed header plus a small visual margin.
fn scroll_target(target_top: f64, header_height: f64, margin: f64) -> f64 {
    target_top - header_height - margin
}

/// Intercepts clicks on same-page fragment links and turns them into an
/// animated scroll that accounts for the fixed header.
pub fn init(ctx: &Rc<PageContext>) -> Result<Cleanup, JsValue> {
    let links = support::query_all(&ctx.document, "a[href^='#']")?;
    if links.is_empty() {
        return Ok(noop_cleanup());
    }

    let mut listeners: Vec<(Element, Closure<dyn FnMut(MouseEvent)>)> = Vec::new();
    for link in links {
        let on_click = Closure::<dyn FnMut(MouseEvent)>::new({
            let ctx = ctx.clone();
            let link = link.clone();
            move |event: MouseEvent| {
                let href = link.get_attribute("href").unwrap_or_default();
                let Some(selector) = fragment_selector(&href) else {
                    return;
                };
                // Unresolved target: leave the click alone, no event either.
                let Ok(Some(target)) = ctx.document.query_selector(selector) else {
                    return;
                };
                let Ok(target) = target.dyn_into::<HtmlElement>() else {
                    return;
                };
                event.prevent_default();

                let header_height = ctx
                    .document
                    .get_element_by_id(ctx.profile.header_id)
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                    .map(|el| el.offset_height() as f64)
                    .unwrap_or(0.0);
                let top = scroll_target(
                    target.offset_top() as f64,
                    header_height,
                    ctx.config.anchor_margin_px,
                );

                let options = ScrollToOptions::new();
                options.set_top(top);
                options.set_behavior(if ctx.reduced_motion {
                    ScrollBehavior::Auto
                } else {
                    ScrollBehavior::Smooth
                });
                ctx.window.scroll_to_with_scroll_to_options(&options);

                ctx.reporter.report(
                    &AnalyticsEvent::new("Navigation", "Smooth Scroll").with_label(href.clone()),
                );
                debug!("smooth scroll to {href}");
            }
        });
        link.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        listeners.push((link, on_click));
    }

    info!("smooth scroll attached to {} links", listeners.len());
    Ok(Box::new(move || {
        for (link, on_click) in listeners {
            let _ = link
                .remove_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hash_is_left_alone() {
        assert_eq!(fragment_selector("#"), None);
    }

    #[test]
    fn fragment_href_is_its_own_selector() {
        assert_eq!(fragment_selector("#contact"), Some("#contact"));
    }

    #[test]
    fn target_sits_below_header_with_margin() {
        // contact.offsetTop - header.offsetHeight - 20
        assert_eq!(scroll_target(800.0, 72.0, 20.0), 708.0);
        assert_eq!(scroll_target(100.0, 0.0, 20.0), 80.0);
    }
}
